//! Hemisphere clipping in the rotated viewing frame.
//!
//! Input is a sequence of rotated unit vectors; the silhouette is the plane
//! of zero forward component. Edges straddling the plane get exactly one
//! inserted vertex at the great-circle crossing, so adjacent rings sharing a
//! border produce coinciding crossing points and the silhouette shows no
//! seam.

use foundation::math::Vec3;

fn front(v: Vec3, tolerance: f64) -> bool {
    v.x >= -tolerance
}

/// Point where the great circle through `a` and `b` crosses the silhouette
/// plane, oriented into the arc between them.
///
/// The combination `a·bx - b·ax` lies in the span of the two endpoints and
/// has zero forward component by construction; the orientation fix picks the
/// crossing on the short arc regardless of edge direction.
pub fn boundary_crossing(a: Vec3, b: Vec3) -> Vec3 {
    let c = (a.scale(b.x) - b.scale(a.x)).normalize();
    if c.length() < 0.5 {
        // Endpoints collinear with the view axis; the chord midpoint is the
        // best remaining estimate.
        return (a + b).normalize();
    }
    if c.dot(a + b) < 0.0 { c.scale(-1.0) } else { c }
}

/// Clip a closed ring, walking edges cyclically.
///
/// Returns zero or more visible runs. A ring whose walk wraps past the start
/// vertex while visible has its trailing run spliced onto the leading one,
/// so a ring split by the silhouette yields fragments with no duplicate
/// start vertex. Rings with non-finite coordinates or fewer than three
/// distinct vertices are skipped (ring-local, never fatal).
pub fn clip_ring(ring: &[Vec3], tolerance: f64) -> Vec<Vec<Vec3>> {
    let mut pts = ring.to_vec();
    drop_closing_duplicate(&mut pts);
    if pts.len() < 3 || pts.iter().any(|p| !p.is_finite()) {
        return Vec::new();
    }

    let n = pts.len();
    let mut runs: Vec<Vec<Vec3>> = Vec::new();
    let mut current: Vec<Vec3> = Vec::new();

    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let fa = front(a, tolerance);
        let fb = front(b, tolerance);

        if fa {
            current.push(a);
        }
        if fa != fb {
            current.push(boundary_crossing(a, b));
            if fa {
                runs.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.is_empty() {
        if !runs.is_empty() && front(pts[0], tolerance) {
            // The run in flight wraps past the start vertex; splice it onto
            // the run that began there.
            current.extend(runs[0].iter().copied());
            runs[0] = current;
        } else {
            runs.push(current);
        }
    }

    runs.retain(|run| run.len() >= 2);
    runs
}

/// Clip an open polyline. Same crossing contract as [`clip_ring`], but runs
/// never wrap and fragments stay open.
pub fn clip_line(line: &[Vec3], tolerance: f64) -> Vec<Vec<Vec3>> {
    if line.len() < 2 || line.iter().any(|p| !p.is_finite()) {
        return Vec::new();
    }

    let mut runs: Vec<Vec<Vec3>> = Vec::new();
    let mut current: Vec<Vec3> = Vec::new();

    for window in line.windows(2) {
        let (a, b) = (window[0], window[1]);
        let fa = front(a, tolerance);
        let fb = front(b, tolerance);

        if fa {
            current.push(a);
        }
        if fa != fb {
            current.push(boundary_crossing(a, b));
            if fa {
                runs.push(std::mem::take(&mut current));
            }
        }
    }
    if let Some(&last) = line.last() {
        if front(last, tolerance) {
            current.push(last);
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.retain(|run| run.len() >= 2);
    runs
}

fn drop_closing_duplicate(points: &mut Vec<Vec3>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = *points.last().unwrap();
        if (first.x - last.x).abs() < 1e-9
            && (first.y - last.y).abs() < 1e-9
            && (first.z - last.z).abs() < 1e-9
        {
            points.pop();
        }
    }
}

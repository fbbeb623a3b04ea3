//! Projected path construction.
//!
//! Fragments from the clipper become compact SVG-style command strings
//! (`M x,y L x,y … Z`), the form the host-side codec normalizes. Both
//! resolution tiers run through the same code; they differ only in the point
//! density of the source geometry.

use foundation::math::{Vec2, Vec3};
use formats::features::GeoPoint;
use projection::{Orthographic, Rotation};

use crate::clip::{clip_line, clip_ring};

/// Visible subpaths of one polygon (outer ring plus holes) as a single path
/// string, or `None` when every ring is hidden.
pub fn polygon_path(
    projector: &Orthographic,
    rotation: &Rotation,
    rings: &[Vec<GeoPoint>],
) -> Option<String> {
    let mut d = String::new();
    for ring in rings {
        let rotated = rotate_points(projector, rotation, ring);
        for fragment in clip_ring(&rotated, projector.clip_tolerance()) {
            let screen: Vec<Vec2> = fragment.iter().map(|&v| projector.plane_point(v)).collect();
            push_subpath(&mut d, &screen, true);
        }
    }
    if d.is_empty() { None } else { Some(d) }
}

/// Visible fragments of an open polyline as a single path string of open
/// subpaths, or `None` when the line is hidden.
pub fn line_path(
    projector: &Orthographic,
    rotation: &Rotation,
    line: &[GeoPoint],
) -> Option<String> {
    let rotated = rotate_points(projector, rotation, line);
    let mut d = String::new();
    for fragment in clip_line(&rotated, projector.clip_tolerance()) {
        let screen: Vec<Vec2> = fragment.iter().map(|&v| projector.plane_point(v)).collect();
        push_subpath(&mut d, &screen, false);
    }
    if d.is_empty() { None } else { Some(d) }
}

fn rotate_points(
    projector: &Orthographic,
    rotation: &Rotation,
    points: &[GeoPoint],
) -> Vec<Vec3> {
    points
        .iter()
        .map(|p| projector.rotate(rotation, p.lon_deg, p.lat_deg))
        .collect()
}

fn push_subpath(d: &mut String, points: &[Vec2], closed: bool) {
    for (i, p) in points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&fmt_coord(p.x));
        d.push(',');
        d.push_str(&fmt_coord(p.y));
    }
    if closed && !points.is_empty() {
        d.push('Z');
    }
}

/// Screen coordinates round to 3 decimals; `-0` is canonicalized so shared
/// silhouette vertices compare equal as text.
fn fmt_coord(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

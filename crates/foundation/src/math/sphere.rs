use super::Vec3;

/// Unit vector for a surface point given in degrees.
///
/// Convention: +x pierces the sphere at (lon 0, lat 0), +y at (lon 90, lat 0),
/// +z at the north pole.
pub fn unit_vector(lon_deg: f64, lat_deg: f64) -> Vec3 {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let cos_lat = lat.cos();
    Vec3::new(cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin())
}

/// Longitude/latitude in degrees for a unit vector.
pub fn lon_lat_deg(v: Vec3) -> (f64, f64) {
    let lon = v.y.atan2(v.x).to_degrees();
    let lat = v.z.clamp(-1.0, 1.0).asin().to_degrees();
    (lon, lat)
}

/// Angle between two unit vectors, in radians.
pub fn angular_distance(a: Vec3, b: Vec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Normalized-mean centroid of surface points given in degrees.
///
/// Returns `None` for an empty set or when the points cancel out (antipodal
/// pairs), in which case there is no meaningful center to jump to.
pub fn centroid_deg(points: impl IntoIterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    let mut sum = Vec3::new(0.0, 0.0, 0.0);
    let mut count = 0usize;
    for (lon, lat) in points {
        if !lon.is_finite() || !lat.is_finite() {
            continue;
        }
        sum = sum + unit_vector(lon, lat);
        count += 1;
    }
    if count == 0 || sum.length() < 1e-9 {
        return None;
    }
    Some(lon_lat_deg(sum.normalize()))
}

#[cfg(test)]
mod tests {
    use super::{angular_distance, centroid_deg, lon_lat_deg, unit_vector};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn unit_vector_equator_prime_meridian() {
        let v = unit_vector(0.0, 0.0);
        assert_close(v.x, 1.0, 1e-12);
        assert_close(v.y, 0.0, 1e-12);
        assert_close(v.z, 0.0, 1e-12);
    }

    #[test]
    fn unit_vector_north_pole() {
        let v = unit_vector(45.0, 90.0);
        assert_close(v.z, 1.0, 1e-12);
        assert_close(v.x, 0.0, 1e-12);
    }

    #[test]
    fn round_trip_lon_lat() {
        let (lon, lat) = lon_lat_deg(unit_vector(-73.5, 40.25));
        assert_close(lon, -73.5, 1e-9);
        assert_close(lat, 40.25, 1e-9);
    }

    #[test]
    fn angular_distance_quarter_turn() {
        let a = unit_vector(0.0, 0.0);
        let b = unit_vector(90.0, 0.0);
        assert_close(angular_distance(a, b), std::f64::consts::FRAC_PI_2, 1e-12);
    }

    #[test]
    fn centroid_of_symmetric_points() {
        let c = centroid_deg([(10.0, 0.0), (30.0, 0.0)]).expect("centroid");
        assert_close(c.0, 20.0, 1e-9);
        assert_close(c.1, 0.0, 1e-9);
    }

    #[test]
    fn centroid_of_antipodes_is_none() {
        assert!(centroid_deg([(0.0, 0.0), (180.0, 0.0)]).is_none());
        assert!(centroid_deg(std::iter::empty()).is_none());
    }
}

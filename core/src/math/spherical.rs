use crate::geometry::GeoPoint;
use std::f64::consts::FRAC_PI_2;

/// Sphere radius used by web map providers for spherical geometry.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Signed area of the closed path on a sphere of `radius`, positive for
/// counter-clockwise paths. The closing edge is implied.
pub fn signed_area(path: &[GeoPoint], radius: f64) -> f64 {
    let Some(last) = path.last() else {
        return 0.0;
    };
    if path.len() < 3 {
        return 0.0;
    }

    let mut prev_tan_lat = colatitude_tan(last.latitude);
    let mut prev_lng = last.longitude.to_radians();
    let mut total = 0.0;

    for point in path {
        let tan_lat = colatitude_tan(point.latitude);
        let lng = point.longitude.to_radians();
        total += polar_triangle_area(tan_lat, lng, prev_tan_lat, prev_lng);
        prev_tan_lat = tan_lat;
        prev_lng = lng;
    }

    total * radius * radius
}

fn colatitude_tan(latitude_deg: f64) -> f64 {
    ((FRAC_PI_2 - latitude_deg.to_radians()) / 2.0).tan()
}

/// Signed area of the triangle formed by the pole and the two points, on the unit sphere.
fn polar_triangle_area(tan1: f64, lng1: f64, tan2: f64, lng2: f64) -> f64 {
    let delta_lng = lng1 - lng2;
    let t = tan1 * tan2;
    2.0 * (t * delta_lng.sin()).atan2(1.0 + t * delta_lng.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn short_paths_enclose_nothing() {
        assert_eq!(signed_area(&[], EARTH_RADIUS_M), 0.0);
        assert_eq!(
            signed_area(&[GeoPoint::new(1.0, 1.0)], EARTH_RADIUS_M),
            0.0
        );
        assert_eq!(
            signed_area(
                &[GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0)],
                EARTH_RADIUS_M
            ),
            0.0
        );
    }

    #[test]
    fn equatorial_cell_matches_zonal_formula() {
        let cell = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        let expected = EARTH_RADIUS_M
            * EARTH_RADIUS_M
            * 1f64.to_radians()
            * (1f64.to_radians().sin() - 0f64.sin());
        let area = signed_area(&cell, EARTH_RADIUS_M).abs();
        assert!(relative_error(area, expected) < 1e-3, "area {area}");
    }

    #[test]
    fn orientation_flips_sign() {
        let ccw = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ];
        let cw: Vec<GeoPoint> = ccw.iter().rev().copied().collect();
        let forward = signed_area(&ccw, EARTH_RADIUS_M);
        let backward = signed_area(&cw, EARTH_RADIUS_M);
        assert!(forward > 0.0);
        assert!((forward + backward).abs() < 1e-3);
    }
}

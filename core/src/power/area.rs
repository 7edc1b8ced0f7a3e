use crate::geometry::GeoPoint;
use crate::math::spherical::{signed_area, EARTH_RADIUS_M};
use crate::prelude::AreaOracle;
use geo::algorithm::geodesic_area::GeodesicArea;
use geo::orient::Direction;
use geo::{Orient, Polygon};
use serde::{Deserialize, Serialize};

/// Area models available to the calculator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AreaMethod {
    /// Spherical excess on a 6 378 137 m sphere, as web map providers compute it.
    #[default]
    Spherical,
    /// Ellipsoidal (WGS84) geodesic area.
    Geodesic,
}

impl AreaOracle for AreaMethod {
    fn area(&self, path: &[GeoPoint]) -> f64 {
        if path.len() < 3 {
            return 0.0;
        }
        match self {
            AreaMethod::Spherical => signed_area(path, EARTH_RADIUS_M).abs(),
            AreaMethod::Geodesic => geodesic_area(path),
        }
    }
}

fn geodesic_area(path: &[GeoPoint]) -> f64 {
    let coords: Vec<geo::Coord<f64>> = path.iter().map(|p| p.to_coord()).collect();
    let polygon = Polygon::new(coords.into(), vec![]).orient(Direction::Default);
    polygon.geodesic_area_unsigned()
}

/// Measures the footprint traced by a vertex sequence through an area oracle.
pub struct AreaCalculator {
    oracle: Box<dyn AreaOracle + Send + Sync>,
}

impl AreaCalculator {
    pub fn new(method: AreaMethod) -> Self {
        Self::with_oracle(method)
    }

    pub fn with_oracle<O>(oracle: O) -> Self
    where
        O: AreaOracle + Send + Sync + 'static,
    {
        Self {
            oracle: Box::new(oracle),
        }
    }

    /// Enclosed area in square metres; zero for fewer than three vertices.
    pub fn compute_area(&self, path: &[GeoPoint]) -> f64 {
        if path.len() < 3 {
            return 0.0;
        }
        self.oracle.area(path)
    }
}

impl Default for AreaCalculator {
    fn default() -> Self {
        Self::new(AreaMethod::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_triangle() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(40.0, -73.0),
            GeoPoint::new(40.1, -73.0),
            GeoPoint::new(40.1, -73.1),
        ]
    }

    struct FixedOracle(f64);

    impl AreaOracle for FixedOracle {
        fn area(&self, _path: &[GeoPoint]) -> f64 {
            self.0
        }
    }

    #[test]
    fn degenerate_paths_measure_zero() {
        let calculator = AreaCalculator::default();
        assert_eq!(calculator.compute_area(&[]), 0.0);
        assert_eq!(calculator.compute_area(&scenario_triangle()[..2]), 0.0);
    }

    #[test]
    fn short_paths_never_reach_the_oracle() {
        let calculator = AreaCalculator::with_oracle(FixedOracle(99.0));
        assert_eq!(calculator.compute_area(&scenario_triangle()[..1]), 0.0);
        assert_eq!(calculator.compute_area(&scenario_triangle()), 99.0);
    }

    #[test]
    fn spherical_triangle_is_close_to_local_estimate() {
        // Right triangle: 0.1 deg of latitude by 0.1 deg of longitude at 40.1N.
        let lat_leg = EARTH_RADIUS_M * 0.1f64.to_radians();
        let lng_leg = lat_leg * 40.1f64.to_radians().cos();
        let estimate = 0.5 * lat_leg * lng_leg;
        let area = AreaCalculator::new(AreaMethod::Spherical).compute_area(&scenario_triangle());
        assert!(((area - estimate) / estimate).abs() < 0.01, "area {area}");
    }

    #[test]
    fn orientation_does_not_change_area() {
        let calculator = AreaCalculator::default();
        let forward = scenario_triangle();
        let backward: Vec<GeoPoint> = forward.iter().rev().copied().collect();
        let a = calculator.compute_area(&forward);
        let b = calculator.compute_area(&backward);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn geodesic_and_spherical_agree_within_a_percent() {
        let spherical = AreaCalculator::new(AreaMethod::Spherical).compute_area(&scenario_triangle());
        let geodesic = AreaCalculator::new(AreaMethod::Geodesic).compute_area(&scenario_triangle());
        assert!(((spherical - geodesic) / geodesic).abs() < 0.01);
    }
}

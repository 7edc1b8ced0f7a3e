use crate::workflow::script::{SessionEvent, SessionScript};
use anyhow::ensure;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use solarcore::geometry::GeoPoint;
use solarcore::math::EARTH_RADIUS_M;
use std::f64::consts::PI;

/// Configuration for generating a synthetic footprint session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintConfig {
    pub center: GeoPoint,
    pub vertices: usize,
    pub radius_m: f64,
    /// Relative radial jitter, 0 gives a regular polygon.
    pub jitter: f64,
    pub seed: u64,
    pub scenario: Option<String>,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(40.7400, -73.8408),
            vertices: 6,
            radius_m: 250.0,
            jitter: 0.15,
            seed: 0,
            scenario: None,
        }
    }
}

/// Corners of a star-shaped polygon around the center, counter-clockwise.
pub fn build_footprint(config: &FootprintConfig) -> anyhow::Result<Vec<GeoPoint>> {
    ensure!(config.radius_m > 0.0, "footprint radius must be positive");
    ensure!(
        (0.0..1.0).contains(&config.jitter),
        "footprint jitter must be in [0, 1)"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let lat_rad = config.center.latitude.to_radians();
    let step = 2.0 * PI / config.vertices as f64;

    let corners = (0..config.vertices)
        .map(|idx| {
            let scale = if config.jitter > 0.0 {
                1.0 + rng.gen_range(-config.jitter..config.jitter)
            } else {
                1.0
            };
            let bearing = idx as f64 * step;
            let north = config.radius_m * scale * bearing.sin();
            let east = config.radius_m * scale * bearing.cos();
            GeoPoint::new(
                config.center.latitude + (north / EARTH_RADIUS_M).to_degrees(),
                config.center.longitude + (east / (EARTH_RADIUS_M * lat_rad.cos())).to_degrees(),
            )
        })
        .collect();

    Ok(corners)
}

/// A script that clicks each generated corner in order.
pub fn build_footprint_script(config: &FootprintConfig) -> anyhow::Result<SessionScript> {
    let events = build_footprint(config)?
        .into_iter()
        .map(SessionEvent::click)
        .collect();
    Ok(SessionScript {
        name: config.scenario.clone(),
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarcore::power::AreaCalculator;

    #[test]
    fn generator_builds_expected_corner_count() {
        let config = FootprintConfig {
            vertices: 5,
            ..Default::default()
        };
        let script = build_footprint_script(&config).unwrap();
        assert_eq!(script.events.len(), 5);
        assert!(matches!(script.events[0], SessionEvent::Click { .. }));
    }

    #[test]
    fn regular_polygon_area_matches_planar_formula() {
        let config = FootprintConfig {
            vertices: 8,
            radius_m: 100.0,
            jitter: 0.0,
            ..Default::default()
        };
        let corners = build_footprint(&config).unwrap();
        let area = AreaCalculator::default().compute_area(&corners);
        let expected = 0.5 * 8.0 * 100.0 * 100.0 * (2.0 * PI / 8.0).sin();
        assert!(((area - expected) / expected).abs() < 0.01, "area {area}");
    }

    #[test]
    fn same_seed_repeats_footprint() {
        let config = FootprintConfig {
            seed: 13,
            ..Default::default()
        };
        assert_eq!(
            build_footprint(&config).unwrap(),
            build_footprint(&config).unwrap()
        );
    }

    #[test]
    fn invalid_jitter_is_rejected() {
        let config = FootprintConfig {
            jitter: 1.5,
            ..Default::default()
        };
        assert!(build_footprint(&config).is_err());
    }
}

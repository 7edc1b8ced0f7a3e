use anyhow::Context;
use serde::{Deserialize, Serialize};
use solarcore::geocode::{GazetteerEntry, GazetteerGeocoder};
use solarcore::geometry::GeoPoint;
use solarcore::map::Viewport;
use solarcore::power::{AreaMethod, PowerModel};
use solarcore::prelude::SessionConfig;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub zoom: u8,
    pub viewport: Viewport,
    pub initial_center: Option<GeoPoint>,
    pub area_method: AreaMethod,
    pub watts_per_square_meter: f64,
    pub suggestion_limit: usize,
    pub geocode_latency_ms: u64,
    pub bind_address: SocketAddr,
    pub gazetteer: Vec<GazetteerEntry>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            zoom: session.zoom,
            viewport: session.viewport,
            initial_center: session.initial_center,
            area_method: session.area_method,
            watts_per_square_meter: session.power.watts_per_square_meter,
            suggestion_limit: session.suggestion_limit,
            geocode_latency_ms: 0,
            bind_address: SocketAddr::from(([127, 0, 0, 1], 9000)),
            gazetteer: default_gazetteer(),
        }
    }
}

fn default_gazetteer() -> Vec<GazetteerEntry> {
    vec![
        GazetteerEntry::new("Battery Park, New York, NY", 40.7033, -74.0170),
        GazetteerEntry::new("Flushing Meadows, Queens, NY", 40.7400, -73.8408),
        GazetteerEntry::new("Topaz Solar Farm, San Luis Obispo County, CA", 35.3833, -120.0667),
        GazetteerEntry::new("Ivanpah Solar Facility, San Bernardino County, CA", 35.5567, -115.4681),
        GazetteerEntry::new("Solar Star, Rosamond, CA", 34.8306, -118.3986),
    ]
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(zoom: u8, initial_center: Option<GeoPoint>) -> Self {
        Self {
            zoom,
            initial_center,
            ..Default::default()
        }
    }

    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            zoom: self.zoom,
            viewport: self.viewport,
            initial_center: self.initial_center,
            area_method: self.area_method,
            power: PowerModel {
                watts_per_square_meter: self.watts_per_square_meter,
            },
            suggestion_limit: self.suggestion_limit,
        }
    }

    pub fn geocoder(&self) -> GazetteerGeocoder {
        GazetteerGeocoder::new(self.gazetteer.clone())
            .with_latency(Duration::from_millis(self.geocode_latency_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_session_config() {
        let cfg = WorkflowConfig::from_args(16, Some(GeoPoint::new(40.0, -73.0)));
        let session = cfg.to_session_config();
        assert_eq!(session.zoom, 16);
        assert_eq!(session.initial_center, Some(GeoPoint::new(40.0, -73.0)));
        assert_eq!(session.power.watts_per_square_meter, 1000.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"zoom: 12\narea_method: geodesic\ninitial_center:\n  lat: 40.0\n  lng: -73.0\ngazetteer:\n  - address: Depot\n    lat: 1.0\n    lng: 2.0\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.zoom, 12);
        assert_eq!(cfg.area_method, AreaMethod::Geodesic);
        assert_eq!(cfg.gazetteer.len(), 1);
        assert_eq!(cfg.bind_address.port(), 9000);
    }
}

use anyhow::Context;
use serde::{Deserialize, Serialize};
use solarcore::geometry::GeoPoint;
use std::fs;
use std::path::Path;

/// One user interaction replayed against the controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Click { lat: f64, lng: f64 },
    Drag { from: GeoPoint, to: GeoPoint },
    Clear,
    Type { text: String },
    Select { address: String },
    ToggleInfo,
}

impl SessionEvent {
    pub fn click(point: GeoPoint) -> Self {
        SessionEvent::Click {
            lat: point.latitude,
            lng: point.longitude,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub name: Option<String>,
    pub events: Vec<SessionEvent>,
}

impl SessionScript {
    pub fn new(events: Vec<SessionEvent>) -> Self {
        Self { name: None, events }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session script {}", path_ref.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session script {}", path_ref.display()))
    }
}

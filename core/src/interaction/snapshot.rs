use crate::geocode::SearchState;
use crate::geometry::GeoPoint;
use crate::map::{MapView, OverlayStyle};
use serde::{Deserialize, Serialize};

/// Everything a rendering layer needs to draw the planner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub vertices: Vec<GeoPoint>,
    pub area_square_meters: f64,
    pub nominal_power: String,
    pub map: MapView,
    pub search: SearchState,
    pub info_visible: bool,
    #[serde(default)]
    pub style: OverlayStyle,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Footer line shown under the map.
    pub fn power_label(&self) -> String {
        format!("NOMINAL POWER: {} MEGAWATTS", self.nominal_power)
    }
}

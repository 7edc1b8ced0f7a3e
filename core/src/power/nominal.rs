use crate::math::fixed::to_fixed;
use serde::{Deserialize, Serialize};

const WATTS_PER_MEGAWATT: f64 = 1_000_000.0;

/// Converts footprint area into installed capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PowerModel {
    pub watts_per_square_meter: f64,
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            watts_per_square_meter: 1000.0,
        }
    }
}

impl PowerModel {
    pub fn megawatts(&self, area_square_meters: f64) -> f64 {
        area_square_meters * self.watts_per_square_meter / WATTS_PER_MEGAWATT
    }

    /// Display string in megawatts: two decimals, or none when the area is exactly zero.
    pub fn format(&self, area_square_meters: f64) -> String {
        let digits = if area_square_meters == 0.0 { 0 } else { 2 };
        to_fixed(self.megawatts(area_square_meters), digits)
    }
}

/// Nominal power string for `area_square_meters` at 1000 W/m².
pub fn compute_nominal_power(area_square_meters: f64) -> String {
    PowerModel::default().format(area_square_meters)
}

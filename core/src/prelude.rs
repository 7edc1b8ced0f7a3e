use crate::geocode::GeocodeError;
use crate::geometry::GeoPoint;
use crate::map::Viewport;
use crate::power::{AreaMethod, PowerModel};
use serde::{Deserialize, Serialize};

/// Shared configuration for a planner session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub zoom: u8,
    pub viewport: Viewport,
    pub initial_center: Option<GeoPoint>,
    pub area_method: AreaMethod,
    pub power: PowerModel,
    pub suggestion_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            zoom: 14,
            viewport: Viewport::default(),
            initial_center: None,
            area_method: AreaMethod::Spherical,
            power: PowerModel::default(),
            suggestion_limit: 5,
        }
    }
}

/// Common error type for session operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("geocode failure: {0}")]
    GeocodeFailure(#[from] GeocodeError),
    #[error("no marker at ({}, {})", .0.latitude, .0.longitude)]
    MarkerNotFound(GeoPoint),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Spherical-geometry collaborator that measures the area enclosed by a path.
pub trait AreaOracle {
    /// Returns the enclosed area in square metres; paths shorter than three
    /// points enclose nothing.
    fn area(&self, path: &[GeoPoint]) -> f64;
}

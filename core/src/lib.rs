//! Core geometry, estimation and interaction logic for the solar footprint planner.
//!
//! The modules keep the map surface, the geocoder and the area function behind
//! small seams so any front end can drive the same controller.

pub mod geocode;
pub mod geometry;
pub mod interaction;
pub mod map;
pub mod math;
pub mod power;
pub mod prelude;
pub mod telemetry;

pub use geometry::{GeoPoint, VertexList};
pub use interaction::{InteractionController, SessionSnapshot};
pub use prelude::{AreaOracle, SessionConfig, SessionError, SessionResult};

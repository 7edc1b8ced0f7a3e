//! Address search: the geocoding seam, a bundled gazetteer and the search state machine.

pub mod gazetteer;
pub mod search;

pub use gazetteer::{GazetteerEntry, GazetteerGeocoder};
pub use search::{Completion, SearchPhase, SearchState, SearchTicket};

use crate::geometry::GeoPoint;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Autocomplete suggestion offered for a partial query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressCandidate {
    pub description: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("empty address query")]
    EmptyQuery,
    #[error("address not found: {0}")]
    NotFound(String),
}

/// Address lookup collaborator backing the search box.
pub trait Geocoder: Send + Sync {
    /// Candidates for a partially typed address, best first.
    fn suggest(&self, query: &str, limit: usize) -> Vec<AddressCandidate>;

    /// Resolves a selected address into a single coordinate.
    fn resolve(&self, address: &str)
        -> impl Future<Output = Result<GeoPoint, GeocodeError>> + Send;
}

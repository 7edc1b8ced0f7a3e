use crate::geocode::{AddressCandidate, GeocodeError, Geocoder};
use crate::geometry::GeoPoint;
use log::debug;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// One named place known to the gazetteer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GazetteerEntry {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl GazetteerEntry {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// In-memory geocoder over a fixed list of places.
#[derive(Debug, Clone, Default)]
pub struct GazetteerGeocoder {
    entries: Vec<GazetteerEntry>,
    latency: Duration,
}

impl GazetteerGeocoder {
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        Self {
            entries,
            latency: Duration::ZERO,
        }
    }

    /// Delays every resolution, mimicking a remote provider round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, address: &str) -> Result<GeoPoint, GeocodeError> {
        let needle = address.trim();
        if needle.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        self.entries
            .iter()
            .find(|entry| entry.address.eq_ignore_ascii_case(needle))
            .map(GazetteerEntry::point)
            .ok_or_else(|| GeocodeError::NotFound(needle.to_string()))
    }
}

impl Geocoder for GazetteerGeocoder {
    fn suggest(&self, query: &str, limit: usize) -> Vec<AddressCandidate> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let (mut prefixed, mut contained): (Vec<&GazetteerEntry>, Vec<&GazetteerEntry>) = self
            .entries
            .iter()
            .filter(|entry| entry.address.to_lowercase().contains(&needle))
            .partition(|entry| entry.address.to_lowercase().starts_with(&needle));
        prefixed.append(&mut contained);

        let candidates: Vec<AddressCandidate> = prefixed
            .into_iter()
            .take(limit)
            .map(|entry| AddressCandidate {
                description: entry.address.clone(),
            })
            .collect();
        debug!("gazetteer: {} candidates for {:?}", candidates.len(), query);
        candidates
    }

    fn resolve(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeoPoint, GeocodeError>> + Send {
        let outcome = self.lookup(address);
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            outcome
        }
    }
}

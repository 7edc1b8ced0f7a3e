use crate::geocode::GeocodeError;
use crate::geometry::GeoPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Empty,
    Typing,
    Resolved,
    Error,
}

/// Handle for one in-flight address resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub address: String,
}

/// Text in the search box, the last resolved center and the request ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchState {
    pub query_text: String,
    pub resolved_center: Option<GeoPoint>,
    pub phase: SearchPhase,
    #[serde(skip)]
    generation: u64,
}

/// What happened to a completed resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Resolved(GeoPoint),
    Failed(GeocodeError),
    Stale,
}

impl SearchState {
    pub fn set_query(&mut self, text: &str) {
        self.query_text = text.to_string();
        self.phase = if text.trim().is_empty() {
            SearchPhase::Empty
        } else {
            SearchPhase::Typing
        };
    }

    /// Starts a resolution; any earlier ticket becomes stale.
    pub fn begin(&mut self, address: &str) -> SearchTicket {
        self.generation += 1;
        SearchTicket {
            generation: self.generation,
            address: address.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a resolution outcome if `ticket` is still the newest request.
    /// Failures keep the previous center.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<GeoPoint, GeocodeError>,
    ) -> Completion {
        if !self.is_current(ticket) {
            return Completion::Stale;
        }
        match outcome {
            Ok(center) => {
                self.resolved_center = Some(center);
                self.phase = SearchPhase::Resolved;
                Completion::Resolved(center)
            }
            Err(err) => {
                self.phase = SearchPhase::Error;
                Completion::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_moves_between_empty_and_typing() {
        let mut state = SearchState::default();
        assert_eq!(state.phase, SearchPhase::Empty);
        state.set_query("Sol");
        assert_eq!(state.phase, SearchPhase::Typing);
        state.set_query("");
        assert_eq!(state.phase, SearchPhase::Empty);
    }

    #[test]
    fn whitespace_only_query_counts_as_empty() {
        let mut state = SearchState::default();
        state.set_query("   ");
        assert_eq!(state.phase, SearchPhase::Empty);
        assert_eq!(state.query_text, "   ");
        state.set_query("\t Sol ");
        assert_eq!(state.phase, SearchPhase::Typing);
    }

    #[test]
    fn failure_keeps_prior_center() {
        let mut state = SearchState::default();
        let first = state.begin("a");
        state.complete(&first, Ok(GeoPoint::new(1.0, 2.0)));
        let second = state.begin("b");
        let outcome = state.complete(&second, Err(GeocodeError::NotFound("b".into())));
        assert!(matches!(outcome, Completion::Failed(_)));
        assert_eq!(state.phase, SearchPhase::Error);
        assert_eq!(state.resolved_center, Some(GeoPoint::new(1.0, 2.0)));
    }

    #[test]
    fn latest_request_wins() {
        let mut state = SearchState::default();
        let older = state.begin("older");
        let newer = state.begin("newer");
        assert_eq!(
            state.complete(&newer, Ok(GeoPoint::new(5.0, 5.0))),
            Completion::Resolved(GeoPoint::new(5.0, 5.0))
        );
        assert_eq!(
            state.complete(&older, Ok(GeoPoint::new(9.0, 9.0))),
            Completion::Stale
        );
        assert_eq!(state.resolved_center, Some(GeoPoint::new(5.0, 5.0)));
    }
}

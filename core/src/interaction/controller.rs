use crate::geocode::{AddressCandidate, Completion, GeocodeError, Geocoder, SearchState, SearchTicket};
use crate::geometry::{GeoPoint, VertexList};
use crate::interaction::SessionSnapshot;
use crate::map::{MapView, OverlayStyle, Viewport};
use crate::power::{AreaCalculator, PowerModel};
use crate::prelude::{SessionConfig, SessionError, SessionResult};
use crate::telemetry::{Counter, LogManager, MetricsRecorder, MetricsSnapshot};
use tokio::sync::watch;

/// Owns the whole planner session and turns map and search events into state changes.
///
/// Observers receive a fresh [`SessionSnapshot`] after every mutation through
/// [`InteractionController::subscribe`].
pub struct InteractionController {
    vertices: VertexList,
    search: SearchState,
    map: MapView,
    info_visible: bool,
    suggestion_limit: usize,
    area: AreaCalculator,
    power: PowerModel,
    style: OverlayStyle,
    metrics: MetricsRecorder,
    logger: LogManager,
    observers: watch::Sender<SessionSnapshot>,
}

impl InteractionController {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_area_calculator(config, AreaCalculator::new(config.area_method))
    }

    pub fn with_area_calculator(config: &SessionConfig, area: AreaCalculator) -> Self {
        let (observers, _) = watch::channel(SessionSnapshot::default());
        let mut controller = Self {
            vertices: VertexList::new(),
            search: SearchState::default(),
            map: MapView::new(config.initial_center, config.zoom, config.viewport),
            info_visible: false,
            suggestion_limit: config.suggestion_limit,
            area,
            power: config.power,
            style: OverlayStyle::default(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("controller"),
            observers,
        };
        controller.publish();
        controller
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self.publish();
        self
    }

    pub fn on_map_click(&mut self, point: GeoPoint) {
        self.logger.trace(&format!("clicked coordinate {}", point));
        self.vertices.append(point);
        self.metrics.record(Counter::Click);
        self.publish();
    }

    /// Moves the marker that sat at `original` to `moved`. A marker that is no
    /// longer present leaves the session untouched.
    pub fn on_marker_drag(&mut self, original: GeoPoint, moved: GeoPoint) -> SessionResult<usize> {
        match self.vertices.replace(original, moved) {
            Some(idx) => {
                self.logger
                    .trace(&format!("marker {} moved {} -> {}", idx, original, moved));
                self.metrics.record(Counter::Drag);
                self.publish();
                Ok(idx)
            }
            None => {
                self.logger
                    .trace(&format!("ignoring drag of unknown marker {}", original));
                self.metrics.record(Counter::IgnoredDrag);
                Err(SessionError::MarkerNotFound(original))
            }
        }
    }

    pub fn on_clear_requested(&mut self) {
        self.vertices.clear();
        self.metrics.record(Counter::Clear);
        self.publish();
    }

    pub fn on_query_changed(&mut self, text: &str) {
        self.search.set_query(text);
        self.publish();
    }

    /// Autocomplete candidates for the current query text.
    pub fn suggestions<G: Geocoder>(&self, geocoder: &G) -> Vec<AddressCandidate> {
        geocoder.suggest(&self.search.query_text, self.suggestion_limit)
    }

    /// Registers a selection. Earlier selections still in flight become stale.
    pub fn begin_address_selection(&mut self, address: &str) -> SearchTicket {
        self.search.begin(address)
    }

    /// Applies a finished resolution. Returns the new center, or `None` when a
    /// newer selection superseded this one.
    pub fn complete_address_selection(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<GeoPoint, GeocodeError>,
    ) -> SessionResult<Option<GeoPoint>> {
        match self.search.complete(ticket, outcome) {
            Completion::Resolved(center) => {
                self.logger
                    .record(&format!("resolved {:?} to {}", ticket.address, center));
                self.map.recenter(center);
                self.metrics.record(Counter::GeocodeSuccess);
                self.publish();
                Ok(Some(center))
            }
            Completion::Failed(err) => {
                self.logger.failure(&format!(
                    "error while retrieving coordinates for {:?}: {}",
                    ticket.address, err
                ));
                self.metrics.record(Counter::GeocodeFailure);
                self.publish();
                Err(err.into())
            }
            Completion::Stale => {
                self.logger.trace(&format!(
                    "dropping stale resolution for {:?}",
                    ticket.address
                ));
                self.metrics.record(Counter::StaleGeocode);
                Ok(None)
            }
        }
    }

    /// Resolves `address` and recenters the map on success; failures keep the
    /// previous center.
    pub async fn on_address_selected<G: Geocoder>(
        &mut self,
        geocoder: &G,
        address: &str,
    ) -> SessionResult<Option<GeoPoint>> {
        let ticket = self.begin_address_selection(address);
        let outcome = geocoder.resolve(address).await;
        self.complete_address_selection(&ticket, outcome)
    }

    /// Flips the info panel and returns whether it is now visible.
    pub fn toggle_info_panel(&mut self) -> bool {
        self.info_visible = !self.info_visible;
        self.publish();
        self.info_visible
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.map.viewport = viewport;
        self.publish();
    }

    pub fn vertices(&self) -> &VertexList {
        &self.vertices
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn map_view(&self) -> &MapView {
        &self.map
    }

    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    pub fn area(&self) -> f64 {
        self.area.compute_area(self.vertices.points())
    }

    pub fn nominal_power(&self) -> String {
        self.power.format(self.area())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let area_square_meters = self.area();
        SessionSnapshot {
            vertices: self.vertices.points().to_vec(),
            area_square_meters,
            nominal_power: self.power.format(area_square_meters),
            map: self.map.clone(),
            search: self.search.clone(),
            info_visible: self.info_visible,
            style: self.style.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.observers.subscribe()
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.observers.send_replace(snapshot);
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

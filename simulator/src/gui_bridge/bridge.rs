use crate::gui_bridge::model::{
    DragRequest, QueryRequest, SelectRequest, SuggestParams, VisualizationModel,
};
use log::{error, info};
use solarcore::geocode::{GazetteerGeocoder, Geocoder};
use solarcore::geometry::GeoPoint;
use solarcore::interaction::InteractionController;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

type SharedController = Arc<RwLock<InteractionController>>;

fn read_session(controller: &SharedController) -> RwLockReadGuard<'_, InteractionController> {
    controller.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_session(controller: &SharedController) -> RwLockWriteGuard<'_, InteractionController> {
    controller.write().unwrap_or_else(PoisonError::into_inner)
}

/// Bridge that exposes one planner session over HTTP for the visualizer.
pub struct GuiBridge {
    controller: SharedController,
    geocoder: Arc<GazetteerGeocoder>,
    suggestion_limit: usize,
}

impl GuiBridge {
    pub fn new(
        controller: InteractionController,
        geocoder: GazetteerGeocoder,
        suggestion_limit: usize,
    ) -> Self {
        Self {
            controller: Arc::new(RwLock::new(controller)),
            geocoder: Arc::new(geocoder),
            suggestion_limit,
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let controller = self.controller.clone();
        let controller_filter = warp::any().map(move || controller.clone());
        let geocoder = self.geocoder.clone();
        let geocoder_filter = warp::any().map(move || geocoder.clone());
        let limit = self.suggestion_limit;

        let session_route = warp::path("session")
            .and(warp::path::end())
            .and(warp::get())
            .and(controller_filter.clone())
            .map(|controller: SharedController| {
                warp::reply::json(&VisualizationModel::capture(
                    &read_session(&controller),
                    "ok",
                ))
            });

        let suggest_route = warp::path("suggest")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<SuggestParams>())
            .and(geocoder_filter.clone())
            .map(move |params: SuggestParams, geocoder: Arc<GazetteerGeocoder>| {
                warp::reply::json(&geocoder.suggest(&params.q, limit))
            });

        let click_route = warp::path("click")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(controller_filter.clone())
            .map(|point: GeoPoint, controller: SharedController| {
                let mut session = write_session(&controller);
                session.on_map_click(point);
                warp::reply::json(&VisualizationModel::capture(&session, "ok"))
            });

        let drag_route = warp::path("drag")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(controller_filter.clone())
            .map(|request: DragRequest, controller: SharedController| {
                let mut session = write_session(&controller);
                let model = match session.on_marker_drag(request.from, request.to) {
                    Ok(_) => VisualizationModel::capture(&session, "ok"),
                    Err(err) => {
                        VisualizationModel::capture(&session, "ignored").with_message(err.to_string())
                    }
                };
                warp::reply::json(&model)
            });

        let clear_route = warp::path("clear")
            .and(warp::path::end())
            .and(warp::post())
            .and(controller_filter.clone())
            .map(|controller: SharedController| {
                let mut session = write_session(&controller);
                session.on_clear_requested();
                warp::reply::json(&VisualizationModel::capture(&session, "ok"))
            });

        let query_route = warp::path("query")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(controller_filter.clone())
            .map(|request: QueryRequest, controller: SharedController| {
                let mut session = write_session(&controller);
                session.on_query_changed(&request.text);
                warp::reply::json(&VisualizationModel::capture(&session, "ok"))
            });

        let toggle_route = warp::path("toggle-info")
            .and(warp::path::end())
            .and(warp::post())
            .and(controller_filter.clone())
            .map(|controller: SharedController| {
                let mut session = write_session(&controller);
                session.toggle_info_panel();
                warp::reply::json(&VisualizationModel::capture(&session, "ok"))
            });

        let select_route = warp::path("select")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(controller_filter)
            .and(geocoder_filter)
            .and_then(
                |request: SelectRequest,
                 controller: SharedController,
                 geocoder: Arc<GazetteerGeocoder>| async move {
                    let ticket = write_session(&controller).begin_address_selection(&request.address);
                    let outcome = geocoder.resolve(&ticket.address).await;

                    let mut session = write_session(&controller);
                    // Geocode failures are logged by the controller and stay off the wire.
                    let status = match session.complete_address_selection(&ticket, outcome) {
                        Ok(None) => "stale",
                        Ok(Some(_)) | Err(_) => "ok",
                    };
                    Ok::<_, warp::Rejection>(warp::reply::json(&VisualizationModel::capture(
                        &session, status,
                    )))
                },
            );

        session_route
            .or(suggest_route)
            .or(click_route)
            .or(drag_route)
            .or(clear_route)
            .or(query_route)
            .or(toggle_route)
            .or(select_route)
    }

    /// Serves the routes on a background thread with its own runtime.
    pub fn serve(&self, address: SocketAddr) -> thread::JoinHandle<()> {
        let routes = self.routes();
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        })
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
    }

    pub fn snapshot(&self) -> VisualizationModel {
        VisualizationModel::capture(&read_session(&self.controller), "ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarcore::geocode::{GazetteerEntry, SearchPhase};
    use warp::http::StatusCode;
    use solarcore::prelude::SessionConfig;

    fn bridge() -> GuiBridge {
        GuiBridge::new(
            InteractionController::new(&SessionConfig::default()),
            GazetteerGeocoder::new(vec![GazetteerEntry::new("Depot Road", 40.0, -73.0)]),
            5,
        )
    }

    async fn post_json<T: serde::Serialize>(bridge: &GuiBridge, path: &str, body: &T) -> (StatusCode, VisualizationModel) {
        let response = warp::test::request()
            .method("POST")
            .path(path)
            .json(body)
            .reply(&bridge.routes())
            .await;
        let model = serde_json::from_slice(response.body()).unwrap();
        (response.status(), model)
    }

    #[tokio::test]
    async fn click_and_drag_update_session() {
        let bridge = bridge();
        for point in [
            GeoPoint::new(40.0, -73.0),
            GeoPoint::new(40.1, -73.0),
            GeoPoint::new(40.1, -73.1),
        ] {
            post_json(&bridge, "/click", &point).await;
        }
        let (status, model) = post_json(
            &bridge,
            "/drag",
            &DragRequest {
                from: GeoPoint::new(40.0, -73.0),
                to: GeoPoint::new(40.05, -73.0),
            },
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model.status, "ok");
        assert_eq!(model.session.vertices[0], GeoPoint::new(40.05, -73.0));
        assert_eq!(bridge.snapshot().session.vertices.len(), 3);
    }

    #[tokio::test]
    async fn drag_of_unknown_marker_is_ignored() {
        let bridge = bridge();
        let (status, model) = post_json(
            &bridge,
            "/drag",
            &DragRequest {
                from: GeoPoint::new(1.0, 1.0),
                to: GeoPoint::new(2.0, 2.0),
            },
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model.status, "ignored");
        assert!(model.session.vertices.is_empty());
    }

    #[tokio::test]
    async fn select_recenters_on_known_address() {
        let bridge = bridge();
        let (status, model) = post_json(
            &bridge,
            "/select",
            &SelectRequest {
                address: "depot road".into(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model.session.map.center, Some(GeoPoint::new(40.0, -73.0)));
        assert_eq!(model.session.search.phase, SearchPhase::Resolved);
    }

    #[tokio::test]
    async fn failed_select_keeps_center_without_error_reply() {
        let bridge = bridge();
        post_json(
            &bridge,
            "/select",
            &SelectRequest {
                address: "Depot Road".into(),
            },
        )
        .await;
        let (status, model) = post_json(
            &bridge,
            "/select",
            &SelectRequest {
                address: "Atlantis".into(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model.status, "ok");
        assert!(model.message.is_none());
        assert_eq!(model.session.map.center, Some(GeoPoint::new(40.0, -73.0)));
        assert_eq!(model.metrics.geocode_failures, 1);
    }

    #[tokio::test]
    async fn routes_reject_trailing_segments() {
        let bridge = bridge();
        let response = warp::test::request()
            .method("GET")
            .path("/session/anything")
            .reply(&bridge.routes())
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = warp::test::request()
            .method("GET")
            .path("/session")
            .reply(&bridge.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn suggest_route_lists_candidates() {
        let bridge = bridge();
        let response = warp::test::request()
            .method("GET")
            .path("/suggest?q=dep")
            .reply(&bridge.routes())
            .await;
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body[0]["description"], "Depot Road");
    }

    #[tokio::test]
    async fn clear_and_toggle_routes() {
        let bridge = bridge();
        post_json(&bridge, "/click", &GeoPoint::new(1.0, 1.0)).await;
        let response = warp::test::request()
            .method("POST")
            .path("/clear")
            .reply(&bridge.routes())
            .await;
        let model: VisualizationModel = serde_json::from_slice(response.body()).unwrap();
        assert!(model.session.vertices.is_empty());
        assert_eq!(model.session.nominal_power, "0");

        let response = warp::test::request()
            .method("POST")
            .path("/toggle-info")
            .reply(&bridge.routes())
            .await;
        let model: VisualizationModel = serde_json::from_slice(response.body()).unwrap();
        assert!(model.session.info_visible);
    }
}

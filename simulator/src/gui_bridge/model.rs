use serde::{Deserialize, Serialize};
use solarcore::geometry::GeoPoint;
use solarcore::interaction::{InteractionController, SessionSnapshot};
use solarcore::telemetry::MetricsSnapshot;

/// Reply body shared by every bridge route that exposes session state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub session: SessionSnapshot,
    pub metrics: MetricsSnapshot,
}

impl VisualizationModel {
    pub fn capture(controller: &InteractionController, status: &str) -> Self {
        Self {
            status: status.to_string(),
            message: None,
            session: controller.snapshot(),
            metrics: controller.metrics(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragRequest {
    pub from: GeoPoint,
    pub to: GeoPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectRequest {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

use crate::workflow::config::WorkflowConfig;
use crate::workflow::script::{SessionEvent, SessionScript};
use log::warn;
use solarcore::geocode::GazetteerGeocoder;
use solarcore::geometry::GeoPoint;
use solarcore::interaction::{InteractionController, SessionSnapshot};
use solarcore::prelude::SessionError;
use solarcore::telemetry::MetricsSnapshot;

pub struct WorkflowResult {
    pub snapshot: SessionSnapshot,
    pub metrics: MetricsSnapshot,
    pub warnings: Vec<String>,
}

/// Replays scripted sessions against a fresh controller.
#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    geocoder: GazetteerGeocoder,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        let geocoder = config.geocoder();
        Self { config, geocoder }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn geocoder(&self) -> &GazetteerGeocoder {
        &self.geocoder
    }

    pub fn controller(&self) -> InteractionController {
        InteractionController::new(&self.config.to_session_config())
    }

    pub async fn execute(&self, script: &SessionScript) -> anyhow::Result<WorkflowResult> {
        let mut controller = self.controller();
        let mut warnings = Vec::new();

        for (step, event) in script.events.iter().enumerate() {
            if let Err(err) = self.apply(&mut controller, event).await {
                match err {
                    SessionError::InvalidInput(_) => {
                        return Err(anyhow::Error::new(err)
                            .context(format!("replaying step {} ({:?})", step, event)));
                    }
                    recoverable => {
                        warn!("step {}: {}", step, recoverable);
                        warnings.push(format!("step {}: {}", step, recoverable));
                    }
                }
            }
        }

        Ok(WorkflowResult {
            snapshot: controller.snapshot(),
            metrics: controller.metrics(),
            warnings,
        })
    }

    async fn apply(
        &self,
        controller: &mut InteractionController,
        event: &SessionEvent,
    ) -> Result<(), SessionError> {
        match event {
            SessionEvent::Click { lat, lng } => {
                if !lat.is_finite() || !lng.is_finite() {
                    return Err(SessionError::InvalidInput(format!(
                        "non-finite click ({}, {})",
                        lat, lng
                    )));
                }
                controller.on_map_click(GeoPoint::new(*lat, *lng));
            }
            SessionEvent::Drag { from, to } => {
                controller.on_marker_drag(*from, *to)?;
            }
            SessionEvent::Clear => controller.on_clear_requested(),
            SessionEvent::Type { text } => controller.on_query_changed(text),
            SessionEvent::Select { address } => {
                controller
                    .on_address_selected(&self.geocoder, address)
                    .await?;
            }
            SessionEvent::ToggleInfo => {
                controller.toggle_info_panel();
            }
        }
        Ok(())
    }
}

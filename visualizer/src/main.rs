use iced::{
    time,
    widget::{button, canvas::Canvas, column, row, scrollable, text, text_input, Column, Container},
    Alignment, Element, Length, Subscription, Task, Theme,
};
use serde::Deserialize;
use serde_json::json;
use solarcore::geocode::AddressCandidate;
use solarcore::geometry::GeoPoint;
use solarcore::interaction::SessionSnapshot;
use std::time::Duration;

mod map;

use map::MapSurface;

const BRIDGE_URL: &str = "http://127.0.0.1:9000";

fn main() -> iced::Result {
    iced::application(Planner::boot, Planner::update, Planner::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Planner) -> String {
    "Solar Cell Installation Calculator".into()
}

fn application_subscription(_: &Planner) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Planner) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Planner {
    session: SessionSnapshot,
    query: String,
    suggestions: Vec<AddressCandidate>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    SessionFetched(Result<BridgePayload, String>),
    MapClicked(GeoPoint),
    MarkerDragged { from: GeoPoint, to: GeoPoint },
    ClearMarkers,
    QueryChanged(String),
    SuggestionsFetched(String, Result<Vec<AddressCandidate>, String>),
    AddressSelected(String),
    ToggleInfo,
    Updated(Result<BridgePayload, String>),
}

/// Session half of a bridge reply; route status and diagnostics stay in the bridge log.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgePayload {
    session: SessionSnapshot,
}

impl Planner {
    fn boot() -> (Self, Task<Message>) {
        (
            Planner {
                session: SessionSnapshot::default(),
                query: String::new(),
                suggestions: Vec::new(),
                status: "Waiting for planner bridge...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_session(), Message::SessionFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_session(), Message::SessionFetched),
            Message::SessionFetched(Ok(payload)) => {
                state.session = payload.session;
                Task::none()
            }
            Message::SessionFetched(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::MapClicked(point) => {
                state.push_history(format!("Marker placed at {point}"));
                Task::perform(post_event("click", json!(point)), Message::Updated)
            }
            Message::MarkerDragged { from, to } => {
                state.push_history(format!("Marker moved {from} -> {to}"));
                Task::perform(
                    post_event("drag", json!({ "from": from, "to": to })),
                    Message::Updated,
                )
            }
            Message::ClearMarkers => {
                state.push_history("Markers cleared".into());
                Task::perform(post_event("clear", json!(null)), Message::Updated)
            }
            Message::QueryChanged(text) => {
                state.query = text.clone();
                Task::batch([
                    Task::perform(
                        post_event("query", json!({ "text": text.clone() })),
                        Message::Updated,
                    ),
                    Task::perform(fetch_suggestions(text.clone()), move |result| {
                        Message::SuggestionsFetched(text, result)
                    }),
                ])
            }
            Message::SuggestionsFetched(query, _) if query != state.query => Task::none(),
            Message::SuggestionsFetched(_, Ok(suggestions)) => {
                state.suggestions = suggestions;
                Task::none()
            }
            Message::SuggestionsFetched(_, Err(err)) => {
                state.suggestions.clear();
                state.status = format!("Autocomplete error: {err}");
                Task::none()
            }
            Message::AddressSelected(address) => {
                state.query = address.clone();
                state.suggestions.clear();
                state.push_history(format!("Searching {address}"));
                Task::perform(
                    post_event("select", json!({ "address": address })),
                    Message::Updated,
                )
            }
            Message::ToggleInfo => {
                Task::perform(post_event("toggle-info", json!(null)), Message::Updated)
            }
            Message::Updated(Ok(payload)) => {
                state.status = format!(
                    "{} markers, {} m²",
                    payload.session.vertices.len(),
                    payload.session.area_square_meters.round()
                );
                state.session = payload.session;
                Task::none()
            }
            Message::Updated(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let search_bar = row![
            text_input("Search places...", &state.query)
                .on_input(Message::QueryChanged)
                .on_submit(Message::AddressSelected(state.query.clone()))
                .padding(8)
                .width(Length::Fill),
            button("Info").on_press(Message::ToggleInfo).padding(8),
            button("Clear Map Markers")
                .on_press(Message::ClearMarkers)
                .padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let suggestion_list = state.suggestions.iter().fold(
            Column::new().spacing(2),
            |col, candidate| {
                col.push(
                    button(text(candidate.description.clone()).size(14))
                        .on_press(Message::AddressSelected(candidate.description.clone()))
                        .width(Length::Fill)
                        .padding(4),
                )
            },
        );

        let info_panel: Element<'_, Message> = if state.session.info_visible {
            column![
                text("How it works").size(18),
                text("Click the map to drop a corner marker; markers are joined in the order placed.")
                    .size(13),
                text("Drag a marker to move that corner. Clear Map Markers removes every corner.")
                    .size(13),
                text("Nominal power = spherical area (m²) x 1000 W/m², shown in megawatts.")
                    .size(13),
                text("Search an address to recenter the map on it.").size(13),
            ]
            .spacing(4)
            .padding(8)
            .into()
        } else {
            Column::new().into()
        };

        let map = Canvas::new(MapSurface::new(&state.session))
            .width(Length::Fill)
            .height(Length::Fill);

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let layout = column![
            text("SOLAR CELL INSTALLATION CALCULATOR").size(24),
            search_bar,
            suggestion_list,
            info_panel,
            Container::new(map).width(Length::Fill).height(Length::FillPortion(5)),
            text(state.session.power_label()).size(20),
            text(&state.status).size(13),
            Container::new(scrollable(history_list).height(Length::Fixed(80.0))).padding(4),
        ]
        .spacing(10)
        .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_session() -> Result<BridgePayload, String> {
    let response = reqwest::get(format!("{BRIDGE_URL}/session"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<BridgePayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn fetch_suggestions(query: String) -> Result<Vec<AddressCandidate>, String> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{BRIDGE_URL}/suggest"))
        .query(&[("q", query)])
        .send()
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<Vec<AddressCandidate>>()
        .await
        .map_err(|e| e.to_string())
}

/// Posts an interaction; the bridge answers with the updated session, including
/// after an ignored drag or an unresolved address.
async fn post_event(route: &'static str, body: serde_json::Value) -> Result<BridgePayload, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/{route}"))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("bridge replied {}", status));
    }
    response
        .json::<BridgePayload>()
        .await
        .map_err(|e| e.to_string())
}

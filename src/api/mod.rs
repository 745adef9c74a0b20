use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::config::MapConfig;
use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::error::TrackerError;
use crate::models::Coordinate;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub map: MapConfig,
}

/// Map widget configuration as the browser consumes it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSettings {
    /// `[latitude, longitude]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    /// `[[south, west], [north, east]]`
    pub max_bounds: [[f64; 2]; 2],
}

impl From<&MapConfig> for MapSettings {
    fn from(map: &MapConfig) -> Self {
        Self {
            center: [map.center_latitude, map.center_longitude],
            zoom: map.zoom,
            min_zoom: map.min_zoom,
            max_bounds: [map.south_west, map.north_east],
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/map", get(get_map))
        .route("/locations", post(select_location))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/error", delete(dismiss_error))
        .with_state(state)
}

async fn get_map(State(state): State<AppState>) -> Json<MapSettings> {
    Json(MapSettings::from(&state.map))
}

/// Run a full selection and answer with the resulting display state
///
/// Enrichment keeps running in the background; clients poll the dashboard
/// until the loading flags clear.
async fn select_location(
    State(state): State<AppState>,
    Json(coordinate): Json<Coordinate>,
) -> Response {
    match state.dashboard.select_location(coordinate).await {
        Ok(_) => Json(state.dashboard.snapshot().await).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": TrackerError::from(e).user_message() })),
        )
            .into_response(),
    }
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

async fn dismiss_error(State(state): State<AppState>) -> StatusCode {
    state.dashboard.dismiss_error().await;
    StatusCode::NO_CONTENT
}

//! Dashboard, snapshot and daily forecast handlers

use application::{DashboardView, DisplayRow};
use axum::{Json, extract::State};
use domain::{SnapshotDisplay, WeatherSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::HoursQuery;
use crate::{error::ApiError, middleware::ValidatedQuery, state::AppState};

/// Snapshot response: raw values plus display strings
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub hour_offset: u32,
    pub snapshot: WeatherSnapshot,
    pub display: SnapshotDisplay,
}

/// Daily forecast rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecastResponse {
    pub days: Vec<DisplayRow>,
}

/// Full dashboard view for the resolved location
///
/// Triggers the first load when nothing has been fetched yet.
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HoursQuery>,
) -> Json<DashboardView> {
    state.dashboard.ensure_loaded().await;
    Json(state.dashboard.view(query.hours))
}

/// Re-request the location fix and reload every dataset
#[instrument(skip(state))]
pub async fn refresh_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.refresh().await;
    debug!("Dashboard refreshed");
    Json(state.dashboard.view(0))
}

/// Weather snapshot for the selected look-ahead
#[instrument(skip(state))]
pub async fn get_snapshot(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HoursQuery>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    state.dashboard.ensure_loaded().await;
    let snapshot = state.dashboard.snapshot(query.hours)?;

    Ok(Json(SnapshotResponse {
        hour_offset: query.hours,
        display: snapshot.display(),
        snapshot,
    }))
}

/// Presented long-range rows ("Today", "Tomorrow", weekday names)
#[instrument(skip(state))]
pub async fn get_daily_forecast(
    State(state): State<AppState>,
) -> Result<Json<DailyForecastResponse>, ApiError> {
    state.dashboard.ensure_loaded().await;
    let days = state.dashboard.daily_rows()?;
    Ok(Json(DailyForecastResponse { days }))
}

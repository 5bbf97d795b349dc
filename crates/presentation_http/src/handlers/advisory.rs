//! Advisory handlers

use application::AdvisoryPanel;
use axum::{
    Json,
    extract::{Path, State},
};
use domain::AdvisoryCategory;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Advisory request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdvisoryRequest {
    /// Category identifier, e.g. `sowing-window` or `irrigation`
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub category: String,

    /// Snapshot look-ahead in hours
    #[serde(default)]
    pub hours: u32,
}

/// Advisory panel for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    pub category: AdvisoryCategory,
    pub label: String,
    pub panel: AdvisoryPanel,
}

impl AdvisoryResponse {
    fn new(category: AdvisoryCategory, panel: AdvisoryPanel) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            panel,
        }
    }
}

/// Generate an advisory from the current snapshot
///
/// A model failure still answers 200 with an `unavailable` panel. Only a
/// missing snapshot or a bad category is an error.
#[instrument(skip(state, request), fields(category = %request.category))]
pub async fn request_advisory(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AdvisoryRequest>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    let category: AdvisoryCategory = request.category.parse()?;

    state.dashboard.ensure_loaded().await;
    let (snapshot, rain_series) = state.dashboard.advisory_inputs(request.hours)?;

    let panel = state
        .advisory
        .request(category, &snapshot, &rain_series)
        .await;

    Ok(Json(AdvisoryResponse::new(category, panel)))
}

/// Current panel state for a category
pub async fn get_advisory(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    let category: AdvisoryCategory = category
        .parse()
        .map_err(|_| ApiError::NotFound(format!("advisory category '{category}'")))?;

    Ok(Json(AdvisoryResponse::new(
        category,
        state.advisory.panel(category),
    )))
}

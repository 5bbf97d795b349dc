//! Place search and location override handlers

use application::{DashboardView, LocationStatus, ResolvedLocation};
use axum::{Json, extract::State};
use domain::{GeoLocation, Place};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, ValidatedQuery},
    state::AppState,
};

/// `?q=` place search query
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub q: String,
}

/// One forward-geocoding hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Place> for PlaceResult {
    fn from(place: Place) -> Self {
        Self {
            display_name: place.display_name(),
            latitude: place.location.latitude(),
            longitude: place.location.longitude(),
            name: place.name,
            state: place.state,
            country: place.country,
        }
    }
}

/// Search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<PlaceResult>,
}

/// Location override body
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct OverrideLocationRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

/// Where the dashboard is currently looking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub resolved: ResolvedLocation,
    pub status: LocationStatus,
    #[serde(rename = "override")]
    pub user_override: Option<GeoLocation>,
}

/// Forward place search. A blank query returns no results.
#[instrument(skip(state))]
pub async fn search_locations(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let places = state.dashboard.search_places(&query.q).await?;
    Ok(Json(SearchResponse {
        results: places.into_iter().map(PlaceResult::from).collect(),
    }))
}

/// Resolved location, origin and the last device-fix outcome
pub async fn get_location(State(state): State<AppState>) -> Json<LocationResponse> {
    let location = state.dashboard.location();
    Json(LocationResponse {
        resolved: location.resolve(),
        status: location.status(),
        user_override: location.user_override(),
    })
}

/// Pin the dashboard to a coordinate and reload
#[instrument(skip(state))]
pub async fn set_location(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OverrideLocationRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let location = GeoLocation::new(request.latitude, request.longitude)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(%location, "Location override set");
    state.dashboard.select_location(location).await;
    Ok(Json(state.dashboard.view(0)))
}

/// Drop the override and reload for the device fix or default coordinate
#[instrument(skip(state))]
pub async fn clear_location(State(state): State<AppState>) -> Json<DashboardView> {
    state.dashboard.clear_selection().await;
    Json(state.dashboard.view(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_result_uses_display_name() {
        let place = Place {
            name: "Nagpur".into(),
            state: Some("Maharashtra".into()),
            country: "IN".into(),
            location: GeoLocation::new(21.1458, 79.0882).unwrap(),
        };
        let result = PlaceResult::from(place);
        assert_eq!(result.display_name, "Nagpur, Maharashtra, IN");
        assert!((result.latitude - 21.1458).abs() < 1e-9);
    }

    #[test]
    fn override_request_range_checked() {
        let ok = OverrideLocationRequest {
            latitude: 21.0,
            longitude: 79.0,
        };
        assert!(ok.validate().is_ok());

        let bad = OverrideLocationRequest {
            latitude: 21.0,
            longitude: 181.0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn search_query_length_checked() {
        let query = SearchQuery { q: "x".repeat(101) };
        assert!(query.validate().is_err());
    }
}

//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Dashboard API (v1)
        .route("/v1/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/v1/dashboard/refresh",
            post(handlers::dashboard::refresh_dashboard),
        )
        .route("/v1/snapshot", get(handlers::dashboard::get_snapshot))
        .route(
            "/v1/forecast/daily",
            get(handlers::dashboard::get_daily_forecast),
        )
        // Advisory API (v1)
        .route("/v1/advisory", post(handlers::advisory::request_advisory))
        .route(
            "/v1/advisory/{category}",
            get(handlers::advisory::get_advisory),
        )
        // Location API (v1)
        .route(
            "/v1/locations/search",
            get(handlers::locations::search_locations),
        )
        .route(
            "/v1/location",
            get(handlers::locations::get_location)
                .put(handlers::locations::set_location)
                .delete(handlers::locations::clear_location),
        )
        // Map overlay
        .route(
            "/v1/map/overlay",
            get(handlers::map::get_overlay).put(handlers::map::update_overlay),
        )
        // Attach state
        .with_state(state)
}

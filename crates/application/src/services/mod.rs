//! Application services - Use case implementations

pub mod advisory_service;
pub mod dashboard_service;
pub mod forecast_presenter;
pub mod health_service;
pub mod location_service;
pub mod map_overlay;
pub mod snapshot_aggregator;

pub use advisory_service::{AdvisoryPanel, AdvisoryService, build_advisory_prompt};
pub use dashboard_service::{
    DISASTER_ALERT_URL, DashboardData, DashboardService, DashboardView, QueryState,
};
pub use forecast_presenter::{
    CurrentDetails, DisplayRow, HourlyPoint, present_current, present_daily, present_daily_at,
    present_hourly,
};
pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use location_service::{LocationOrigin, LocationService, LocationStatus, ResolvedLocation};
pub use map_overlay::{
    BASE_MAP_URL, HOUR_PRESETS, MapOverlayController, OverlaySettings, OverlayTile, TileSource,
};
pub use snapshot_aggregator::{build_snapshot, forecast_index, rain_proxy_series};

//! Dashboard orchestration
//!
//! Issues the current, short-range, daily and reverse-geocode queries
//! concurrently for the resolved location and combines their states into a
//! single [`DashboardView`]. Any failed query fails the whole view. Any
//! query still in flight keeps it loading.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use domain::{
    CurrentReading, DailyForecastEntry, GeoLocation, Humidity, Place, ShortRangeForecastEntry,
    SnapshotDisplay, WeatherSnapshot,
};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use super::{
    forecast_presenter::{
        CurrentDetails, DisplayRow, HourlyPoint, present_current, present_daily_at,
        present_hourly,
    },
    location_service::{LocationService, LocationStatus, ResolvedLocation},
    snapshot_aggregator::{build_snapshot, rain_proxy_series},
};
use crate::{error::ApplicationError, ports::WeatherPort};

/// National disaster alert portal linked from the dashboard
pub const DISASTER_ALERT_URL: &str = "https://sachet.ndma.gov.in/";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

/// Provider maximum for the daily forecast
pub const DEFAULT_DAILY_DAYS: u8 = 16;

pub const DEFAULT_SEARCH_LIMIT: u8 = 5;

/// Entries shown on the hourly temperature strip
pub const HOURLY_STRIP_LEN: usize = 8;

/// Load state of one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    fn from_result(result: Result<T, ApplicationError>, dataset: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                warn!(dataset, error = %e, "Weather query failed");
                Self::Failed(e.to_string())
            },
        }
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone)]
struct Datasets {
    generation: u64,
    location: ResolvedLocation,
    fetched_at: DateTime<Utc>,
    current: QueryState<CurrentReading>,
    short_range: QueryState<Vec<ShortRangeForecastEntry>>,
    daily: QueryState<Vec<DailyForecastEntry>>,
    place: QueryState<Option<Place>>,
}

impl Datasets {
    fn loading(generation: u64, location: ResolvedLocation) -> Self {
        Self {
            generation,
            location,
            fetched_at: Utc::now(),
            current: QueryState::Loading,
            short_range: QueryState::Loading,
            daily: QueryState::Loading,
            place: QueryState::Loading,
        }
    }

    fn errors(&self) -> Vec<String> {
        [
            self.current.error(),
            self.short_range.error(),
            self.daily.error(),
            self.place.error(),
        ]
        .into_iter()
        .flatten()
        .map(ToString::to_string)
        .collect()
    }

    fn any_loading(&self) -> bool {
        self.current.is_loading()
            || self.short_range.is_loading()
            || self.daily.is_loading()
            || self.place.is_loading()
    }
}

/// Fully loaded dashboard content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub location: ResolvedLocation,
    pub location_status: LocationStatus,
    pub place_name: Option<String>,
    pub hour_offset: u32,
    pub current: CurrentDetails,
    pub snapshot: WeatherSnapshot,
    pub snapshot_display: SnapshotDisplay,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DisplayRow>,
    pub rain_proxy: Vec<Humidity>,
    pub disaster_alert_url: String,
    pub fetched_at: DateTime<Utc>,
}

/// What the dashboard should render right now
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// At least one dataset is not available yet
    Loading { location_status: LocationStatus },
    /// A query failed; the user may retry
    Failed {
        message: String,
        errors: Vec<String>,
        location_status: LocationStatus,
    },
    Ready(Box<DashboardData>),
}

fn compose_view(
    datasets: Option<&Datasets>,
    location_status: LocationStatus,
    hour_offset: u32,
) -> DashboardView {
    let Some(datasets) = datasets else {
        return DashboardView::Loading { location_status };
    };

    let errors = datasets.errors();
    if !errors.is_empty() {
        return DashboardView::Failed {
            message: FETCH_FAILED_MESSAGE.to_string(),
            errors,
            location_status,
        };
    }

    let (Some(current), Some(short_range), Some(daily), Some(place)) = (
        datasets.current.ready(),
        datasets.short_range.ready(),
        datasets.daily.ready(),
        datasets.place.ready(),
    ) else {
        return DashboardView::Loading { location_status };
    };

    let snapshot = build_snapshot(current, short_range, hour_offset);
    let offset = current.local_offset();
    let place_name = place
        .as_ref()
        .map(Place::display_name)
        .or_else(|| Some(current.location_name.clone()))
        .filter(|name| !name.is_empty());

    DashboardView::Ready(Box::new(DashboardData {
        location: datasets.location,
        location_status,
        place_name,
        hour_offset,
        current: present_current(current),
        snapshot_display: snapshot.display(),
        snapshot,
        hourly: present_hourly(short_range, HOURLY_STRIP_LEN, offset),
        daily: present_daily_at(daily, offset),
        rain_proxy: rain_proxy_series(short_range, hour_offset),
        disaster_alert_url: DISASTER_ALERT_URL.to_string(),
        fetched_at: datasets.fetched_at,
    }))
}

/// Loads and serves dashboard data for the resolved location
pub struct DashboardService {
    weather: Arc<dyn WeatherPort>,
    location: Arc<LocationService>,
    daily_days: u8,
    search_limit: u8,
    datasets: RwLock<Option<Datasets>>,
    first_load: OnceCell<()>,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService")
            .field("weather", &"<WeatherPort>")
            .field("location", &self.location)
            .field("daily_days", &self.daily_days)
            .field("search_limit", &self.search_limit)
            .field("loaded", &self.datasets.read().is_some())
            .finish()
    }
}

impl DashboardService {
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, location: Arc<LocationService>) -> Self {
        Self {
            weather,
            location,
            daily_days: DEFAULT_DAILY_DAYS,
            search_limit: DEFAULT_SEARCH_LIMIT,
            datasets: RwLock::new(None),
            first_load: OnceCell::new(),
        }
    }

    /// Number of days requested from the daily forecast
    #[must_use]
    pub fn with_daily_days(mut self, days: u8) -> Self {
        self.daily_days = days.clamp(1, DEFAULT_DAILY_DAYS);
        self
    }

    #[must_use]
    pub fn with_search_limit(mut self, limit: u8) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn location(&self) -> &Arc<LocationService> {
        &self.location
    }

    /// Requests a fresh device fix, then reloads every dataset
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        match self.location.request_location().await {
            Ok(location) => debug!(%location, "Refreshing with device fix"),
            Err(error) => debug!(%error, "Refreshing without device fix"),
        }
        self.load(self.location.resolve()).await;
    }

    /// Loads once if nothing has been requested yet.
    ///
    /// Concurrent callers share the first load and wait for it.
    pub async fn ensure_loaded(&self) {
        self.first_load
            .get_or_init(|| async {
                if self.datasets.read().is_none() {
                    self.refresh().await;
                }
            })
            .await;
    }

    /// Fetches all datasets for `resolved` concurrently.
    ///
    /// A load superseded by a newer one leaves the newer results in place.
    #[instrument(skip(self), fields(location = %resolved.location))]
    pub async fn load(&self, resolved: ResolvedLocation) {
        let generation = {
            let mut datasets = self.datasets.write();
            let next = datasets.as_ref().map_or(1, |d| d.generation + 1);
            *datasets = Some(Datasets::loading(next, resolved));
            next
        };

        let location = resolved.location;
        let (current, short_range, daily, place) = tokio::join!(
            self.weather.current_conditions(&location),
            self.weather.short_range_forecast(&location),
            self.weather.daily_forecast(&location, self.daily_days),
            self.weather.reverse_geocode(&location),
        );

        let mut datasets = self.datasets.write();
        match datasets.as_mut() {
            Some(d) if d.generation == generation => {
                d.current = QueryState::from_result(current, "current");
                d.short_range = QueryState::from_result(short_range, "short_range");
                d.daily = QueryState::from_result(daily, "daily");
                d.place = QueryState::from_result(place, "reverse_geocode");
                d.fetched_at = Utc::now();
                info!(generation, failed = d.errors().len(), "Dashboard datasets loaded");
            },
            _ => debug!(generation, "Discarding superseded dashboard load"),
        }
    }

    /// Pins the dashboard to `location` and reloads
    pub async fn select_location(&self, location: GeoLocation) {
        self.location.set_override(location);
        self.load(self.location.resolve()).await;
    }

    /// Drops a pinned location and reloads
    pub async fn clear_selection(&self) {
        self.location.clear_override();
        self.load(self.location.resolve()).await;
    }

    /// Current view for `hour_offset` hours ahead
    #[must_use]
    pub fn view(&self, hour_offset: u32) -> DashboardView {
        let status = self.location.status();
        let datasets = self.datasets.read();
        compose_view(datasets.as_ref(), status, hour_offset)
    }

    fn ready_data(&self, hour_offset: u32) -> Result<DashboardData, ApplicationError> {
        match self.view(hour_offset) {
            DashboardView::Ready(data) => Ok(*data),
            DashboardView::Loading { .. } => Err(ApplicationError::DataUnavailable(
                "weather data is still loading".to_string(),
            )),
            DashboardView::Failed { message, .. } => {
                Err(ApplicationError::DataUnavailable(message))
            },
        }
    }

    /// Snapshot for `hour_offset`, once all datasets are loaded
    pub fn snapshot(&self, hour_offset: u32) -> Result<WeatherSnapshot, ApplicationError> {
        self.ready_data(hour_offset).map(|data| data.snapshot)
    }

    /// Presented daily rows, once all datasets are loaded
    pub fn daily_rows(&self) -> Result<Vec<DisplayRow>, ApplicationError> {
        self.ready_data(0).map(|data| data.daily)
    }

    /// Snapshot and rain proxy series used to build an advisory prompt
    pub fn advisory_inputs(
        &self,
        hour_offset: u32,
    ) -> Result<(WeatherSnapshot, Vec<Humidity>), ApplicationError> {
        self.ready_data(hour_offset)
            .map(|data| (data.snapshot, data.rain_proxy))
    }

    /// Forward place search. Blank queries return nothing without a request.
    #[instrument(skip(self))]
    pub async fn search_places(&self, query: &str) -> Result<Vec<Place>, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.weather.search_places(query, self.search_limit).await
    }
}

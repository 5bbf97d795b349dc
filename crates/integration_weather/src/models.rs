//! OpenWeatherMap data models
//!
//! Public types returned by the client plus the raw response shapes used
//! for deserialization.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Station or city name
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Temperature in °C
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Sea level pressure in hPa
    pub pressure: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    pub wind_direction: Option<u16>,
    /// Visibility in meters
    pub visibility_m: Option<u32>,
    pub description: String,
    /// Provider condition id (e.g. 500 = light rain)
    pub condition_id: Option<u32>,
    pub observed_at: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Shift from UTC in seconds
    pub utc_offset_secs: i32,
}

/// One 3-hour forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastStep {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: Option<u16>,
    pub description: String,
}

/// One day of the daily forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutlook {
    pub date: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: Option<f64>,
    /// Rainfall in mm, only present when rain is expected
    pub rain_mm: Option<f64>,
    pub description: String,
}

/// A place returned by forward or reverse geocoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Name in other languages, keyed by language code
    #[serde(default)]
    pub local_names: HashMap<String, String>,
}

// ============================================================================
// Raw API response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCondition {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMain {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiSys {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// `GET /data/2.5/weather`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrentResponse {
    pub coord: ApiCoord,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub main: ApiMain,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub wind: Option<ApiWind>,
    pub dt: i64,
    #[serde(default)]
    pub sys: ApiSys,
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastItem {
    pub dt: i64,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    #[serde(default)]
    pub wind: Option<ApiWind>,
}

/// `GET /data/2.5/forecast`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastResponse {
    #[serde(default)]
    pub list: Vec<ApiForecastItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDailyItem {
    pub dt: i64,
    pub temp: ApiDailyTemp,
    pub humidity: u8,
    #[serde(default, alias = "speed")]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
}

/// `GET /data/2.5/forecast/daily`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiDailyResponse {
    #[serde(default)]
    pub list: Vec<ApiDailyItem>,
}

/// Element of `GET /geo/1.0/direct` and `GET /geo/1.0/reverse`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiGeocodeItem {
    pub name: String,
    #[serde(default)]
    pub local_names: Option<HashMap<String, String>>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<ApiGeocodeItem> for GeocodedPlace {
    fn from(item: ApiGeocodeItem) -> Self {
        Self {
            name: item.name,
            state: item.state,
            country: item.country,
            latitude: item.lat,
            longitude: item.lon,
            local_names: item.local_names.unwrap_or_default(),
        }
    }
}

/// First condition's description, empty when the provider sent none
pub(crate) fn primary_description(conditions: &[ApiCondition]) -> String {
    conditions
        .first()
        .map(|c| c.description.clone())
        .unwrap_or_default()
}

//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather, forecast and
//! geocoding APIs. All requests use metric units.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    ApiCurrentResponse, ApiDailyResponse, ApiForecastResponse, ApiGeocodeItem, CurrentConditions,
    DailyOutlook, ForecastStep, GeocodedPlace, primary_description,
};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// API key rejected by the provider
    #[error("API key rejected by weather service")]
    Unauthorized,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Unit system passed to the API (default: metric)
    #[serde(default = "default_units")]
    pub units: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            units: default_units(),
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("units", &self.units)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherConfig {
    /// Configuration with the given API key and default endpoints
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

/// Maximum days the daily forecast endpoint serves
pub const MAX_DAILY_DAYS: u8 = 16;

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a location
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Get the 3-hourly forecast for roughly the next five days
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastStep>, WeatherError>;

    /// Get the daily forecast (1-16 days)
    async fn get_daily(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DailyOutlook>, WeatherError>;

    /// Places near a coordinate, closest first
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        limit: u8,
    ) -> Result<Vec<GeocodedPlace>, WeatherError>;

    /// Places matching a name
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodedPlace>, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| WeatherError::ParseError(format!("Invalid timestamp: {secs}")))
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when no API key is set, or `ConnectionFailed`
    /// if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.trim().is_empty() {
            return Err(WeatherError::Configuration(
                "OpenWeatherMap API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// GET `path` with `params` plus the API key, decoding a JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.url(path);
        debug!(url = %url, "Calling OpenWeatherMap");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WeatherError::Unauthorized);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    fn coordinate_params(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("units", self.config.units.clone()),
        ]
    }

    fn parse_current(raw: ApiCurrentResponse) -> Result<CurrentConditions, WeatherError> {
        let description = primary_description(&raw.weather);
        Ok(CurrentConditions {
            name: raw.name,
            country: raw.sys.country,
            latitude: raw.coord.lat,
            longitude: raw.coord.lon,
            temperature: raw.main.temp,
            feels_like: raw.main.feels_like,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind_speed: raw.wind.as_ref().map_or(0.0, |w| w.speed),
            wind_direction: raw.wind.as_ref().and_then(|w| w.deg),
            visibility_m: raw.visibility,
            description,
            condition_id: raw.weather.first().and_then(|c| c.id),
            observed_at: timestamp(raw.dt)?,
            sunrise: raw.sys.sunrise.map(timestamp).transpose()?,
            sunset: raw.sys.sunset.map(timestamp).transpose()?,
            utc_offset_secs: raw.timezone,
        })
    }

    fn parse_forecast(raw: ApiForecastResponse) -> Result<Vec<ForecastStep>, WeatherError> {
        raw.list
            .into_iter()
            .map(|item| {
                Ok(ForecastStep {
                    time: timestamp(item.dt)?,
                    temperature: item.main.temp,
                    feels_like: item.main.feels_like,
                    humidity: item.main.humidity,
                    pressure: item.main.pressure,
                    wind_speed: item.wind.as_ref().map_or(0.0, |w| w.speed),
                    wind_direction: item.wind.as_ref().and_then(|w| w.deg),
                    description: primary_description(&item.weather),
                })
            })
            .collect()
    }

    fn parse_daily(raw: ApiDailyResponse) -> Result<Vec<DailyOutlook>, WeatherError> {
        raw.list
            .into_iter()
            .map(|item| {
                Ok(DailyOutlook {
                    date: timestamp(item.dt)?,
                    temp_min: item.temp.min,
                    temp_max: item.temp.max,
                    humidity: item.humidity,
                    wind_speed: item.wind_speed,
                    rain_mm: item.rain,
                    description: primary_description(&item.weather),
                })
            })
            .collect()
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        let params = self.coordinate_params(latitude, longitude);
        let raw: ApiCurrentResponse = self.get_json("/data/2.5/weather", &params).await?;
        Self::parse_current(raw)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastStep>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        let params = self.coordinate_params(latitude, longitude);
        let raw: ApiForecastResponse = self.get_json("/data/2.5/forecast", &params).await?;
        Self::parse_forecast(raw)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn get_daily(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DailyOutlook>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        let mut params = self.coordinate_params(latitude, longitude);
        params.push(("cnt", days.clamp(1, MAX_DAILY_DAYS).to_string()));
        let raw: ApiDailyResponse = self.get_json("/data/2.5/forecast/daily", &params).await?;
        Self::parse_daily(raw)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        limit: u8,
    ) -> Result<Vec<GeocodedPlace>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("limit", limit.max(1).to_string()),
        ];
        let raw: Vec<ApiGeocodeItem> = self.get_json("/geo/1.0/reverse", &params).await?;
        Ok(raw.into_iter().map(GeocodedPlace::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodedPlace>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let params = [("q", query.to_string()), ("limit", limit.max(1).to_string())];
        let raw: Vec<ApiGeocodeItem> = self.get_json("/geo/1.0/direct", &params).await?;
        Ok(raw.into_iter().map(GeocodedPlace::from).collect())
    }

    async fn is_healthy(&self) -> bool {
        // Centre of India
        self.get_current(20.5937, 78.9629).await.is_ok()
    }
}

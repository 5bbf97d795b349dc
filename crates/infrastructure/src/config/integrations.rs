//! External service configuration: OpenWeatherMap and Gemini.

use ai_core::InferenceConfig;
use application::TileSource;
use domain::GeoLocation;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ConfigError;

// ==============================
// Shared
// ==============================

/// Geographic location configuration (latitude/longitude pair)
///
/// Configured as inline table: `{ latitude = 20.59, longitude = 78.96 }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to a validated domain `GeoLocation`
    pub fn to_geo_location(&self, key: &str) -> Result<GeoLocation, ConfigError> {
        GeoLocation::new(self.latitude, self.longitude)
            .map_err(|e| ConfigError::Invalid(format!("{key}: {e}")))
    }
}

fn non_empty_secret<'a>(
    secret: Option<&'a SecretString>,
    key: &'static str,
) -> Result<&'a str, ConfigError> {
    secret
        .map(ExposeSecret::expose_secret)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingSecret(key))
}

// ==============================
// Weather
// ==============================

/// OpenWeatherMap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// OpenWeatherMap API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Data API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Weather map tiles base URL
    #[serde(default = "default_tiles_base_url")]
    pub tiles_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Number of daily forecast days (1-16)
    #[serde(default = "default_daily_days")]
    pub daily_days: u8,

    /// Maximum number of place search results (1-5)
    #[serde(default = "default_search_limit")]
    pub search_limit: u8,

    /// Coordinate used when no device fix or override is available
    #[serde(default)]
    pub default_location: Option<GeoLocationConfig>,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_tiles_base_url() -> String {
    "https://maps.openweathermap.org/maps/2.0".to_string()
}

const fn default_weather_timeout() -> u64 {
    30
}

const fn default_daily_days() -> u8 {
    16
}

const fn default_search_limit() -> u8 {
    5
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            tiles_base_url: default_tiles_base_url(),
            timeout_secs: default_weather_timeout(),
            daily_days: default_daily_days(),
            search_limit: default_search_limit(),
            default_location: None,
        }
    }
}

impl WeatherAppConfig {
    /// Client configuration with the API key injected
    pub fn client_config(&self) -> Result<integration_weather::WeatherConfig, ConfigError> {
        let api_key = non_empty_secret(self.api_key.as_ref(), "weather.api_key")?;
        Ok(integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            ..integration_weather::WeatherConfig::with_api_key(api_key)
        })
    }

    /// Where overlay tiles are fetched from
    pub fn tile_source(&self) -> Result<TileSource, ConfigError> {
        let api_key = non_empty_secret(self.api_key.as_ref(), "weather.api_key")?;
        Ok(TileSource {
            base_url: self.tiles_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Configured fallback coordinate, or the centre of India
    pub fn fallback_location(&self) -> Result<GeoLocation, ConfigError> {
        self.default_location
            .map_or(Ok(GeoLocation::india_center()), |loc| {
                loc.to_geo_location("weather.default_location")
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=16).contains(&self.daily_days) {
            return Err(ConfigError::Invalid(
                "weather.daily_days must be between 1 and 16".into(),
            ));
        }
        if !(1..=5).contains(&self.search_limit) {
            return Err(ConfigError::Invalid(
                "weather.search_limit must be between 1 and 5".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "weather.timeout_secs must be positive".into(),
            ));
        }
        self.fallback_location().map(|_| ())
    }
}

// ==============================
// Inference
// ==============================

/// Gemini advisory engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceAppConfig {
    /// Gemini API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_inference_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_inference_base_url() -> String {
    InferenceConfig::default().base_url
}

fn default_model() -> String {
    InferenceConfig::default().default_model
}

fn default_timeout_ms() -> u64 {
    InferenceConfig::default().timeout_ms
}

fn default_max_tokens() -> u32 {
    InferenceConfig::default().max_tokens
}

fn default_temperature() -> f32 {
    InferenceConfig::default().temperature
}

fn default_top_p() -> f32 {
    InferenceConfig::default().top_p
}

impl Default for InferenceAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_inference_base_url(),
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            system_prompt: None,
        }
    }
}

impl InferenceAppConfig {
    /// Engine configuration with the API key injected
    pub fn engine_config(&self) -> Result<InferenceConfig, ConfigError> {
        let api_key = non_empty_secret(self.api_key.as_ref(), "inference.api_key")?;
        Ok(InferenceConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            default_model: self.default_model.clone(),
            timeout_ms: self.timeout_ms,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            system_prompt: self.system_prompt.clone(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(
                "inference.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::Invalid(
                "inference.top_p must be between 0.0 and 1.0".into(),
            ));
        }
        if self.max_tokens == 0 || self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "inference.max_tokens and inference.timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: OpenWeatherMap and Gemini
//! - `dashboard`: device location, map overlay and logging
//!
//! Sources are layered: built-in defaults, then an optional `config.toml`
//! (or the file named by `AGRIQNET_CONFIG`), then `AGRIQNET_*` environment
//! variables using `__` between nested keys. `OPENWEATHER_API_KEY` and
//! `GEMINI_API_KEY` override the corresponding keys.

mod dashboard;
mod integrations;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use dashboard::{LocationAppConfig, LoggingConfig, MapAppConfig};
pub use integrations::{GeoLocationConfig, InferenceAppConfig, WeatherAppConfig};
pub use server::ServerConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "AGRIQNET";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "AGRIQNET_CONFIG";

const WEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";
const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required API key is absent
    #[error("Missing required secret `{0}`")]
    MissingSecret(&'static str),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub weather: WeatherAppConfig,

    #[serde(default)]
    pub inference: InferenceAppConfig,

    #[serde(default)]
    pub location: LocationAppConfig,

    #[serde(default)]
    pub map: MapAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `AGRIQNET_CONFIG` (or `./config.toml`) and environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref())
    }

    /// Load configuration using an explicit file, which must then exist
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. AGRIQNET_SERVER__PORT=8080, AGRIQNET_WEATHER__API_KEY=...
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("weather.api_key", std::env::var(WEATHER_KEY_ENV).ok())?
            .set_override_option("inference.api_key", std::env::var(GEMINI_KEY_ENV).ok())?;

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            host = %config.server.host,
            port = config.server.port,
            model = %config.inference.default_model,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Check value ranges across all sections
    ///
    /// Missing API keys are not an error here; they surface when the
    /// dependent adapter is constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.weather.validate()?;
        self.inference.validate()?;
        self.location.validate()?;
        self.map.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[allow(clippy::expect_used)]
    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn loads_sections_from_file() {
        let file = write_config(
            r#"
[server]
host = "0.0.0.0"
port = 8080

[weather]
base_url = "http://weather.local"
daily_days = 7
default_location = { latitude = 18.52, longitude = 73.85 }

[inference]
default_model = "gemini-2.5-pro"
temperature = 0.2

[location]
device_fix = { latitude = 28.61, longitude = 77.20 }

[map]
layer = "rainfall"
opacity = 0.8

[logging]
level = "debug"
json = true
"#,
        );

        let config = AppConfig::load_from(file.path().to_str()).unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.weather.base_url, "http://weather.local");
        assert_eq!(config.weather.daily_days, 7);
        assert_eq!(config.weather.search_limit, 5);
        let fallback = config.weather.fallback_location().unwrap();
        assert!((fallback.latitude() - 18.52).abs() < 1e-9);
        assert_eq!(config.inference.default_model, "gemini-2.5-pro");
        assert!((config.inference.temperature - 0.2).abs() < 1e-6);
        assert!(config.location.device_fix.is_some());
        assert_eq!(config.map.layer, domain::OverlayLayer::Rainfall);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn out_of_range_file_values_are_rejected() {
        let file = write_config("[map]\nopacity = 4.0\n");
        let err = AppConfig::load_from(file.path().to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load_from(Some("/nonexistent/agriqnet-config")).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let file = write_config("[server]\nport = \"not a port\"\n");
        let err = AppConfig::load_from(file.path().to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn missing_secret_message_names_the_key() {
        assert_eq!(
            ConfigError::MissingSecret("weather.api_key").to_string(),
            "Missing required secret `weather.api_key`"
        );
    }
}

//! Device location, map overlay and logging settings.

use domain::OverlayLayer;
use serde::{Deserialize, Serialize};

use super::{ConfigError, GeoLocationConfig};

/// Device location source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationAppConfig {
    /// Fixed device position reported by the location source.
    /// Without one, location requests report `Unavailable`.
    #[serde(default)]
    pub device_fix: Option<GeoLocationConfig>,
}

impl LocationAppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fix) = self.device_fix {
            fix.to_geo_location("location.device_fix")?;
        }
        Ok(())
    }
}

/// Initial weather map overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapAppConfig {
    #[serde(default)]
    pub layer: OverlayLayer,

    /// Overlay opacity (0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

const fn default_opacity() -> f32 {
    application::services::map_overlay::DEFAULT_OPACITY
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            layer: OverlayLayer::default(),
            opacity: default_opacity(),
        }
    }
}

impl MapAppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid(
                "map.opacity must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "agriqnet=debug,tower_http=info"
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

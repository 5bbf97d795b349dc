//! Location source backed by a configured device fix

use application::ports::{LocationError, LocationPort};
use async_trait::async_trait;
use domain::GeoLocation;
use tracing::debug;

use crate::config::{ConfigError, LocationAppConfig};

/// Reports a fixed position, or `Unavailable` when none is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredLocationSource {
    fix: Option<GeoLocation>,
}

impl ConfiguredLocationSource {
    #[must_use]
    pub const fn new(fix: Option<GeoLocation>) -> Self {
        Self { fix }
    }

    /// Build from the `[location]` config section
    pub fn from_config(config: &LocationAppConfig) -> Result<Self, ConfigError> {
        let fix = config
            .device_fix
            .map(|fix| fix.to_geo_location("location.device_fix"))
            .transpose()?;
        Ok(Self::new(fix))
    }
}

#[async_trait]
impl LocationPort for ConfiguredLocationSource {
    async fn current_position(&self) -> Result<GeoLocation, LocationError> {
        debug!(configured = self.fix.is_some(), "Device position requested");
        self.fix.ok_or_else(|| {
            LocationError::Unavailable("no device position configured".to_string())
        })
    }
}

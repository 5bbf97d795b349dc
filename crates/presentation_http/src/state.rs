//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{
    AdvisoryService, ApplicationError, DashboardService, HealthService, LocationService,
    MapOverlayController, OverlaySettings,
    ports::{InferencePort, LocationPort, WeatherPort},
};
use infrastructure::{
    AppConfig, ConfigError, ConfiguredLocationSource, GeminiInferenceAdapter, WeatherAdapter,
};
use thiserror::Error;
use tracing::info;

/// Failure while wiring adapters from configuration
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Adapter setup failed: {0}")]
    Adapter(#[from] ApplicationError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Weather datasets, snapshot and location selection
    pub dashboard: Arc<DashboardService>,
    /// Per-category advisory panels
    pub advisory: Arc<AdvisoryService>,
    /// Map overlay settings and tile descriptors
    pub map_overlay: Arc<MapOverlayController>,
    /// Dependency reachability
    pub health: Arc<HealthService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("dashboard", &self.dashboard)
            .field("advisory", &self.advisory)
            .field("map_overlay", &self.map_overlay.settings())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Assemble state from already-built ports
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        inference: Arc<dyn InferencePort>,
        location: Arc<LocationService>,
        map_overlay: MapOverlayController,
    ) -> Self {
        Self {
            dashboard: Arc::new(DashboardService::new(Arc::clone(&weather), location)),
            advisory: Arc::new(AdvisoryService::new(Arc::clone(&inference))),
            map_overlay: Arc::new(map_overlay),
            health: Arc::new(HealthService::new(weather, inference)),
        }
    }

    /// Replace the dashboard service, e.g. to apply configured limits
    #[must_use]
    pub fn with_dashboard(mut self, dashboard: DashboardService) -> Self {
        self.dashboard = Arc::new(dashboard);
        self
    }

    /// Build the OpenWeatherMap and Gemini adapters from `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let weather: Arc<dyn WeatherPort> =
            Arc::new(WeatherAdapter::new(config.weather.client_config()?)?);
        let inference: Arc<dyn InferencePort> =
            Arc::new(GeminiInferenceAdapter::new(config.inference.engine_config()?)?);

        let source: Arc<dyn LocationPort> =
            Arc::new(ConfiguredLocationSource::from_config(&config.location)?);
        let location = Arc::new(LocationService::with_fallback(
            source,
            config.weather.fallback_location()?,
        ));

        let map_overlay = MapOverlayController::with_settings(
            config.weather.tile_source()?,
            OverlaySettings {
                layer: config.map.layer,
                opacity: config.map.opacity,
                hour_offset: 0,
            },
        );

        let dashboard = DashboardService::new(Arc::clone(&weather), Arc::clone(&location))
            .with_daily_days(config.weather.daily_days)
            .with_search_limit(config.weather.search_limit);

        info!(
            daily_days = config.weather.daily_days,
            model = %inference.current_model(),
            "Application state initialized"
        );

        Ok(Self::new(weather, inference, location, map_overlay).with_dashboard(dashboard))
    }
}

#[cfg(test)]
mod tests {
    use infrastructure::{InferenceAppConfig, WeatherAppConfig};

    use super::*;

    #[test]
    fn from_config_requires_weather_key() {
        let err = AppState::from_config(&AppConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Config(ConfigError::MissingSecret("weather.api_key"))
        ));
    }

    #[test]
    fn from_config_requires_inference_key() {
        let config = AppConfig {
            weather: WeatherAppConfig {
                api_key: Some("owm-key".to_string().into()),
                ..Default::default()
            },
            inference: InferenceAppConfig::default(),
            ..Default::default()
        };
        let err = AppState::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Config(ConfigError::MissingSecret("inference.api_key"))
        ));
    }

    #[tokio::test]
    async fn from_config_wires_services() {
        let config = AppConfig {
            weather: WeatherAppConfig {
                api_key: Some("owm-key".to_string().into()),
                ..Default::default()
            },
            inference: InferenceAppConfig {
                api_key: Some("gem-key".to_string().into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert!((state.map_overlay.settings().opacity - 0.6).abs() < f32::EPSILON);
        assert!(format!("{state:?}").contains("AppState"));
    }
}

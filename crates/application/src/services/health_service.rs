//! Readiness checks for the external services the dashboard depends on

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{InferencePort, WeatherPort};

const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Timeout applied to each individual check, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const fn default_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

/// Status of an individual service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub healthy: bool,
    /// Additional information such as the model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            healthy: true,
            info: None,
            response_time_ms: None,
            error: None,
        }
    }

    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Health of every dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True when every service is healthy
    pub healthy: bool,
    pub services: HashMap<String, ServiceHealth>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let healthy = services.values().all(|s| s.healthy);
        Self {
            healthy,
            services,
            checked_at: chrono::Utc::now(),
        }
    }
}

/// Checks the weather provider and the advisory model
pub struct HealthService {
    config: HealthConfig,
    weather: Arc<dyn WeatherPort>,
    inference: Arc<dyn InferencePort>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl HealthService {
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, inference: Arc<dyn InferencePort>) -> Self {
        Self {
            config: HealthConfig::default(),
            weather,
            inference,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Check all dependencies concurrently
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (weather, inference) = tokio::join!(self.check_weather(), self.check_inference());
        let mut services = HashMap::new();
        services.insert("weather".to_string(), weather);
        services.insert("inference".to_string(), inference);
        HealthReport::new(services)
    }

    #[instrument(skip(self))]
    pub async fn check_weather(&self) -> ServiceHealth {
        let start = Instant::now();
        match timeout(self.check_timeout(), self.weather.is_available()).await {
            Ok(true) => {
                let ms = elapsed_ms(start);
                debug!(response_time_ms = ms, "Weather provider healthy");
                ServiceHealth::healthy().with_response_time(ms)
            },
            Ok(false) => {
                let ms = elapsed_ms(start);
                warn!(response_time_ms = ms, "Weather provider unavailable");
                ServiceHealth::unhealthy("Weather provider unavailable").with_response_time(ms)
            },
            Err(_) => {
                warn!("Weather health check timed out");
                ServiceHealth::timeout()
            },
        }
    }

    #[instrument(skip(self))]
    pub async fn check_inference(&self) -> ServiceHealth {
        let start = Instant::now();
        match timeout(self.check_timeout(), self.inference.is_healthy()).await {
            Ok(true) => {
                let ms = elapsed_ms(start);
                let model = self.inference.current_model();
                debug!(model = %model, response_time_ms = ms, "Inference healthy");
                ServiceHealth::healthy()
                    .with_info(model)
                    .with_response_time(ms)
            },
            Ok(false) => {
                let ms = elapsed_ms(start);
                warn!(response_time_ms = ms, "Inference unhealthy");
                ServiceHealth::unhealthy("Inference engine reports unhealthy")
                    .with_response_time(ms)
            },
            Err(_) => {
                warn!("Inference health check timed out");
                ServiceHealth::timeout()
            },
        }
    }
}

//! Weather service port
//!
//! Defines the interface for weather, forecast and geocoding retrieval.

use async_trait::async_trait;
use domain::{CurrentReading, DailyForecastEntry, GeoLocation, Place, ShortRangeForecastEntry};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current conditions for a location
    async fn current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentReading, ApplicationError>;

    /// Get the 3-hourly forecast covering roughly the next five days
    async fn short_range_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ShortRangeForecastEntry>, ApplicationError>;

    /// Get the daily forecast
    ///
    /// # Arguments
    /// * `location` - Geographic location
    /// * `days` - Number of days to forecast (provider maximum is 16)
    async fn daily_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<DailyForecastEntry>, ApplicationError>;

    /// Resolve the closest named place for a coordinate
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<Place>, ApplicationError>;

    /// Search places by free-text name
    async fn search_places(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<Place>, ApplicationError>;

    /// Check if the weather service is available
    async fn is_available(&self) -> bool;
}

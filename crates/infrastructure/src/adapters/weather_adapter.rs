//! Weather adapter - Implements WeatherPort using integration_weather

use application::{error::ApplicationError, ports::WeatherPort};
use async_trait::async_trait;
use domain::{
    CurrentReading, DailyForecastEntry, DomainError, GeoLocation, Humidity, Place,
    ShortRangeForecastEntry,
};
use integration_weather::{
    CurrentConditions, DailyOutlook, ForecastStep, GeocodedPlace, OpenWeatherClient,
    WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument, warn};

/// Adapter for the OpenWeatherMap data and geocoding APIs
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherClient,
}

impl WeatherAdapter {
    /// Create an adapter from client configuration (API key included)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is missing or the HTTP
    /// client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Unexpected weather response: {e}"))
            },
            WeatherError::InvalidCoordinates => ApplicationError::Domain(
                DomainError::ValidationError("Invalid coordinates".into()),
            ),
            WeatherError::Configuration(e) => ApplicationError::Configuration(e),
            WeatherError::Unauthorized => {
                ApplicationError::Configuration("Weather API key rejected".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    fn map_current(current: CurrentConditions) -> CurrentReading {
        CurrentReading {
            location_name: current.name,
            country: current.country,
            temperature: current.temperature,
            feels_like: current.feels_like,
            humidity: Humidity::clamped(current.humidity),
            pressure: current.pressure,
            wind_speed: current.wind_speed,
            wind_direction: current.wind_direction,
            visibility_m: current.visibility_m,
            description: current.description,
            observed_at: current.observed_at,
            sunrise: current.sunrise,
            sunset: current.sunset,
            utc_offset_secs: current.utc_offset_secs,
        }
    }

    fn map_step(step: ForecastStep) -> ShortRangeForecastEntry {
        ShortRangeForecastEntry {
            timestamp: step.time,
            temperature: step.temperature,
            feels_like: step.feels_like,
            humidity: Humidity::clamped(step.humidity),
            pressure: step.pressure,
            wind_speed: step.wind_speed,
            wind_direction: step.wind_direction,
            description: step.description,
        }
    }

    fn map_daily(day: DailyOutlook) -> DailyForecastEntry {
        DailyForecastEntry {
            timestamp: day.date,
            temp_min: day.temp_min,
            temp_max: day.temp_max,
            humidity: Humidity::clamped(day.humidity),
            wind_speed: day.wind_speed,
            rain_mm: day.rain_mm,
            description: day.description,
        }
    }

    /// Provider places with out-of-range coordinates are dropped
    fn map_place(place: GeocodedPlace) -> Option<Place> {
        match GeoLocation::new(place.latitude, place.longitude) {
            Ok(location) => Some(Place {
                name: place.name,
                state: place.state.filter(|s| !s.is_empty()),
                country: place.country,
                location,
            }),
            Err(e) => {
                warn!(name = %place.name, error = %e, "Dropping geocoded place");
                None
            },
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentReading, ApplicationError> {
        let current = self
            .client
            .get_current(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        debug!(
            temperature = current.temperature,
            name = %current.name,
            "Retrieved current conditions"
        );
        Ok(Self::map_current(current))
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn short_range_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ShortRangeForecastEntry>, ApplicationError> {
        let steps = self
            .client
            .get_forecast(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        debug!(steps = steps.len(), "Retrieved 3-hourly forecast");
        Ok(steps.into_iter().map(Self::map_step).collect())
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), days))]
    async fn daily_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<DailyForecastEntry>, ApplicationError> {
        let daily = self
            .client
            .get_daily(location.latitude(), location.longitude(), days)
            .await
            .map_err(Self::map_error)?;

        debug!(days = daily.len(), "Retrieved daily forecast");
        Ok(daily.into_iter().map(Self::map_daily).collect())
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<Place>, ApplicationError> {
        let places = self
            .client
            .reverse_geocode(location.latitude(), location.longitude(), 1)
            .await
            .map_err(Self::map_error)?;

        Ok(places.into_iter().find_map(Self::map_place))
    }

    #[instrument(skip(self))]
    async fn search_places(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<Place>, ApplicationError> {
        let places = self
            .client
            .search(query, limit)
            .await
            .map_err(Self::map_error)?;

        debug!(results = places.len(), "Place search completed");
        Ok(places.into_iter().filter_map(Self::map_place).collect())
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

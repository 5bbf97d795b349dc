//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap APIs (<https://openweathermap.org/api>):
//! current conditions, the 3-hourly and daily forecasts, and geocoding.
//! Every request requires an API key.

pub mod client;
mod models;

pub use client::{MAX_DAILY_DAYS, OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{CurrentConditions, DailyOutlook, ForecastStep, GeocodedPlace};

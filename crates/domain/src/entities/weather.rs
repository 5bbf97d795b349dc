//! Weather readings as delivered by the provider
//!
//! Three independent datasets exist for a coordinate: the current reading,
//! the 3-hourly short-range forecast (about five days) and the daily
//! long-range forecast (up to sixteen days). All temperatures are °C,
//! pressure is hPa and wind speed is m/s.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Humidity;

/// Point-in-time conditions at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    /// Station or city name reported by the provider
    pub location_name: String,
    /// ISO country code
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: Humidity,
    pub pressure: f64,
    pub wind_speed: f64,
    /// Meteorological wind direction in degrees
    pub wind_direction: Option<u16>,
    /// Visibility in meters
    pub visibility_m: Option<u32>,
    pub description: String,
    pub observed_at: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Shift from UTC reported for the location, in seconds
    #[serde(default)]
    pub utc_offset_secs: i32,
}

/// One 3-hour step of the short-range forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortRangeForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: Humidity,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: Option<u16>,
    pub description: String,
}

/// One calendar day of the long-range forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: Humidity,
    pub wind_speed: Option<f64>,
    /// Rainfall in mm, absent when the provider reports none
    pub rain_mm: Option<f64>,
    pub description: String,
}

/// Converts a wind bearing in degrees to one of eight compass points
#[must_use]
pub fn compass_point(degrees: u16) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = f64::from(degrees % 360);
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % POINTS.len();
    POINTS[sector]
}

impl CurrentReading {
    /// Wind direction as a compass point, if reported
    #[must_use]
    pub fn wind_compass(&self) -> Option<&'static str> {
        self.wind_direction.map(compass_point)
    }

    /// Local offset of the reading, UTC when the provider value is out of range
    #[must_use]
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }

    /// Visibility in kilometres with one decimal of precision
    #[must_use]
    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_m
            .map(|meters| (f64::from(meters) / 100.0).round() / 10.0)
    }
}

//! Unified "as-of" weather view
//!
//! A snapshot is derived from exactly one source: the current reading or a
//! single short-range forecast entry. Sources are never blended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weather::{CurrentReading, ShortRangeForecastEntry};
use crate::value_objects::Humidity;

/// Placeholder shown for metrics the selected source does not carry
pub const UNAVAILABLE_PLACEHOLDER: &str = "-";

/// Where a snapshot's values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotSource {
    Current,
    Forecast { index: usize },
}

/// Dew point approximation: `t - (100 - rh) / 5`, rounded to one decimal
#[must_use]
pub fn approximate_dew_point(temperature: f64, humidity: Humidity) -> f64 {
    round_one_decimal(temperature - f64::from(humidity.deficit()) / 5.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Metrics for one location at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: Humidity,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloud_description: String,
    pub dew_point: f64,
    /// Only known for the current reading
    pub visibility_km: Option<f64>,
    pub valid_at: DateTime<Utc>,
    pub source: SnapshotSource,
}

/// Pre-formatted snapshot values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotDisplay {
    pub temperature: String,
    pub humidity: String,
    pub pressure: String,
    pub clouds: String,
    pub wind: String,
    pub dew_point: String,
    pub visibility: String,
}

impl WeatherSnapshot {
    /// Snapshot of the current reading
    #[must_use]
    pub fn from_current(current: &CurrentReading) -> Self {
        Self {
            temperature: current.temperature,
            humidity: current.humidity,
            pressure: current.pressure,
            wind_speed: current.wind_speed,
            cloud_description: current.description.clone(),
            dew_point: approximate_dew_point(current.temperature, current.humidity),
            visibility_km: current.visibility_km(),
            valid_at: current.observed_at,
            source: SnapshotSource::Current,
        }
    }

    /// Snapshot of the forecast entry at `index`
    #[must_use]
    pub fn from_forecast(entry: &ShortRangeForecastEntry, index: usize) -> Self {
        Self {
            temperature: entry.temperature,
            humidity: entry.humidity,
            pressure: entry.pressure,
            wind_speed: entry.wind_speed,
            cloud_description: entry.description.clone(),
            dew_point: approximate_dew_point(entry.temperature, entry.humidity),
            visibility_km: None,
            valid_at: entry.timestamp,
            source: SnapshotSource::Forecast { index },
        }
    }

    /// Formats every metric for display
    #[must_use]
    pub fn display(&self) -> SnapshotDisplay {
        SnapshotDisplay {
            temperature: format!("{}°C", self.temperature),
            humidity: self.humidity.to_string(),
            pressure: format!("{} hPa", self.pressure),
            clouds: self.cloud_description.clone(),
            wind: format!("{} m/s", self.wind_speed),
            dew_point: format!("{:.1}°C", self.dew_point),
            visibility: self.visibility_km.map_or_else(
                || UNAVAILABLE_PLACEHOLDER.to_string(),
                |km| format!("{km:.1} km"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(value: u8) -> Humidity {
        Humidity::new(value).unwrap()
    }

    #[test]
    fn dew_point_example() {
        assert!((approximate_dew_point(30.0, h(60)) - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dew_point_saturated_equals_temperature() {
        assert!((approximate_dew_point(18.4, h(100)) - 18.4).abs() < 1e-9);
    }

    #[test]
    fn dew_point_rounds_to_one_decimal() {
        // 25.37 - 43/5 = 16.77
        assert!((approximate_dew_point(25.37, h(57)) - 16.8).abs() < 1e-9);
    }

    #[test]
    fn display_formats_metrics() {
        let snapshot = WeatherSnapshot {
            temperature: 30.0,
            humidity: h(60),
            pressure: 1012.0,
            wind_speed: 3.5,
            cloud_description: "light rain".to_string(),
            dew_point: 22.0,
            visibility_km: Some(10.0),
            valid_at: DateTime::from_timestamp(0, 0).unwrap(),
            source: SnapshotSource::Current,
        };
        let display = snapshot.display();
        assert_eq!(display.temperature, "30°C");
        assert_eq!(display.humidity, "60%");
        assert_eq!(display.pressure, "1012 hPa");
        assert_eq!(display.clouds, "light rain");
        assert_eq!(display.wind, "3.5 m/s");
        assert_eq!(display.dew_point, "22.0°C");
        assert_eq!(display.visibility, "10.0 km");
    }

    #[test]
    fn forecast_snapshot_has_no_visibility() {
        let entry = ShortRangeForecastEntry {
            timestamp: DateTime::from_timestamp(1_700_010_800, 0).unwrap(),
            temperature: 27.5,
            feels_like: 28.0,
            humidity: h(70),
            pressure: 1010.0,
            wind_speed: 2.1,
            wind_direction: None,
            description: "overcast clouds".to_string(),
        };
        let snapshot = WeatherSnapshot::from_forecast(&entry, 3);
        assert_eq!(snapshot.source, SnapshotSource::Forecast { index: 3 });
        assert_eq!(snapshot.visibility_km, None);
        assert_eq!(snapshot.display().visibility, UNAVAILABLE_PLACEHOLDER);
        assert!((snapshot.dew_point - 21.5).abs() < 1e-9);
    }
}

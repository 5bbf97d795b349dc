//! Display rows for the forecast panels
//!
//! Turns provider datasets into ready-to-render strings. Row order always
//! follows the provider's chronological order.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use domain::{CurrentReading, DailyForecastEntry, ShortRangeForecastEntry};
use serde::{Deserialize, Serialize};

/// One day of the long-range forecast, formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// `Today`, `Tomorrow`, or the abbreviated weekday
    pub label: String,
    /// e.g. `Jan 5`
    pub date_label: String,
    pub description: String,
    pub temp_min: String,
    pub temp_max: String,
    pub humidity: String,
    pub wind: Option<String>,
    pub rain: Option<String>,
}

/// One step of the hourly temperature strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: String,
    pub temperature: String,
    pub description: String,
}

/// Current conditions card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentDetails {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: String,
    pub visibility: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Rounds half-way values toward positive infinity
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn degrees(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

fn row_label(index: usize, date: &DateTime<FixedOffset>) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a").to_string(),
    }
}

/// Formats daily entries using UTC calendar dates
#[must_use]
pub fn present_daily(entries: &[DailyForecastEntry]) -> Vec<DisplayRow> {
    present_daily_at(entries, Utc.fix())
}

/// Formats daily entries using the calendar of `offset`
#[must_use]
pub fn present_daily_at(entries: &[DailyForecastEntry], offset: FixedOffset) -> Vec<DisplayRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let local = entry.timestamp.with_timezone(&offset);
            DisplayRow {
                label: row_label(index, &local),
                date_label: local.format("%b %-d").to_string(),
                description: entry.description.clone(),
                temp_min: degrees(entry.temp_min),
                temp_max: degrees(entry.temp_max),
                humidity: entry.humidity.relative_display(),
                wind: entry.wind_speed.map(|speed| format!("{speed:.1} m/s")),
                rain: entry.rain_mm.map(|mm| format!("Rain: {mm:.1} mm")),
            }
        })
        .collect()
}

/// First `limit` short-range entries as an hourly temperature strip
#[must_use]
pub fn present_hourly(
    entries: &[ShortRangeForecastEntry],
    limit: usize,
    offset: FixedOffset,
) -> Vec<HourlyPoint> {
    entries
        .iter()
        .take(limit)
        .map(|entry| HourlyPoint {
            time: entry.timestamp.with_timezone(&offset).format("%H:%M").to_string(),
            temperature: degrees(entry.temperature),
            description: entry.description.clone(),
        })
        .collect()
}

/// Formats the current conditions card in the reading's local time
#[must_use]
pub fn present_current(current: &CurrentReading) -> CurrentDetails {
    let offset = current.local_offset();
    let clock = |at: DateTime<Utc>| at.with_timezone(&offset).format("%H:%M").to_string();
    let wind = match current.wind_compass() {
        Some(point) => format!("{} m/s {point}", current.wind_speed),
        None => format!("{} m/s", current.wind_speed),
    };

    CurrentDetails {
        location_name: current.location_name.clone(),
        country: current.country.clone(),
        temperature: format!("{}°C", current.temperature),
        feels_like: format!("{}°C", current.feels_like),
        description: current.description.clone(),
        humidity: current.humidity.to_string(),
        pressure: format!("{} hPa", current.pressure),
        wind,
        visibility: current.visibility_km().map_or_else(
            || domain::UNAVAILABLE_PLACEHOLDER.to_string(),
            |km| format!("{km:.1} km"),
        ),
        sunrise: current.sunrise.map(clock),
        sunset: current.sunset.map(clock),
    }
}

//! Snapshot aggregation
//!
//! Selects the record that answers "what will it be like in N hours" and
//! turns it into a [`WeatherSnapshot`]. Offset 0 reads the current
//! conditions, any other offset reads one 3-hour forecast step.

use domain::{CurrentReading, Humidity, ShortRangeForecastEntry, WeatherSnapshot};

/// Hours between two short-range forecast entries
pub const FORECAST_STEP_HOURS: u32 = 3;

/// Number of humidity values used as the rainfall trend proxy
pub const RAIN_PROXY_POINTS: usize = 5;

/// Index of the forecast entry for `hour_offset`, clamped to the last entry.
///
/// Returns `None` only when there are no entries.
#[must_use]
pub fn forecast_index(hour_offset: u32, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let step = (hour_offset / FORECAST_STEP_HOURS) as usize;
    Some(step.min(last))
}

/// Builds the snapshot for `hour_offset` hours from now.
///
/// Falls back to the current reading when the offset is zero or no forecast
/// entries exist. Offsets past the forecast horizon use the last entry.
#[must_use]
pub fn build_snapshot(
    current: &CurrentReading,
    forecast: &[ShortRangeForecastEntry],
    hour_offset: u32,
) -> WeatherSnapshot {
    if hour_offset == 0 {
        return WeatherSnapshot::from_current(current);
    }
    match forecast_index(hour_offset, forecast.len()) {
        Some(index) => WeatherSnapshot::from_forecast(&forecast[index], index),
        None => WeatherSnapshot::from_current(current),
    }
}

/// Humidity values of the forecast entries nearest to `hour_offset`.
///
/// Starts at the selected entry and takes up to [`RAIN_PROXY_POINTS`]
/// consecutive values.
#[must_use]
pub fn rain_proxy_series(forecast: &[ShortRangeForecastEntry], hour_offset: u32) -> Vec<Humidity> {
    let Some(start) = forecast_index(hour_offset, forecast.len()) else {
        return Vec::new();
    };
    forecast[start..]
        .iter()
        .take(RAIN_PROXY_POINTS)
        .map(|entry| entry.humidity)
        .collect()
}

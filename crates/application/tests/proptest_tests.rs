//! Property-based tests for snapshot selection and forecast presentation

use application::{build_snapshot, forecast_index, present_daily, rain_proxy_series};
use chrono::DateTime;
use domain::{
    CurrentReading, DailyForecastEntry, Humidity, ShortRangeForecastEntry, SnapshotSource,
};
use proptest::prelude::*;

fn current(temperature: f64, humidity: u8) -> CurrentReading {
    CurrentReading {
        location_name: "Raipur".to_string(),
        country: Some("IN".to_string()),
        temperature,
        feels_like: temperature,
        humidity: Humidity::clamped(humidity),
        pressure: 1010.0,
        wind_speed: 2.0,
        wind_direction: None,
        visibility_m: Some(9_000),
        description: "mist".to_string(),
        observed_at: DateTime::from_timestamp(1_704_456_000, 0).unwrap(),
        sunrise: None,
        sunset: None,
        utc_offset_secs: 0,
    }
}

fn forecast(len: usize) -> Vec<ShortRangeForecastEntry> {
    (0..len)
        .map(|i| ShortRangeForecastEntry {
            timestamp: DateTime::from_timestamp(1_704_456_000 + i as i64 * 10_800, 0).unwrap(),
            temperature: i as f64,
            feels_like: i as f64,
            humidity: Humidity::clamped((i % 101) as u8),
            pressure: 1000.0,
            wind_speed: 1.0,
            wind_direction: None,
            description: format!("entry {i}"),
        })
        .collect()
}

fn daily(len: usize, rain: Option<f64>) -> Vec<DailyForecastEntry> {
    (0..len)
        .map(|i| DailyForecastEntry {
            timestamp: DateTime::from_timestamp(1_704_456_000 + i as i64 * 86_400, 0).unwrap(),
            temp_min: 10.0,
            temp_max: 20.0,
            humidity: Humidity::clamped(50),
            wind_speed: None,
            rain_mm: rain,
            description: "clear".to_string(),
        })
        .collect()
}

// ============================================================================
// Forecast Index Property Tests
// ============================================================================

proptest! {
    #[test]
    fn index_always_in_bounds(hours in any::<u32>(), len in 1usize..64) {
        let index = forecast_index(hours, len).unwrap();
        prop_assert!(index < len);
        prop_assert_eq!(index, ((hours / 3) as usize).min(len - 1));
    }

    #[test]
    fn snapshot_source_matches_offset(hours in 0u32..200, len in 0usize..48) {
        let entries = forecast(len);
        let snapshot = build_snapshot(&current(30.0, 60), &entries, hours);
        if hours == 0 || len == 0 {
            prop_assert_eq!(snapshot.source, SnapshotSource::Current);
            prop_assert!(snapshot.visibility_km.is_some());
        } else {
            let expected = ((hours / 3) as usize).min(len - 1);
            prop_assert_eq!(snapshot.source, SnapshotSource::Forecast { index: expected });
            prop_assert!(snapshot.visibility_km.is_none());
        }
    }

    #[test]
    fn rain_proxy_never_exceeds_five(hours in 0u32..200, len in 0usize..48) {
        let series = rain_proxy_series(&forecast(len), hours);
        prop_assert!(series.len() <= 5);
        prop_assert_eq!(series.is_empty(), len == 0);
    }
}

// ============================================================================
// Dew Point Property Tests
// ============================================================================

proptest! {
    #[test]
    fn current_dew_point_has_one_decimal(temp in -30.0f64..50.0, rh in 0u8..=100) {
        let snapshot = build_snapshot(&current(temp, rh), &[], 0);
        let scaled = snapshot.dew_point * 10.0;
        prop_assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}

// ============================================================================
// Forecast Presenter Property Tests
// ============================================================================

proptest! {
    #[test]
    fn one_row_per_entry_with_fixed_leading_labels(len in 0usize..17) {
        let rows = present_daily(&daily(len, None));
        prop_assert_eq!(rows.len(), len);
        if len > 0 {
            prop_assert_eq!(rows[0].label.as_str(), "Today");
        }
        if len > 1 {
            prop_assert_eq!(rows[1].label.as_str(), "Tomorrow");
        }
        for row in rows.iter().skip(2) {
            prop_assert_eq!(row.label.len(), 3);
        }
    }

    #[test]
    fn rain_badge_iff_defined(len in 1usize..17, rain in proptest::option::of(0.0f64..500.0)) {
        let rows = present_daily(&daily(len, rain));
        for row in rows {
            prop_assert_eq!(row.rain.is_some(), rain.is_some());
            prop_assert!(row.wind.is_none());
        }
    }
}

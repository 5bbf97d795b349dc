//! Weather map overlay
//!
//! Holds the selected tile layer, opacity and forecast hour, and derives the
//! tile URL template handed to the map renderer.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use domain::OverlayLayer;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Forecast hour presets offered by the time slider
pub const HOUR_PRESETS: [u32; 9] = [0, 3, 6, 12, 24, 36, 48, 72, 96];

pub const DEFAULT_OPACITY: f32 = 0.6;

pub const BASE_MAP_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Where overlay tiles are served from
#[derive(Clone)]
pub struct TileSource {
    /// e.g. `https://maps.openweathermap.org/maps/2.0`
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileSource")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// User-selected overlay settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub layer: OverlayLayer,
    pub opacity: f32,
    pub hour_offset: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            layer: OverlayLayer::default(),
            opacity: DEFAULT_OPACITY,
            hour_offset: 0,
        }
    }
}

/// Everything a map renderer needs to draw the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayTile {
    pub layer: OverlayLayer,
    pub layer_code: String,
    pub layer_name: String,
    pub hour_offset: u32,
    pub opacity: f32,
    /// Overlay tile template with `{z}/{x}/{y}` placeholders
    pub url_template: String,
    /// Forecast date stamp, absent for current conditions
    pub date_stamp: Option<String>,
    pub base_map_url: String,
}

/// `YYYYMMDD` of `now + hour_offset` hours
#[must_use]
pub fn forecast_date_stamp(now: DateTime<Utc>, hour_offset: u32) -> String {
    (now + Duration::hours(i64::from(hour_offset)))
        .format("%Y%m%d")
        .to_string()
}

/// Clamps opacity to [0, 1], mapping NaN to the default
#[must_use]
pub fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        DEFAULT_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Stateful overlay controller
pub struct MapOverlayController {
    source: TileSource,
    settings: RwLock<OverlaySettings>,
}

impl fmt::Debug for MapOverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOverlayController")
            .field("source", &self.source)
            .field("settings", &*self.settings.read())
            .finish()
    }
}

impl MapOverlayController {
    #[must_use]
    pub fn new(source: TileSource) -> Self {
        Self::with_settings(source, OverlaySettings::default())
    }

    #[must_use]
    pub fn with_settings(source: TileSource, settings: OverlaySettings) -> Self {
        let settings = OverlaySettings {
            opacity: clamp_opacity(settings.opacity),
            ..settings
        };
        Self {
            source,
            settings: RwLock::new(settings),
        }
    }

    #[must_use]
    pub fn settings(&self) -> OverlaySettings {
        *self.settings.read()
    }

    pub fn select_layer(&self, layer: OverlayLayer) {
        self.settings.write().layer = layer;
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.settings.write().opacity = clamp_opacity(opacity);
    }

    pub fn set_hour_offset(&self, hour_offset: u32) {
        self.settings.write().hour_offset = hour_offset;
    }

    /// Tile URL template for `layer` at `hour_offset` hours from `now`.
    ///
    /// Offset 0 uses the current-conditions tiles. Any other offset uses the
    /// forecast tiles and carries the target date.
    #[must_use]
    pub fn tile_url(&self, layer: OverlayLayer, hour_offset: u32, now: DateTime<Utc>) -> String {
        let kind = if hour_offset == 0 { "weather" } else { "forecast" };
        let mut url = format!(
            "{}/{kind}/{}/{{z}}/{{x}}/{{y}}?appid={}",
            self.source.base_url.trim_end_matches('/'),
            layer.code(),
            self.source.api_key
        );
        if hour_offset != 0 {
            url.push_str("&date=");
            url.push_str(&forecast_date_stamp(now, hour_offset));
        }
        url
    }

    /// Replaces the stored settings
    pub fn apply(&self, settings: OverlaySettings) {
        *self.settings.write() = OverlaySettings {
            opacity: clamp_opacity(settings.opacity),
            ..settings
        };
    }

    /// Overlay descriptor for the stored settings
    #[must_use]
    pub fn current_tile(&self, now: DateTime<Utc>) -> OverlayTile {
        self.tile_for(self.settings(), now)
    }

    /// Overlay descriptor for `settings`, leaving the stored ones untouched
    #[must_use]
    pub fn tile_for(&self, settings: OverlaySettings, now: DateTime<Utc>) -> OverlayTile {
        let settings = OverlaySettings {
            opacity: clamp_opacity(settings.opacity),
            ..settings
        };
        OverlayTile {
            layer: settings.layer,
            layer_code: settings.layer.code().to_string(),
            layer_name: settings.layer.display_name().to_string(),
            hour_offset: settings.hour_offset,
            opacity: settings.opacity,
            url_template: self.tile_url(settings.layer, settings.hour_offset, now),
            date_stamp: (settings.hour_offset != 0)
                .then(|| forecast_date_stamp(now, settings.hour_offset)),
            base_map_url: BASE_MAP_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> MapOverlayController {
        MapOverlayController::new(TileSource {
            base_url: "https://maps.openweathermap.org/maps/2.0/".to_string(),
            api_key: "KEY".to_string(),
        })
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn current_tiles_have_no_date() {
        let url = controller().tile_url(OverlayLayer::Temperature, 0, at("2024-03-10T10:00:00Z"));
        assert_eq!(
            url,
            "https://maps.openweathermap.org/maps/2.0/weather/TA2/{z}/{x}/{y}?appid=KEY"
        );
    }

    #[test]
    fn forecast_tiles_carry_date_stamp() {
        let url = controller().tile_url(OverlayLayer::Rainfall, 24, at("2024-03-10T10:00:00Z"));
        assert_eq!(
            url,
            "https://maps.openweathermap.org/maps/2.0/forecast/PR0/{z}/{x}/{y}?appid=KEY&date=20240311"
        );
    }

    #[test]
    fn date_stamp_crosses_month_and_year() {
        assert_eq!(forecast_date_stamp(at("2024-12-31T20:00:00Z"), 6), "20250101");
        assert_eq!(forecast_date_stamp(at("2024-02-28T23:00:00Z"), 3), "20240229");
        assert_eq!(forecast_date_stamp(at("2024-02-28T23:00:00Z"), 96).len(), 8);
    }

    #[test]
    fn defaults_match_presets() {
        let settings = controller().settings();
        assert_eq!(settings.layer, OverlayLayer::Temperature);
        assert!((settings.opacity - DEFAULT_OPACITY).abs() < f32::EPSILON);
        assert_eq!(settings.hour_offset, HOUR_PRESETS[0]);
    }

    #[test]
    fn opacity_is_clamped() {
        let overlay = controller();
        overlay.set_opacity(1.7);
        assert!((overlay.settings().opacity - 1.0).abs() < f32::EPSILON);
        overlay.set_opacity(-0.2);
        assert!(overlay.settings().opacity.abs() < f32::EPSILON);
        overlay.set_opacity(f32::NAN);
        assert!((overlay.settings().opacity - DEFAULT_OPACITY).abs() < f32::EPSILON);
    }

    #[test]
    fn current_tile_reflects_settings() {
        let overlay = controller();
        overlay.select_layer(OverlayLayer::WindSpeed);
        overlay.set_hour_offset(48);
        overlay.set_opacity(0.3);

        let tile = overlay.current_tile(at("2024-06-01T00:00:00Z"));
        assert_eq!(tile.layer_code, "WS10");
        assert_eq!(tile.layer_name, "Wind Speed");
        assert_eq!(tile.date_stamp.as_deref(), Some("20240603"));
        assert!(tile.url_template.contains("/forecast/WS10/"));
        assert!((tile.opacity - 0.3).abs() < f32::EPSILON);
        assert_eq!(tile.base_map_url, BASE_MAP_URL);
    }

    #[test]
    fn tile_for_does_not_store_settings() {
        let overlay = controller();
        let preview = OverlaySettings {
            layer: OverlayLayer::Rainfall,
            opacity: 2.0,
            hour_offset: 12,
        };

        let tile = overlay.tile_for(preview, at("2024-06-01T00:00:00Z"));
        assert_eq!(tile.layer_code, "PR0");
        assert!((tile.opacity - 1.0).abs() < f32::EPSILON);
        assert_eq!(overlay.settings(), OverlaySettings::default());

        overlay.apply(preview);
        assert_eq!(overlay.settings().hour_offset, 12);
        assert!((overlay.settings().opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", controller());
        assert!(!debug.contains("KEY\""));
        assert!(debug.contains("[REDACTED]"));
    }
}

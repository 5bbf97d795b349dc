//! Weather map overlay layers

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// A weather tile layer offered by the map overlay.
///
/// Each layer maps to a provider layer code used in the tile path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayLayer {
    #[default]
    Temperature,
    CloudCover,
    Rainfall,
    WindSpeed,
    Humidity,
    DewPoint,
    Pressure,
    Visibility,
}

impl OverlayLayer {
    /// All layers in menu order
    pub const ALL: [Self; 8] = [
        Self::Temperature,
        Self::CloudCover,
        Self::Rainfall,
        Self::WindSpeed,
        Self::Humidity,
        Self::DewPoint,
        Self::Pressure,
        Self::Visibility,
    ];

    /// Provider layer code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Temperature => "TA2",
            Self::CloudCover => "CL",
            Self::Rainfall => "PR0",
            Self::WindSpeed => "WS10",
            Self::Humidity => "RH",
            Self::DewPoint => "DPT",
            Self::Pressure => "APM",
            Self::Visibility => "VIS",
        }
    }

    /// Human readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::CloudCover => "Cloud Cover",
            Self::Rainfall => "Rainfall",
            Self::WindSpeed => "Wind Speed",
            Self::Humidity => "Humidity",
            Self::DewPoint => "Dew Point",
            Self::Pressure => "Pressure",
            Self::Visibility => "Visibility",
        }
    }
}

impl fmt::Display for OverlayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OverlayLayer {
    type Err = DomainError;

    /// Accepts either the provider code (`TA2`) or the snake_case name (`dew_point`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|layer| {
                layer.code().eq_ignore_ascii_case(needle)
                    || layer
                        .display_name()
                        .replace(' ', "_")
                        .eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::UnknownLayer(s.to_string()))
    }
}

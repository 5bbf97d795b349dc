//! Farm advisory categories and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Kind of farm advice that can be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryCategory {
    SowingWindow,
    IrrigationPlanning,
    SpraySafety,
    CropHealth,
}

impl AdvisoryCategory {
    pub const ALL: [Self; 4] = [
        Self::SowingWindow,
        Self::IrrigationPlanning,
        Self::SpraySafety,
        Self::CropHealth,
    ];

    /// Label embedded in prompts and shown on panels
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SowingWindow => "Sowing window",
            Self::IrrigationPlanning => "Irrigation planning",
            Self::SpraySafety => "Spray safety",
            Self::CropHealth => "Crop health",
        }
    }

    /// Stable identifier used in URLs and CLI arguments
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SowingWindow => "sowing-window",
            Self::IrrigationPlanning => "irrigation-planning",
            Self::SpraySafety => "spray-safety",
            Self::CropHealth => "crop-health",
        }
    }
}

impl fmt::Display for AdvisoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AdvisoryCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "sowing-window" | "sowing" => Ok(Self::SowingWindow),
            "irrigation-planning" | "irrigation" | "irrigation-planner" => {
                Ok(Self::IrrigationPlanning)
            },
            "spray-safety" | "spray" => Ok(Self::SpraySafety),
            "crop-health" | "health" => Ok(Self::CropHealth),
            _ => Err(DomainError::UnknownAdvisoryCategory(s.to_string())),
        }
    }
}

/// Text returned by the advisory model for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub category: AdvisoryCategory,
    /// Raw model output, rendered as-is
    pub text: String,
    /// Bullet lines extracted from `text`, best effort
    pub bullets: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl AdvisoryResult {
    #[must_use]
    pub fn new(category: AdvisoryCategory, text: impl Into<String>) -> Self {
        let text = text.into();
        let bullets = extract_bullets(&text);
        Self {
            category,
            text,
            bullets,
            generated_at: Utc::now(),
        }
    }
}

/// Pulls bullet items out of free-form model output.
///
/// Lines starting with `-`, `*`, `•` or an ordinal (`1.`, `2)`) are bullets.
/// When no line carries a marker, every non-empty line counts.
#[must_use]
pub fn extract_bullets(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let marked: Vec<String> = lines
        .iter()
        .filter_map(|line| strip_marker(line))
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect();

    if marked.is_empty() {
        lines.into_iter().map(ToString::to_string).collect()
    } else {
        marked
    }
}

fn strip_marker(line: &str) -> Option<&str> {
    for marker in ['-', '*', '•'] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.starts_with(char::is_whitespace) {
                return Some(rest.trim());
            }
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))
        .map(str::trim)
}

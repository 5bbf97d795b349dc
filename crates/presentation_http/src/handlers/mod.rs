//! HTTP request handlers

pub mod advisory;
pub mod dashboard;
pub mod health;
pub mod locations;
pub mod map;

use serde::Deserialize;
use validator::Validate;

/// `?hours=N` look-ahead shared by snapshot-driven endpoints.
///
/// Offsets past the forecast horizon clamp to the last forecast entry.
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct HoursQuery {
    #[serde(default)]
    pub hours: u32,
}

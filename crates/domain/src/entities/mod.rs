//! Domain entities - weather datasets and derived views

mod advisory;
mod place;
mod snapshot;
mod weather;

pub use advisory::{AdvisoryCategory, AdvisoryResult, extract_bullets};
pub use place::Place;
pub use snapshot::{
    SnapshotDisplay, SnapshotSource, UNAVAILABLE_PLACEHOLDER, WeatherSnapshot,
    approximate_dew_point,
};
pub use weather::{CurrentReading, DailyForecastEntry, ShortRangeForecastEntry, compass_point};

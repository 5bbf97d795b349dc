//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod humidity;
mod overlay_layer;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use humidity::{Humidity, InvalidHumidity};
pub use overlay_layer::OverlayLayer;

//! Domain-level errors

use thiserror::Error;

use crate::value_objects::{InvalidCoordinates, InvalidHumidity};

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Relative humidity outside 0-100
    #[error(transparent)]
    InvalidHumidity(#[from] InvalidHumidity),

    /// Advisory category identifier not recognised
    #[error("Unknown advisory category: {0}")]
    UnknownAdvisoryCategory(String),

    /// Map layer identifier not recognised
    #[error("Unknown map layer: {0}")]
    UnknownLayer(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

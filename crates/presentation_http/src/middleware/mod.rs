//! HTTP middleware components
//!
//! Request extractors that validate payloads before they reach a handler.

pub mod validation;

pub use validation::{ValidatedJson, ValidatedQuery, ValidationError};

//! Application layer - Use cases and orchestration
//!
//! Contains the snapshot aggregation, forecast presentation, advisory and
//! location logic, plus the port definitions adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

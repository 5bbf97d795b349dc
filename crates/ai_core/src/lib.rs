//! AI Core - Inference engine abstraction
//!
//! Provides the [`InferenceEngine`] port and a Google Gemini implementation
//! used to generate crop advisories.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, MessageRole,
    TokenUsage,
};

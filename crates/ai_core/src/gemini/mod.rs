//! Google Gemini inference engine

mod client;

pub use client::GeminiInferenceEngine;

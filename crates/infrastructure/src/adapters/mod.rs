//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod configured_location;
mod gemini_inference_adapter;
mod weather_adapter;

pub use configured_location::ConfiguredLocationSource;
pub use gemini_inference_adapter::GeminiInferenceAdapter;
pub use weather_adapter::WeatherAdapter;

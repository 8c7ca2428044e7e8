//! Infrastructure layer - adapters for external systems
//!
//! Implements the ports defined in the application layer and owns the
//! application configuration.

pub mod adapters;
pub mod config;

pub use adapters::{GeminiInferenceAdapter, SpeechAdapter};
pub use config::{AppConfig, PipelineConfig, ServerConfig};

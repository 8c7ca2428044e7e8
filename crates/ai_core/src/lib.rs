//! AI Core - language-understanding client for character extraction
//!
//! Provides the `InferenceEngine` port and a Gemini `generateContent`
//! adapter. The engine is prompt-in/text-out; interpreting the reply as a
//! dialogue script is the application layer's concern.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port) and request/response types
//! - `gemini` module contains the concrete HTTP implementation (adapter)

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

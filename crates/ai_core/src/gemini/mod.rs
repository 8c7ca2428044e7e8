//! Gemini `generateContent` inference engine implementation
//!
//! Speaks the Google Generative Language REST shape; any endpoint exposing
//! the same surface works via `base_url`.

mod client;

pub use client::GeminiInferenceEngine;

//! AI Speech - Text-to-Speech abstractions
//!
//! Provides the `TextToSpeech` port, an ElevenLabs-compatible HTTP
//! adapter, and the static voice registry used for casting.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! The voice catalogue itself lives in `domain` (`VoiceRegistry`); this
//! crate only speaks the synthesis wire protocol.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{ElevenLabsSpeechProvider, SpeechConfig, TextToSpeech};
//!
//! let provider = ElevenLabsSpeechProvider::new(config)?;
//! let audio = provider.synthesize("Once upon a time", None).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::elevenlabs::ElevenLabsSpeechProvider;
pub use types::AudioData;

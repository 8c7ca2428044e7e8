//! Concrete speech-synthesis providers

pub mod elevenlabs;

pub use elevenlabs::ElevenLabsSpeechProvider;

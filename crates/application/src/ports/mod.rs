//! Port definitions for the application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement them.

mod inference_port;
mod speech_port;

pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechPort, SynthesisResult};
#[cfg(test)]
pub use inference_port::MockInferencePort;

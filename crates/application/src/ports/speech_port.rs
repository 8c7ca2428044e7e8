//! Speech port - interface for text-to-speech operations

use async_trait::async_trait;
use domain::{AudioFormat, VoiceId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Vec<u8>,
    /// Format of the audio
    pub format: AudioFormat,
}

/// Port for speech synthesis operations
///
/// One call produces one clip. Implementations must request the same
/// output format on every call (`output_format`), which is what lets the
/// assembler concatenate without transcoding.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize speech from text with a specific voice
    async fn synthesize(
        &self,
        text: String,
        voice: VoiceId,
    ) -> Result<SynthesisResult, ApplicationError>;

    /// Check if the speech service is available
    async fn is_available(&self) -> bool;

    /// The single output format every synthesis call requests
    fn output_format(&self) -> AudioFormat;

    /// Maximum characters accepted per synthesis call
    fn max_text_chars(&self) -> usize;
}

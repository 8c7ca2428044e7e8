//! Domain-level errors

use thiserror::Error;

use crate::entities::AudioFormat;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input text is empty or whitespace-only
    #[error("Input text is empty")]
    EmptyInput,

    /// An utterance with no spoken text
    #[error("Utterance {index} has no text")]
    EmptyUtterance { index: usize },

    /// Clips handed to assembly do not share one audio format
    #[error("Audio format mismatch at clip {index}: expected {expected}, found {found}")]
    FormatMismatch {
        expected: AudioFormat,
        found: AudioFormat,
        index: usize,
    },

    /// Clip sequence is not contiguous from zero
    #[error("Clip sequence broken at position {position}: expected index {expected}, found {found}")]
    SequenceGap {
        position: usize,
        expected: usize,
        found: usize,
    },

    /// Assembly invoked with no clips
    #[error("No audio clips to assemble")]
    NoClips,

    /// The audio format cannot be concatenated at the byte level
    #[error("Audio format {0} does not support raw concatenation")]
    UnconcatenableFormat(AudioFormat),
}

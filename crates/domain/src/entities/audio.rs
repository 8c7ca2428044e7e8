//! Audio artifacts: formats, per-utterance clips, and the assembled output
//!
//! Assembly is byte-level concatenation. That is only valid for formats
//! whose frames are self-delimiting (MPEG audio streams); container-framed
//! formats such as WAV or OGG carry a single header describing the whole
//! file, and naive concatenation produces output where players stop after
//! the first segment. `supports_raw_concat` encodes that distinction and
//! `AssembledAudio::concatenate` refuses formats outside it.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Audio formats the pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format (MPEG frame stream)
    Mp3,
    /// WAV format (RIFF container)
    Wav,
    /// OGG container
    Ogg,
    /// Opus codec
    Opus,
}

impl AudioFormat {
    /// Get the MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Opus => "audio/opus",
        }
    }

    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
        }
    }

    /// Parse from MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let base = mime.split(';').next().unwrap_or(mime).trim();
        match base {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" => Some(Self::Wav),
            "audio/ogg" => Some(Self::Ogg),
            "audio/opus" => Some(Self::Opus),
            _ => None,
        }
    }

    /// Whether segments in this format remain playable when their bytes
    /// are appended back to back. True only for MPEG frame streams.
    #[must_use]
    pub const fn supports_raw_concat(&self) -> bool {
        matches!(self, Self::Mp3)
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// One synthesized audio segment, mirroring the utterance it voices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Sequence index of the owning utterance
    pub index: usize,
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// Format of the bytes
    pub format: AudioFormat,
}

impl AudioClip {
    /// Create a clip for the utterance at `index`
    pub fn new(index: usize, data: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            index,
            data,
            format,
        }
    }

    /// Size of the clip in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the clip holds no audio
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The single terminal artifact of a narration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledAudio {
    /// Concatenated audio bytes
    pub data: Vec<u8>,
    /// Format shared by every source clip
    pub format: AudioFormat,
}

impl AssembledAudio {
    /// Concatenate ordered clips into one audio stream.
    ///
    /// Preconditions, enforced here because their violation is an internal
    /// defect rather than a user error:
    /// - at least one clip;
    /// - clip indices contiguous from 0 in the given order;
    /// - every clip in the same format;
    /// - the format supports raw concatenation.
    pub fn concatenate(clips: &[AudioClip]) -> Result<Self, DomainError> {
        let first = clips.first().ok_or(DomainError::NoClips)?;
        let format = first.format;

        if !format.supports_raw_concat() {
            return Err(DomainError::UnconcatenableFormat(format));
        }

        let mut data = Vec::with_capacity(clips.iter().map(AudioClip::size_bytes).sum());
        for (position, clip) in clips.iter().enumerate() {
            if clip.format != format {
                return Err(DomainError::FormatMismatch {
                    expected: format,
                    found: clip.format,
                    index: clip.index,
                });
            }
            if clip.index != position {
                return Err(DomainError::SequenceGap {
                    position,
                    expected: position,
                    found: clip.index,
                });
            }
            data.extend_from_slice(&clip.data);
        }

        Ok(Self { data, format })
    }

    /// MIME type of the assembled stream
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size of the assembled audio in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

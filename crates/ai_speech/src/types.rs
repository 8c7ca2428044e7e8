//! Types for speech synthesis

use domain::AudioFormat;

/// Container for synthesized audio with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Raw audio bytes
    data: Vec<u8>,
    /// Audio format
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_data_accessors() {
        let audio = AudioData::new(vec![1, 2, 3, 4], AudioFormat::Mp3);
        assert_eq!(audio.data(), &[1, 2, 3, 4]);
        assert_eq!(audio.format(), AudioFormat::Mp3);
        assert_eq!(audio.size_bytes(), 4);
        assert_eq!(audio.mime_type(), "audio/mpeg");
        assert!(!audio.is_empty());
    }

    #[test]
    fn into_data_consumes_and_returns_bytes() {
        let audio = AudioData::new(vec![9, 8, 7], AudioFormat::Mp3);
        assert_eq!(audio.into_data(), vec![9, 8, 7]);
    }

    #[test]
    fn empty_audio_data() {
        let audio = AudioData::new(vec![], AudioFormat::Mp3);
        assert!(audio.is_empty());
    }
}

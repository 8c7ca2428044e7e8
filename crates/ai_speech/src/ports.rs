//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that synthesis adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::AudioData;

/// Port for Text-to-Speech implementations
///
/// Implementations convert one piece of text to one audio clip, always in
/// the provider's configured output format so downstream concatenation
/// never has to transcode.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// # Arguments
    ///
    /// * `text` - Text to synthesize
    /// * `voice` - Optional voice ID to use (uses the default voice if None)
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails.
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError>;

    /// Check if the synthesis service is available
    async fn is_available(&self) -> bool;

    /// Get the default voice ID
    fn default_voice(&self) -> &str;

    /// Maximum characters accepted per synthesis request
    fn max_text_chars(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::AudioFormat;

    /// Mock implementation for testing
    struct MockTextToSpeech {
        voice: String,
        available: bool,
    }

    #[async_trait]
    impl TextToSpeech for MockTextToSpeech {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: Option<&str>,
        ) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(vec![0, 1, 2, 3], AudioFormat::Mp3))
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        fn default_voice(&self) -> &str {
            &self.voice
        }

        fn max_text_chars(&self) -> usize {
            5000
        }
    }

    #[tokio::test]
    async fn mock_tts_synthesizes() {
        let tts = MockTextToSpeech {
            voice: "rachel".to_string(),
            available: true,
        };

        let result = tts.synthesize("Hello", None).await;

        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mock_tts_availability() {
        let up = MockTextToSpeech {
            voice: "rachel".to_string(),
            available: true,
        };
        let down = MockTextToSpeech {
            voice: "rachel".to_string(),
            available: false,
        };

        assert!(up.is_available().await);
        assert!(!down.is_available().await);
    }

    #[test]
    fn mock_tts_default_voice() {
        let tts = MockTextToSpeech {
            voice: "george".to_string(),
            available: true,
        };
        assert_eq!(tts.default_voice(), "george");
    }
}

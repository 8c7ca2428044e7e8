//! Speech adapter - implements SpeechPort using ai_speech

use ai_speech::{ElevenLabsSpeechProvider, SpeechConfig, SpeechError, TextToSpeech};
use application::{
    error::ApplicationError,
    ports::{SpeechPort, SynthesisResult},
};
use async_trait::async_trait;
use domain::{AudioFormat, VoiceId};
use tracing::instrument;

/// Adapter binding the ElevenLabs provider to the application's speech port
#[derive(Debug)]
pub struct SpeechAdapter {
    provider: ElevenLabsSpeechProvider,
    output_format: AudioFormat,
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let output_format = config.output_format;
        let provider = ElevenLabsSpeechProvider::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            provider,
            output_format,
        })
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::TextTooLong { chars, max } => ApplicationError::Internal(format!(
                "Unsplit text reached the provider: {chars} chars exceeds {max}"
            )),
            SpeechError::InvalidResponse(e) => {
                ApplicationError::Internal(format!("Invalid synthesis response: {e}"))
            },
            other => ApplicationError::Upstream(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(
        &self,
        text: String,
        voice: VoiceId,
    ) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .provider
            .synthesize(&text, Some(voice.as_str()))
            .await
            .map_err(Self::map_error)?;

        let format = audio.format();
        Ok(SynthesisResult {
            audio_data: audio.into_data(),
            format,
        })
    }

    async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }

    fn output_format(&self) -> AudioFormat {
        self.output_format
    }

    fn max_text_chars(&self) -> usize {
        self.provider.max_text_chars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SpeechConfig {
        SpeechConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn new_fails_without_api_key() {
        let result = SpeechAdapter::new(SpeechConfig::default());
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn new_succeeds_with_api_key() {
        assert!(SpeechAdapter::new(test_config()).is_ok());
    }

    #[test]
    fn adapter_reports_the_configured_format_and_limit() {
        let adapter = SpeechAdapter::new(test_config()).unwrap();
        assert_eq!(adapter.output_format(), AudioFormat::Mp3);
        assert_eq!(adapter.max_text_chars(), 5000);
    }

    #[test]
    fn rate_limit_maps_to_rate_limited() {
        let err = SpeechAdapter::map_error(SpeechError::RateLimited);
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[test]
    fn voice_not_found_maps_to_upstream() {
        let err = SpeechAdapter::map_error(SpeechError::VoiceNotFound("bogus".to_string()));
        assert!(matches!(err, ApplicationError::Upstream(_)));
    }

    #[test]
    fn text_too_long_maps_to_internal() {
        // The synthesis service splits before dispatch; the provider limit
        // firing means a bug upstream of it
        let err = SpeechAdapter::map_error(SpeechError::TextTooLong {
            chars: 9000,
            max: 5000,
        });
        assert!(matches!(err, ApplicationError::Internal(_)));
    }
}

//! ElevenLabs speech provider
//!
//! Implements `TextToSpeech` against the ElevenLabs REST API (or anything
//! exposing the same surface via `base_url`).
//!
//! Every request names the same output format, so all clips produced
//! within one narration share it.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use domain::AudioFormat;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::AudioData;

/// ElevenLabs text-to-speech provider
#[derive(Debug, Clone)]
pub struct ElevenLabsSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl ElevenLabsSpeechProvider {
    /// Create a new ElevenLabs speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SpeechError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the API key
    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the synthesis endpoint URL for a voice
    fn tts_url(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{voice_id}", self.config.base_url)
    }

    /// Build the voices listing URL (availability check)
    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.config.base_url)
    }

    /// Convert the configured format to the API's output_format selector
    const fn output_format_param(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3_44100_128",
            AudioFormat::Opus | AudioFormat::Ogg => "opus_48000_64",
            AudioFormat::Wav => "pcm_44100",
        }
    }
}

/// Synthesis request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs API error envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    detail: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    status: Option<String>,
    message: String,
}

#[async_trait]
impl TextToSpeech for ElevenLabsSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = voice.unwrap_or("default")))]
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError> {
        debug!("Synthesizing speech");

        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let chars = text.chars().count();
        if chars > self.config.max_text_chars {
            return Err(SpeechError::TextTooLong {
                chars,
                max: self.config.max_text_chars,
            });
        }

        let voice = voice.unwrap_or(&self.config.default_voice);

        let request = TtsRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        let response = self
            .client
            .post(self.tts_url(voice))
            .header("xi-api-key", self.api_key())
            .header("accept", self.config.output_format.mime_type())
            .query(&[(
                "output_format",
                Self::output_format_param(self.config.output_format),
            )])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
                return match api_error.detail.status.as_deref() {
                    Some("quota_exceeded" | "too_many_concurrent_requests") => {
                        Err(SpeechError::RateLimited)
                    },
                    Some("voice_not_found") => Err(SpeechError::VoiceNotFound(voice.to_string())),
                    _ => Err(SpeechError::SynthesisFailed(api_error.detail.message)),
                };
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(SpeechError::RateLimited);
            }

            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Service returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        Ok(AudioData::new(
            audio_bytes.to_vec(),
            self.config.output_format,
        ))
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.voices_url())
            .header("xi-api-key", self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Speech availability check failed: {}", e);
                false
            },
        }
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }

    fn max_text_chars(&self) -> usize {
        self.config.max_text_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(mock_server: &MockServer) -> ElevenLabsSpeechProvider {
        let config = SpeechConfig {
            api_key: Some("test-api-key".to_string()),
            base_url: mock_server.uri(),
            ..Default::default()
        };
        ElevenLabsSpeechProvider::new(config).unwrap()
    }

    mod synthesis_tests {
        use super::*;

        #[tokio::test]
        async fn synthesize_success() {
            let mock_server = MockServer::start().await;

            let audio_bytes = vec![0u8; 1024];

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
                .and(header("xi-api-key", "test-api-key"))
                .and(query_param("output_format", "mp3_44100_128"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(audio_bytes.clone()))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("Hello, world!", None).await;

            assert!(result.is_ok());
            let audio = result.unwrap();
            assert_eq!(audio.size_bytes(), 1024);
            assert_eq!(audio.format(), AudioFormat::Mp3);
        }

        #[tokio::test]
        async fn synthesize_with_explicit_voice() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/JBFqnCBsd6RMkjVDRZzb"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 512]))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider
                .synthesize("Test", Some("JBFqnCBsd6RMkjVDRZzb"))
                .await;

            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn synthesize_empty_text_fails_without_calling_out() {
            let mock_server = MockServer::start().await;
            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("   ", None).await;

            assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
        }

        #[tokio::test]
        async fn synthesize_text_too_long_fails_without_calling_out() {
            let mock_server = MockServer::start().await;
            let provider = create_test_provider(&mock_server);

            let long_text = "a".repeat(6000);
            let result = provider.synthesize(&long_text, None).await;

            assert!(matches!(
                result,
                Err(SpeechError::TextTooLong {
                    chars: 6000,
                    max: 5000
                })
            ));
        }

        #[tokio::test]
        async fn synthesize_quota_exceeded_maps_to_rate_limited() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
                .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                    "detail": {
                        "status": "quota_exceeded",
                        "message": "Character quota exceeded"
                    }
                })))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("Test", None).await;

            assert!(matches!(result, Err(SpeechError::RateLimited)));
        }

        #[tokio::test]
        async fn synthesize_bare_429_maps_to_rate_limited() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
                .respond_with(ResponseTemplate::new(429))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("Test", None).await;

            assert!(matches!(result, Err(SpeechError::RateLimited)));
        }

        #[tokio::test]
        async fn synthesize_unknown_voice_maps_to_voice_not_found() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/bogus"))
                .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                    "detail": {
                        "status": "voice_not_found",
                        "message": "A voice with voice_id bogus was not found"
                    }
                })))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("Test", Some("bogus")).await;

            assert!(matches!(result, Err(SpeechError::VoiceNotFound(v)) if v == "bogus"));
        }

        #[tokio::test]
        async fn synthesize_server_error_maps_to_synthesis_failed() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
                .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("Test", None).await;

            assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
        }

        #[tokio::test]
        async fn synthesize_empty_body_is_invalid_response() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("Test", None).await;

            assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
        }
    }

    mod availability_tests {
        use super::*;

        #[tokio::test]
        async fn is_available_when_voices_endpoint_responds() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/v1/voices"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "voices": []
                })))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            assert!(provider.is_available().await);
        }

        #[tokio::test]
        async fn is_not_available_when_voices_endpoint_fails() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/v1/voices"))
                .respond_with(ResponseTemplate::new(401))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            assert!(!provider.is_available().await);
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn new_fails_without_api_key() {
            let result = ElevenLabsSpeechProvider::new(SpeechConfig::default());
            assert!(matches!(result, Err(SpeechError::Configuration(_))));
        }

        #[test]
        fn new_succeeds_with_valid_config() {
            assert!(ElevenLabsSpeechProvider::new(SpeechConfig::test()).is_ok());
        }

        #[test]
        fn default_voice_comes_from_config() {
            let provider = ElevenLabsSpeechProvider::new(SpeechConfig::test()).unwrap();
            assert_eq!(provider.default_voice(), "21m00Tcm4TlvDq8ikWAM");
            assert_eq!(provider.max_text_chars(), 5000);
        }
    }

    mod format_tests {
        use super::*;

        #[test]
        fn output_format_params() {
            assert_eq!(
                ElevenLabsSpeechProvider::output_format_param(AudioFormat::Mp3),
                "mp3_44100_128"
            );
            assert_eq!(
                ElevenLabsSpeechProvider::output_format_param(AudioFormat::Opus),
                "opus_48000_64"
            );
        }
    }
}

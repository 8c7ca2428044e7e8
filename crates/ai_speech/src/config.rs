//! Configuration for speech synthesis

use domain::AudioFormat;
use serde::{Deserialize, Serialize};

/// Configuration for the speech-synthesis service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// API key, required at startup
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Synthesis model
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Voice used for the narrator and as the unmatched-speaker fallback
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Output audio format requested for every clip. The assembler
    /// concatenates bytes, so this must be a raw-concatenable format.
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum characters per synthesis request (service limit)
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// Voice stability (0.0 - 1.0)
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// Similarity boost (0.0 - 1.0)
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
}

fn default_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_voice() -> String {
    // Rachel, the calm narration voice of the built-in registry
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Mp3
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_text_chars() -> usize {
    5000
}

const fn default_stability() -> f32 {
    0.5
}

const fn default_similarity_boost() -> f32 {
    0.5
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model_id: default_model_id(),
            default_voice: default_voice(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
            max_text_chars: default_max_text_chars(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
        }
    }
}

impl SpeechConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            return Err("Speech API key is required".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        if self.max_text_chars == 0 {
            return Err("Max text length must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.stability) {
            return Err(format!(
                "Stability must be between 0.0 and 1.0, got {}",
                self.stability
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(format!(
                "Similarity boost must be between 0.0 and 1.0, got {}",
                self.similarity_boost
            ));
        }
        if !self.output_format.supports_raw_concat() {
            return Err(format!(
                "Output format {} cannot be concatenated without transcoding",
                self.output_format
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = SpeechConfig::default();

        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.model_id, "eleven_monolingual_v1");
        assert_eq!(config.default_voice, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(config.output_format, AudioFormat::Mp3);
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_text_chars, 5000);
        assert!((config.stability - 0.5).abs() < f32::EPSILON);
        assert!((config.similarity_boost - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn validate_fails_without_api_key() {
        assert!(SpeechConfig::default().validate().is_err());
    }

    #[test]
    fn validate_succeeds_with_api_key() {
        assert!(SpeechConfig::test().validate().is_ok());
    }

    #[test]
    fn validate_fails_with_invalid_stability() {
        let mut config = SpeechConfig::test();
        config.stability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_zero_timeout() {
        let mut config = SpeechConfig::test();
        config.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_container_output_format() {
        let mut config = SpeechConfig::test();
        config.output_format = AudioFormat::Wav;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_toml() {
        let toml = r#"
            api_key = "el-test"
            model_id = "eleven_multilingual_v2"
            default_voice = "JBFqnCBsd6RMkjVDRZzb"
            output_format = "mp3"
            timeout_ms = 60000
            max_text_chars = 2500
            stability = 0.7
        "#;

        let config: SpeechConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("el-test"));
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert_eq!(config.default_voice, "JBFqnCBsd6RMkjVDRZzb");
        assert_eq!(config.output_format, AudioFormat::Mp3);
        assert_eq!(config.timeout_ms, 60000);
        assert_eq!(config.max_text_chars, 2500);
        assert!((config.stability - 0.7).abs() < f32::EPSILON);
    }
}

//! Configuration for the inference engine

use serde::{Deserialize, Serialize};

/// Configuration for the language-understanding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the Gemini-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, required at startup
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Temperature for sampling (low: extraction wants structured output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_output_tokens() -> u32 {
    4096
}

const fn default_temperature() -> f32 {
    0.2
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl InferenceConfig {
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
            return Err("Gemini API key is required".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_output_tokens, 4096);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn validate_fails_without_api_key() {
        let config = InferenceConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_empty_api_key() {
        let config = InferenceConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_succeeds_with_api_key() {
        assert!(InferenceConfig::test().validate().is_ok());
    }

    #[test]
    fn validate_fails_with_zero_timeout() {
        let mut config = InferenceConfig::test();
        config.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_out_of_range_temperature() {
        let mut config = InferenceConfig::test();
        config.temperature = 3.5;
        assert!(config.validate().is_err());
    }
}

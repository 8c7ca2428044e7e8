//! Application configuration
//!
//! Layered the usual way: built-in defaults, then an optional
//! `config.toml`, then `DRAMATIS_*` environment variables. Both upstream
//! credentials are validated at startup; a missing key is a fatal
//! configuration error, never a per-request one.

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all, development mode)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Maximum JSON body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: Some(30),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Overall deadline per request in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum in-flight synthesis calls per request
    #[serde(default = "default_max_parallel_synthesis")]
    pub max_parallel_synthesis: usize,

    /// Backoff before the single rate-limit retry, in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_request_timeout_ms() -> u64 {
    120_000 // 2 minutes
}

const fn default_max_parallel_synthesis() -> usize {
    4
}

const fn default_retry_backoff_ms() -> u64 {
    1000
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            max_parallel_synthesis: default_max_parallel_synthesis(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Character-extraction service settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Speech-synthesis service settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml`, and `DRAMATIS_*`
    /// environment variables (e.g. `DRAMATIS_SERVER_PORT`,
    /// `DRAMATIS_INFERENCE_API_KEY`, `DRAMATIS_SPEECH_API_KEY`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("DRAMATIS")
                    .separator("_")
                    .try_parsing(true),
            );

        let loaded = builder.build()?;
        // Fields absent from every source fall back to their serde defaults
        let mut app: Self = loaded.try_deserialize()?;

        // Fill single-purpose fields the deserializer may have left empty
        if app.inference.api_key.is_none() {
            app.inference.api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        if app.speech.api_key.is_none() {
            app.speech.api_key = std::env::var("ELEVENLABS_API_KEY").ok();
        }

        Ok(app)
    }

    /// Validate configuration for startup. Both upstream credentials are
    /// required; their absence aborts the process before any request is
    /// accepted.
    pub fn validate(&self) -> Result<(), String> {
        self.inference.validate()?;
        self.speech.validate()?;
        if self.pipeline.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.pipeline.max_parallel_synthesis == 0 {
            return Err("Synthesis parallelism must be greater than 0".to_string());
        }
        Ok(())
    }
}

//! Application-level errors
//!
//! The single vocabulary the HTTP layer translates into user-visible
//! responses. Stage context lives in the variant; per-utterance failures
//! carry the utterance index so the caller learns where the narrative
//! broke.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (assembly invariants, mostly)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// User-correctable input problem
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An external service was unreachable or returned an error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Rate limit exceeded upstream; retryable with backoff
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Synthesis of one utterance failed after the retry policy ran out
    #[error("Synthesis failed for utterance {index}: {message}")]
    SynthesisFailed { index: usize, message: String },

    /// Overall request deadline exceeded
    #[error("Request deadline exceeded after {0}ms")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Upstream(_))
    }

    /// The utterance index this error points at, if it is per-utterance
    pub const fn utterance_index(&self) -> Option<usize> {
        match self {
            Self::SynthesisFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

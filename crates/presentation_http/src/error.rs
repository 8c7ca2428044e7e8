//! API error handling
//!
//! The single point where pipeline failures become user-visible JSON.
//! Status mapping: invalid input 400, upstream failures 502, deadline 504,
//! everything else 500. No partial audio accompanies any error.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailed(String),

    #[error("Deadline exceeded: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Stable error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::UpstreamFailed(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg),
            Self::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, "timeout", msg),
            Self::Internal(msg) => {
                // Internal details are logged, not shipped to the caller
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::Upstream(_)
            | ApplicationError::RateLimited
            | ApplicationError::SynthesisFailed { .. } => Self::UpstreamFailed(err.to_string()),
            ApplicationError::Timeout(_) => Self::Timeout(err.to_string()),
            // Assembly invariants and the rest are defects, not user errors
            ApplicationError::Domain(_)
            | ApplicationError::Configuration(_)
            | ApplicationError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

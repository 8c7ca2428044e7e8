//! Narration handler
//!
//! `POST /generate-audio` takes `{ "text": ... }` and answers with one
//! playable audio stream, or a JSON error. Success responses carry a
//! download filename so the browser's download link works out of the box.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Narration request body
#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    /// The story text to narrate
    pub text: String,
}

/// Handle a narration request
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn generate_audio(
    State(state): State<AppState>,
    Json(request): Json<NarrateRequest>,
) -> Result<Response, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text must not be empty".to_string()));
    }

    let result = state.narration_service.narrate(&request.text).await?;

    let filename = format!(
        "attachment; filename=\"narration.{}\"",
        result.audio.format.extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, result.audio.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        result.audio.data,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrate_request_deserialize() {
        let request: NarrateRequest =
            serde_json::from_str(r#"{"text": "Once upon a time"}"#).unwrap();
        assert_eq!(request.text, "Once upon a time");
    }

    #[test]
    fn narrate_request_rejects_missing_text() {
        let result = serde_json::from_str::<NarrateRequest>(r"{}");
        assert!(result.is_err());
    }

    #[test]
    fn empty_text_validation() {
        let request = NarrateRequest {
            text: "  \n ".to_string(),
        };
        assert!(request.text.trim().is_empty());
    }
}

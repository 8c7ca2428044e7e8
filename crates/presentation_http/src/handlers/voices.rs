//! Voice catalogue handler

use axum::{Json, extract::State};
use domain::VoiceInfo;
use serde::Serialize;

use crate::state::AppState;

/// Voice listing response
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

/// List the voices available for casting
pub async fn list_voices(State(state): State<AppState>) -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: state.narration_service.voices().to_vec(),
    })
}

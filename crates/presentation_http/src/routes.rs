//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // UI
        .route("/", get(handlers::ui::index))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Narration
        .route("/generate-audio", post(handlers::narrate::generate_audio))
        // Voice catalogue
        .route("/v1/voices", get(handlers::voices::list_voices))
        // Attach state
        .with_state(state)
}

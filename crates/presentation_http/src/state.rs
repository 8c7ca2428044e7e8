//! Application state shared across handlers

use std::sync::Arc;

use application::NarrationService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The narration pipeline
    pub narration_service: Arc<NarrationService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

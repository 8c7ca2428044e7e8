//! Embedded single-page UI
//!
//! One form, one audio element, one download link. The page is compiled
//! into the binary so the server ships as a single artifact.

use axum::response::Html;

/// Serve the narration page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

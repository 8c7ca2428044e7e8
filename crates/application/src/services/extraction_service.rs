//! Extraction service - turns raw text into an attributed script
//!
//! One inference call, then tolerant parsing. A reply that cannot be
//! parsed at all degrades to a single narrator utterance covering the
//! whole input; the request goes on with one voice rather than failing.

use std::{fmt, sync::Arc};

use domain::Utterance;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::InferencePort,
    prompts::{EXTRACTION_SYSTEM_PROMPT, extraction_prompt},
    script_parser,
};

/// Service for character extraction
pub struct ExtractionService {
    inference: Arc<dyn InferencePort>,
}

impl fmt::Debug for ExtractionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionService").finish_non_exhaustive()
    }
}

impl ExtractionService {
    /// Create a new extraction service
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Extract an ordered, attributed script from raw text.
    ///
    /// Fails with `InvalidInput` before any external call when the text is
    /// empty after trimming. Upstream transport failures propagate; an
    /// unusable reply falls back to one narrator utterance.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn extract(&self, text: &str) -> Result<Vec<Utterance>, ApplicationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Text must not be empty".to_string(),
            ));
        }

        let result = self
            .inference
            .generate(EXTRACTION_SYSTEM_PROMPT, &extraction_prompt(trimmed))
            .await?;

        debug!(
            model = %result.model,
            reply_len = result.content.len(),
            latency_ms = result.latency_ms,
            "Extraction reply received"
        );

        match script_parser::parse_script(&result.content) {
            Ok(utterances) => {
                debug!(count = utterances.len(), "Script parsed");
                Ok(utterances)
            },
            Err(e) => {
                warn!(error = %e, "Unparseable extraction reply, falling back to narrator");
                Ok(vec![Utterance::narration(trimmed)])
            },
        }
    }

    /// Check if the language-understanding backend is reachable
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Name of the model answering extraction calls
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }
}

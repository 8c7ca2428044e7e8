//! Narration service - drives the whole pipeline for one request
//!
//! Extraction, casting, synthesis, assembly, strictly in that order: every
//! stage consumes the previous stage's complete output. The `NarrationJob`
//! entity records progress and failure context; the whole run sits under
//! one deadline so a stuck upstream call cannot hang the request forever.

use std::{fmt, time::Duration, time::Instant};

use domain::{AssembledAudio, NarrationJob, VoiceInfo};
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    services::{CastingService, ExtractionService, SynthesisService},
};

/// Configuration for the narration pipeline
#[derive(Debug, Clone)]
pub struct NarrationConfig {
    /// Overall deadline for one request in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 120_000, // 2 minutes
        }
    }
}

/// Result of a completed narration request
#[derive(Debug)]
pub struct NarrationResult {
    /// The job with its final state
    pub job: NarrationJob,
    /// The assembled audio
    pub audio: AssembledAudio,
    /// Total processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Service orchestrating the narration pipeline
pub struct NarrationService {
    extraction: ExtractionService,
    casting: CastingService,
    synthesis: SynthesisService,
    config: NarrationConfig,
}

impl fmt::Debug for NarrationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NarrationService {
    /// Create a narration service
    pub fn new(
        extraction: ExtractionService,
        casting: CastingService,
        synthesis: SynthesisService,
    ) -> Self {
        Self::with_config(extraction, casting, synthesis, NarrationConfig::default())
    }

    /// Create a narration service with custom configuration
    pub fn with_config(
        extraction: ExtractionService,
        casting: CastingService,
        synthesis: SynthesisService,
        config: NarrationConfig,
    ) -> Self {
        Self {
            extraction,
            casting,
            synthesis,
            config,
        }
    }

    /// Run the full pipeline for one text submission.
    ///
    /// No partial audio is ever returned: the result is either the
    /// complete assembled narration or an error naming the stage (and
    /// utterance, where applicable) that sank the request.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn narrate(&self, text: &str) -> Result<NarrationResult, ApplicationError> {
        let deadline = Duration::from_millis(self.config.request_timeout_ms);

        match tokio::time::timeout(deadline, self.run_pipeline(text)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_ms = self.config.request_timeout_ms,
                    "Narration deadline exceeded"
                );
                Err(ApplicationError::Timeout(self.config.request_timeout_ms))
            },
        }
    }

    async fn run_pipeline(&self, text: &str) -> Result<NarrationResult, ApplicationError> {
        let start = Instant::now();
        let mut job = NarrationJob::new(text.chars().count());

        // Stage 1: character extraction
        job.start_extraction();
        let utterances = match self.extraction.extract(text).await {
            Ok(u) => u,
            Err(e) => {
                job.fail(e.to_string());
                warn!(job_id = %job.id, stage = %job.status, error = %e, "Extraction failed");
                return Err(e);
            },
        };

        // Stage 2: voice assignment (infallible by design)
        job.start_voice_assignment(utterances.len());
        let assignment = self.casting.assign(&utterances);

        // Stage 3: per-utterance synthesis
        job.start_synthesis(assignment.len());
        let clips = match self.synthesis.synthesize_all(&utterances, &assignment).await {
            Ok(c) => c,
            Err(e) => {
                match e.utterance_index() {
                    Some(index) => job.fail_at_utterance(index, e.to_string()),
                    None => job.fail(e.to_string()),
                }
                warn!(job_id = %job.id, stage = %job.status, error = %e, "Synthesis failed");
                return Err(e);
            },
        };

        // Every utterance must have produced exactly one clip
        if clips.len() != utterances.len() {
            let e = ApplicationError::Internal(format!(
                "Clip count {} does not match utterance count {}",
                clips.len(),
                utterances.len()
            ));
            job.fail(e.to_string());
            return Err(e);
        }

        // Stage 4: assembly
        job.start_assembly();
        let audio = match AssembledAudio::concatenate(&clips) {
            Ok(a) => a,
            Err(e) => {
                job.fail(e.to_string());
                warn!(job_id = %job.id, stage = %job.status, error = %e, "Assembly invariant violated");
                return Err(e.into());
            },
        };

        job.complete();

        #[allow(clippy::cast_possible_truncation)]
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            job_id = %job.id,
            utterances = utterances.len(),
            speakers = assignment.len(),
            audio_bytes = audio.size_bytes(),
            processing_time_ms,
            "Narration complete"
        );

        Ok(NarrationResult {
            job,
            audio,
            processing_time_ms,
        })
    }

    /// Check if the language-understanding backend is reachable
    pub async fn is_inference_healthy(&self) -> bool {
        self.extraction.is_healthy().await
    }

    /// Check if the speech service is reachable
    pub async fn is_speech_available(&self) -> bool {
        self.synthesis.is_available().await
    }

    /// Name of the extraction model
    pub fn current_model(&self) -> String {
        self.extraction.current_model()
    }

    /// The voices available for casting
    pub fn voices(&self) -> &[VoiceInfo] {
        self.casting.registry().voices()
    }
}

//! Narration job entity
//!
//! Tracks one request through the pipeline. Transitions are strictly
//! sequential because every stage consumes the previous stage's full
//! output; `Failed` is reachable from any non-terminal state and records
//! the stage plus, where applicable, the utterance that sank the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::NarrationId;

/// Pipeline stage of a narration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationStatus {
    /// Request accepted, nothing started yet
    Received,
    /// Character extraction call in flight
    Extracting,
    /// Mapping speakers to voices
    AssigningVoices,
    /// Per-utterance synthesis in flight
    Synthesizing,
    /// Concatenating clips
    Assembling,
    /// Assembled audio handed back to the caller
    Done,
    /// Pipeline aborted; no partial audio is ever returned
    Failed,
}

impl NarrationStatus {
    /// Check if the status is terminal
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Check if the request is still moving through the pipeline
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for NarrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Extracting => "extracting",
            Self::AssigningVoices => "assigning_voices",
            Self::Synthesizing => "synthesizing",
            Self::Assembling => "assembling",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// One narration request moving through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationJob {
    /// Unique identifier
    pub id: NarrationId,
    /// Length of the submitted text in characters
    pub input_chars: usize,
    /// Current pipeline stage
    pub status: NarrationStatus,
    /// Number of utterances produced by extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utterance_count: Option<usize>,
    /// Number of distinct speakers cast
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_count: Option<usize>,
    /// Index of the utterance that failed, when the failure is per-utterance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_utterance: Option<usize>,
    /// Error message if the pipeline failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the request was received
    pub created_at: DateTime<Utc>,
    /// When the job last changed state
    pub updated_at: DateTime<Utc>,
}

impl NarrationJob {
    /// Create a job for freshly received input
    #[must_use]
    pub fn new(input_chars: usize) -> Self {
        let now = Utc::now();
        Self {
            id: NarrationId::new(),
            input_chars,
            status: NarrationStatus::Received,
            utterance_count: None,
            speaker_count: None,
            failed_utterance: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn transition(&mut self, status: NarrationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Mark extraction as started
    pub fn start_extraction(&mut self) {
        self.transition(NarrationStatus::Extracting);
    }

    /// Record the extraction result and move to voice assignment
    pub fn start_voice_assignment(&mut self, utterance_count: usize) {
        self.utterance_count = Some(utterance_count);
        self.transition(NarrationStatus::AssigningVoices);
    }

    /// Record the casting result and move to synthesis
    pub fn start_synthesis(&mut self, speaker_count: usize) {
        self.speaker_count = Some(speaker_count);
        self.transition(NarrationStatus::Synthesizing);
    }

    /// Mark assembly as started
    pub fn start_assembly(&mut self) {
        self.transition(NarrationStatus::Assembling);
    }

    /// Mark the pipeline as complete
    pub fn complete(&mut self) {
        self.transition(NarrationStatus::Done);
    }

    /// Mark the pipeline as failed with an error message
    pub fn fail(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.transition(NarrationStatus::Failed);
    }

    /// Mark the pipeline as failed at a specific utterance
    pub fn fail_at_utterance(&mut self, index: usize, error: impl Into<String>) {
        self.failed_utterance = Some(index);
        self.fail(error);
    }

    /// Check if processing has finished, successfully or not
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }
}

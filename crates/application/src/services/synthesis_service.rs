//! Synthesis service - one clip per utterance
//!
//! Per-utterance calls have no data dependency on each other, so they are
//! dispatched concurrently up to a bounded limit and re-ordered by
//! sequence index afterwards. Text beyond the provider limit is split at
//! sentence boundaries and the chunk clips re-joined, so nothing is ever
//! truncated.
//!
//! The one retry policy in the system lives here:
//! - rate-limited calls get a single retry after a fixed backoff;
//! - any other upstream failure gets a single retry with the narrator
//!   voice, since a bad voice ID is the common, cheaply recoverable cause;
//! - a failed retry fails the whole request with the utterance index.

use std::{fmt, sync::Arc, time::Duration};

use domain::{AudioClip, Utterance, VoiceAssignment, VoiceId};
use futures::{StreamExt, stream};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{SpeechPort, SynthesisResult},
};

/// Tuning for the synthesis fan-out
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Maximum in-flight synthesis calls per request
    pub max_parallel: usize,
    /// Backoff before the single rate-limit retry
    pub retry_backoff_ms: u64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            max_parallel: 4,
            retry_backoff_ms: 1000,
        }
    }
}

/// Service for synthesizing a cast script into ordered clips
pub struct SynthesisService {
    speech: Arc<dyn SpeechPort>,
    narrator_voice: VoiceId,
    options: SynthesisOptions,
}

impl fmt::Debug for SynthesisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesisService")
            .field("narrator_voice", &self.narrator_voice)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl SynthesisService {
    /// Create a synthesis service
    pub fn new(speech: Arc<dyn SpeechPort>, narrator_voice: VoiceId) -> Self {
        Self::with_options(speech, narrator_voice, SynthesisOptions::default())
    }

    /// Create a synthesis service with custom options
    pub fn with_options(
        speech: Arc<dyn SpeechPort>,
        narrator_voice: VoiceId,
        options: SynthesisOptions,
    ) -> Self {
        Self {
            speech,
            narrator_voice,
            options,
        }
    }

    /// Synthesize every utterance with its assigned voice.
    ///
    /// Returns exactly one clip per utterance, sorted by sequence index.
    /// Any per-utterance failure surviving the retry policy aborts the
    /// whole batch; no clip is ever dropped silently.
    #[instrument(skip(self, utterances, assignment), fields(utterances = utterances.len()))]
    pub async fn synthesize_all(
        &self,
        utterances: &[Utterance],
        assignment: &VoiceAssignment,
    ) -> Result<Vec<AudioClip>, ApplicationError> {
        let jobs: Vec<(Utterance, VoiceId)> = utterances
            .iter()
            .map(|utterance| {
                let voice = assignment
                    .get(&utterance.speaker)
                    .unwrap_or(&self.narrator_voice)
                    .clone();
                (utterance.clone(), voice)
            })
            .collect();

        let mut results = stream::iter(jobs.into_iter().map(|(utterance, voice)| async move {
            self.synthesize_one(&utterance, voice).await
        }))
        .buffer_unordered(self.options.max_parallel.max(1));

        // Completion order is arbitrary; collect then restore script order
        let mut clips = Vec::with_capacity(utterances.len());
        while let Some(result) = results.next().await {
            clips.push(result?);
        }
        clips.sort_unstable_by_key(|clip| clip.index);

        debug!(clips = clips.len(), "Synthesis fan-out complete");
        Ok(clips)
    }

    /// Synthesize one utterance, splitting oversized text and applying the
    /// retry policy per chunk
    async fn synthesize_one(
        &self,
        utterance: &Utterance,
        voice: VoiceId,
    ) -> Result<AudioClip, ApplicationError> {
        let chunks = split_for_synthesis(&utterance.text, self.speech.max_text_chars());

        let mut data = Vec::new();
        for chunk in &chunks {
            let result = self.synthesize_chunk(utterance.index, chunk, &voice).await?;
            data.extend_from_slice(&result.audio_data);
        }

        if chunks.len() > 1 {
            debug!(
                index = utterance.index,
                chunks = chunks.len(),
                "Re-joined oversized utterance"
            );
        }

        Ok(AudioClip::new(
            utterance.index,
            data,
            self.speech.output_format(),
        ))
    }

    async fn synthesize_chunk(
        &self,
        index: usize,
        text: &str,
        voice: &VoiceId,
    ) -> Result<SynthesisResult, ApplicationError> {
        match self.speech.synthesize(text.to_string(), voice.clone()).await {
            Ok(result) => Ok(result),
            Err(ApplicationError::RateLimited) => {
                warn!(index, "Synthesis rate-limited, retrying once after backoff");
                tokio::time::sleep(Duration::from_millis(self.options.retry_backoff_ms)).await;
                self.speech
                    .synthesize(text.to_string(), voice.clone())
                    .await
                    .map_err(|e| synthesis_failed(index, &e))
            },
            Err(e) if e.is_retryable() && voice != &self.narrator_voice => {
                warn!(
                    index,
                    voice = %voice,
                    error = %e,
                    "Synthesis failed, retrying once with the narrator voice"
                );
                self.speech
                    .synthesize(text.to_string(), self.narrator_voice.clone())
                    .await
                    .map_err(|retry_err| synthesis_failed(index, &retry_err))
            },
            Err(e) => Err(synthesis_failed(index, &e)),
        }
    }

    /// Check if the speech service is available
    pub async fn is_available(&self) -> bool {
        self.speech.is_available().await
    }
}

fn synthesis_failed(index: usize, source: &ApplicationError) -> ApplicationError {
    ApplicationError::SynthesisFailed {
        index,
        message: source.to_string(),
    }
}

/// Split text into chunks no longer than `max_chars`, preferring sentence
/// boundaries, then whitespace; a single unbroken run longer than the
/// limit is split at character boundaries. Never drops content.
fn split_for_synthesis(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();

        if current_chars + sentence_chars > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current).trim().to_string());
            current_chars = 0;
        }

        if sentence_chars > max_chars {
            // Sentence alone exceeds the limit: fall back to hard splits
            for piece in hard_split(sentence, max_chars) {
                chunks.push(piece);
            }
            continue;
        }

        current.push_str(sentence);
        current_chars += sentence_chars;
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks.retain(|c| !c.is_empty());
    chunks
}

/// Iterate sentences including their terminators and trailing whitespace
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            // Consume any run of terminators and following whitespace
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if matches!(next, '.' | '!' | '?') || next.is_whitespace() {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            sentences.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn hard_split(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

//! Utterances and speaker traits
//!
//! An utterance is one attributed line of dialogue or narration extracted
//! from the input text. Utterances are immutable once parsed; their index
//! defines playback order.

use serde::{Deserialize, Serialize};

use crate::value_objects::Speaker;

/// Vocal traits inferred for a speaker by character extraction.
///
/// Every field is optional; extraction replies routinely omit some or all
/// of them. The vocabulary (gender, age, accent, tone, style) matches the
/// labels carried by the voice registry, which is what makes trait-based
/// casting possible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerTraits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl SpeakerTraits {
    /// Traits with no information at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether any trait is present
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.age.is_none()
            && self.accent.is_none()
            && self.tone.is_none()
            && self.style.is_none()
    }

    /// Builder-style setter for gender
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Builder-style setter for age
    #[must_use]
    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    /// Builder-style setter for accent
    #[must_use]
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Builder-style setter for tone
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }
}

/// One attributed line of dialogue or narration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// 0-based position defining playback order
    pub index: usize,
    /// Who speaks this line
    pub speaker: Speaker,
    /// The spoken text (non-empty)
    pub text: String,
    /// Vocal traits inferred for the speaker (may be empty)
    #[serde(default)]
    pub traits: SpeakerTraits,
}

impl Utterance {
    /// Create an utterance
    pub fn new(index: usize, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            index,
            speaker,
            text: text.into(),
            traits: SpeakerTraits::empty(),
        }
    }

    /// Create a narrator utterance covering the given text. Used as the
    /// graceful-degradation result when extraction yields nothing usable.
    pub fn narration(text: impl Into<String>) -> Self {
        Self::new(0, Speaker::narrator(), text)
    }

    /// Attach inferred traits
    #[must_use]
    pub fn with_traits(mut self, traits: SpeakerTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Length of the spoken text in characters
    pub fn text_chars(&self) -> usize {
        self.text.chars().count()
    }
}

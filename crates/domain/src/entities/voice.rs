//! Voice catalogue and casting table
//!
//! The registry is a fixed catalogue of the synthesis service's voices and
//! their known trait labels, constructed once at startup and passed into
//! the casting step. Registry order matters: casting ties break toward the
//! earliest matching entry, which keeps assignment deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::SpeakerTraits;
use crate::value_objects::{Speaker, VoiceId};

/// Casting table for one request: each distinct speaker maps to exactly
/// one voice, resolved once and never re-resolved mid-request.
pub type VoiceAssignment = BTreeMap<Speaker, VoiceId>;

/// One voice offered by the synthesis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Provider-assigned voice identifier
    pub id: VoiceId,
    /// Human-readable name
    pub name: String,
    /// Trait labels; same vocabulary as `SpeakerTraits`, which is what
    /// makes trait-based casting a straight field-by-field comparison
    #[serde(default)]
    pub labels: SpeakerTraits,
}

impl VoiceInfo {
    /// Create a voice with empty labels
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: VoiceId::new(id),
            name: name.into(),
            labels: SpeakerTraits::empty(),
        }
    }

    /// Attach trait labels
    #[must_use]
    pub fn with_labels(mut self, labels: SpeakerTraits) -> Self {
        self.labels = labels;
        self
    }
}

/// The catalogue of voices available for casting
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    voices: Vec<VoiceInfo>,
    narrator: VoiceId,
}

impl VoiceRegistry {
    /// Create a registry from a voice list and a narrator fallback
    pub fn new(voices: Vec<VoiceInfo>, narrator: VoiceId) -> Self {
        Self { voices, narrator }
    }

    /// The built-in catalogue: a spread of the speech service's premade
    /// voices covering both genders, three age bands, and several accents
    /// and tones, so typical extraction traits always have a match.
    pub fn builtin() -> Self {
        let voices = vec![
            voice("21m00Tcm4TlvDq8ikWAM", "Rachel", "female", "young", "american", "calm"),
            voice("JBFqnCBsd6RMkjVDRZzb", "George", "male", "middle-aged", "british", "warm"),
            voice("ErXwobaYiN019PkySvjV", "Antoni", "male", "young", "american", "casual"),
            voice("AZnzlk1XvdvUeBnXmlld", "Domi", "female", "young", "american", "excited"),
            voice("VR6AewLTigWG4xSOukaG", "Arnold", "male", "middle-aged", "american", "formal"),
            voice("ThT5KcBeYPX3keUQqHPh", "Dorothy", "female", "young", "british", "pleasant"),
            voice("ZQe5CZNOzWyzPSCn5a3c", "James", "male", "elderly", "australian", "calm"),
            voice("Xb7hH8MSUJpSbSDYk0k2", "Alice", "female", "middle-aged", "british", "formal"),
            voice("D38z5RcWu1voky8WS1ja", "Fin", "male", "elderly", "irish", "gruff"),
            voice("XrExE9yKIg1WjnnlVkGX", "Matilda", "female", "middle-aged", "american", "friendly"),
        ];
        // Rachel doubles as the narrator fallback
        Self::new(voices, VoiceId::new("21m00Tcm4TlvDq8ikWAM"))
    }

    /// Voices in registry order
    pub fn voices(&self) -> &[VoiceInfo] {
        &self.voices
    }

    /// The fixed fallback voice for unmatched or low-confidence speakers
    pub fn narrator(&self) -> &VoiceId {
        &self.narrator
    }

    /// Look up a voice by its identifier
    pub fn get(&self, id: &VoiceId) -> Option<&VoiceInfo> {
        self.voices.iter().find(|v| &v.id == id)
    }

    /// Number of voices in the catalogue
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Check if the catalogue is empty
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

fn voice(id: &str, name: &str, gender: &str, age: &str, accent: &str, tone: &str) -> VoiceInfo {
    VoiceInfo::new(id, name).with_labels(
        SpeakerTraits::empty()
            .with_gender(gender)
            .with_age(age)
            .with_accent(accent)
            .with_tone(tone),
    )
}

//! Speaker identity
//!
//! Speakers are free-form labels produced by character extraction
//! ("Alice", "Old Fisherman", "Narrator"). Comparison is
//! whitespace-trimmed and case-insensitive so that "alice" and "Alice "
//! in the same reply resolve to one character.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved identity for unattributed or fallback narration
pub const NARRATOR: &str = "Narrator";

/// A speaker identity extracted from the input text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speaker(String);

impl Speaker {
    /// Create a speaker from a raw label, trimming surrounding whitespace.
    /// Empty labels become the narrator.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            Self::narrator()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The fallback narrator identity
    pub fn narrator() -> Self {
        Self(NARRATOR.to_string())
    }

    /// The display label as extracted
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the narrator identity
    pub fn is_narrator(&self) -> bool {
        self.0.eq_ignore_ascii_case(NARRATOR)
    }

    /// Canonical key used for equality, hashing, and map ordering
    fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for Speaker {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Speaker {}

impl PartialOrd for Speaker {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Speaker {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl std::hash::Hash for Speaker {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Speaker {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let speaker = Speaker::new("  Alice  ");
        assert_eq!(speaker.as_str(), "Alice");
    }

    #[test]
    fn empty_label_becomes_narrator() {
        let speaker = Speaker::new("   ");
        assert!(speaker.is_narrator());
        assert_eq!(speaker.as_str(), NARRATOR);
    }

    #[test]
    fn equality_is_case_insensitive() {
        assert_eq!(Speaker::new("alice"), Speaker::new("ALICE"));
        assert_ne!(Speaker::new("alice"), Speaker::new("bob"));
    }

    #[test]
    fn narrator_matches_any_case() {
        assert!(Speaker::new("narrator").is_narrator());
        assert!(Speaker::new("NARRATOR").is_narrator());
        assert!(!Speaker::new("Alice").is_narrator());
    }

    #[test]
    fn display_preserves_original_casing() {
        let speaker = Speaker::new("Old Fisherman");
        assert_eq!(speaker.to_string(), "Old Fisherman");
    }

    #[test]
    fn ordering_is_case_insensitive() {
        let mut speakers = vec![Speaker::new("bob"), Speaker::new("Alice")];
        speakers.sort();
        assert_eq!(speakers[0].as_str(), "Alice");
    }
}

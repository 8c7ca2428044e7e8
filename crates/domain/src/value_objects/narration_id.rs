//! Narration request identifier

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for one narration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrationId(Uuid);

impl NarrationId {
    /// Create a new random narration ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a narration ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a narration ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NarrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NarrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NarrationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

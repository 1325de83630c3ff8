//! Identity types for participants and configuration-declared definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a participant present in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    /// Create a new participant ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant:{}", self.0)
    }
}

/// Identifier for a definition (airdrop type, event, material, effect) named in configuration
///
/// Uses a string-based ID so RON files can reference definitions by key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefId(pub String);

impl DefId {
    /// Create a new definition ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DefId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DefId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for DefId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_participant_id() {
        let id = ParticipantId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "participant:42");
    }

    #[test]
    fn test_def_id() {
        let id = DefId::new("legendary");
        assert_eq!(id.as_str(), "legendary");
        assert_eq!(format!("{}", id), "legendary");
    }

    #[test]
    fn test_def_id_lookup_by_str() {
        let mut map = IndexMap::new();
        map.insert(DefId::new("suns_wrath"), 1);
        assert_eq!(map.get("suns_wrath"), Some(&1));
    }

    #[test]
    fn test_def_id_ron_is_plain_string() {
        let id: DefId = ron::from_str("\"mystic\"").unwrap();
        assert_eq!(id, DefId::new("mystic"));
    }
}

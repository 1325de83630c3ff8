//! Error types for windfall-engine
//!
//! Per-entry problems (unknown material, bad enchant string) never surface
//! here; the assembler records them as skips. These errors describe a whole
//! cycle or manual trigger that produced no content.

use thiserror::Error;
use windfall_script::MessageTable;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the content engine
#[derive(Debug, Error)]
pub enum Error {
    /// A catalog or definition the cycle needs is absent or empty
    #[error("configuration gap: {0}")]
    ConfigurationGap(String),

    /// No valid column found within the retry budget
    #[error("no valid location in world '{world}' after {attempts} attempts")]
    LocationUnavailable { world: String, attempts: usize },

    /// A manual trigger named an unknown key
    #[error("{kind} '{key}' does not exist")]
    NotFound { kind: &'static str, key: String },

    /// The engine has been shut down
    #[error("engine is stopped")]
    EngineStopped,

    /// Scheduler error
    #[error("scheduler error: {0}")]
    Scheduler(#[from] windfall_core::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Script(#[from] windfall_script::Error),
}

impl Error {
    /// Create a NotFound error
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Text to show the participant who issued a failing manual trigger
    pub fn user_message(&self, messages: &MessageTable) -> String {
        match self {
            Error::NotFound { kind, key } => messages.format("general.not_found", &[kind, key]),
            Error::LocationUnavailable { .. } => messages.format("airdrop.failed", &[]),
            other => windfall_script::colorize(&format!("&c{}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windfall_script::strip_colors;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("Event", "tea_party");
        assert_eq!(err.to_string(), "Event 'tea_party' does not exist");
    }

    #[test]
    fn test_user_message() {
        let messages = MessageTable::with_defaults();
        let err = Error::not_found("Airdrop type", "ancient");
        assert_eq!(
            strip_colors(&err.user_message(&messages)),
            "Airdrop type 'ancient' does not exist!"
        );
        assert_eq!(
            strip_colors(&Error::EngineStopped.user_message(&messages)),
            "engine is stopped"
        );
    }
}

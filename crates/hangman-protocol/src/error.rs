//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. A
//! `ProtocolError` always means a value could not be built, parsed,
//! encoded or decoded; it never describes gameplay.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing fields, or a
    /// value that violates a type's invariants (e.g. a word with digits).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A word must be non-empty and contain only ASCII letters.
    #[error("invalid word {0:?}: only letters A-Z are allowed")]
    InvalidWord(String),

    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),

    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    #[error("unknown hint type {0:?}")]
    UnknownHintType(String),
}

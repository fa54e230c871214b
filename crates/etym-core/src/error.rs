//! Core error types for etym-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of the dual-graph etymology model: missing keys, malformed
//! keys, positional length mismatches, and structural violations of the two
//! graphs.

use thiserror::Error;

/// Core errors produced by the etym-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A language key is not present in the store.
    #[error("language not found: '{name}'")]
    LanguageNotFound { name: String },

    /// A root key is not present in the store.
    #[error("root not found: '{key}'")]
    RootNotFound { key: String },

    /// A text or `<gloss>` lookup inside a language's vocabulary matched
    /// zero roots, or more than one.
    #[error("lookup '{query}' in language '{language}' matched {matches} roots, expected exactly 1")]
    LookupNotFound {
        language: String,
        query: String,
        matches: usize,
    },

    /// A key could not be constructed or parsed.
    #[error("malformed key '{input}': {reason}")]
    MalformedKey { input: String, reason: String },

    /// Positional pairing of two lists of different lengths.
    #[error("length mismatch: {expected} {what} but {found} sources")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A language already has a different direct source.
    #[error("language '{language}' already descends from '{existing}', refusing second source '{requested}'")]
    ConflictingSource {
        language: String,
        existing: String,
        requested: String,
    },

    /// Adding the edge would create a self-loop or a cycle.
    #[error("edge '{from}' -> '{to}' would create a cycle in the {graph} graph")]
    CycleDetected {
        graph: &'static str,
        from: String,
        to: String,
    },
}

impl CoreError {
    /// True for the NotFound family: missing languages, missing roots, and
    /// failed (empty or ambiguous) vocabulary lookups.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::LanguageNotFound { .. }
                | CoreError::RootNotFound { .. }
                | CoreError::LookupNotFound { .. }
        )
    }
}

//! Storage error types for etym-storage.
//!
//! [`StorageError`] covers the failure modes of the document layer: file I/O,
//! JSON (de)serialization, malformed or contradictory documents, and core
//! errors raised while replaying a document into an
//! [`EtymologyGraph`](etym_core::EtymologyGraph).

use etym_core::CoreError;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a document file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Replaying the document violated a core invariant.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The document's shape is inconsistent with itself.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// The document declares a version this build does not read.
    #[error("unsupported document version {found}, expected {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

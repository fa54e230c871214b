//! The [`DocumentStore`] trait defining where etymology documents live.
//!
//! Backends differ only in where the JSON goes; both run every save through
//! [`to_document`](crate::convert::to_document) and every load through
//! [`load_document`](crate::convert::load_document), so they are swappable
//! without changing callers.

use etym_core::EtymologyGraph;

use crate::document::DocumentForm;
use crate::error::StorageError;

/// The persistence contract for an etymology store.
///
/// Synchronous, matching the single-threaded core.
pub trait DocumentStore {
    /// Loads the stored document into a fresh graph. A store that has
    /// never been saved to yields an empty graph.
    fn load(&self) -> Result<EtymologyGraph, StorageError>;

    /// Overwrites the stored document with `graph` in the given shape.
    fn save(&mut self, graph: &EtymologyGraph, form: DocumentForm) -> Result<(), StorageError>;
}

//! In-memory implementation of [`DocumentStore`].
//!
//! [`InMemoryStore`] keeps the last saved document as a JSON value. It goes
//! through the same wire types as the file backend, which makes it the
//! backend of choice for round-trip tests.

use etym_core::EtymologyGraph;
use tracing::debug;

use crate::convert::{load_document, to_document};
use crate::document::{DocumentForm, EtymologyDocument};
use crate::error::StorageError;
use crate::traits::DocumentStore;

/// Document store backed by a `serde_json::Value`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    document: Option<serde_json::Value>,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a raw JSON document.
    pub fn from_value(document: serde_json::Value) -> Self {
        InMemoryStore {
            document: Some(document),
        }
    }

    /// The raw JSON of the last save, if any.
    pub fn document(&self) -> Option<&serde_json::Value> {
        self.document.as_ref()
    }
}

impl DocumentStore for InMemoryStore {
    fn load(&self) -> Result<EtymologyGraph, StorageError> {
        let Some(value) = &self.document else {
            return Ok(EtymologyGraph::new());
        };
        let doc: EtymologyDocument = serde_json::from_value(value.clone())?;
        load_document(&doc)
    }

    fn save(&mut self, graph: &EtymologyGraph, form: DocumentForm) -> Result<(), StorageError> {
        let doc = to_document(graph, form);
        self.document = Some(serde_json::to_value(&doc)?);
        debug!(%form, "saved document in memory");
        Ok(())
    }
}

//! JSON-file implementation of [`DocumentStore`].

use std::fs;
use std::path::{Path, PathBuf};

use etym_core::EtymologyGraph;
use tracing::{debug, info};

use crate::convert::{load_document, to_document};
use crate::document::{DocumentForm, EtymologyDocument};
use crate::error::StorageError;
use crate::traits::DocumentStore;

/// Document store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Binds the store to `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document without rebuilding a graph.
    pub fn read_document(&self) -> Result<EtymologyDocument, StorageError> {
        let text = fs::read_to_string(&self.path)?;
        EtymologyDocument::from_json(&text)
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<EtymologyGraph, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "document file missing, starting empty");
            return Ok(EtymologyGraph::new());
        }
        let doc = self.read_document()?;
        load_document(&doc)
    }

    fn save(&mut self, graph: &EtymologyGraph, form: DocumentForm) -> Result<(), StorageError> {
        let text = to_document(graph, form).to_json_pretty()?;
        fs::write(&self.path, text)?;
        info!(path = %self.path.display(), %form, "wrote etymology document");
        Ok(())
    }
}

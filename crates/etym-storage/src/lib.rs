//! Persistence for etymology stores.
//!
//! Converts an [`EtymologyGraph`](etym_core::EtymologyGraph) to and from two
//! JSON document shapes, and provides the [`DocumentStore`] backends that
//! hold those documents.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`document`]: the wire types for both shapes and the node-link encoding
//! - [`convert`]: graph to document and document to graph
//! - [`traits`]: DocumentStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`file`]: JsonFileStore implementation

pub mod convert;
pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export key types for ergonomic use.
pub use convert::{
    detect_form, load_dict_form, load_document, load_graph_form, to_dict_document, to_document,
    to_graph_document,
};
pub use document::{DocumentForm, EtymologyDocument, NodeLinkGraph, DOCUMENT_VERSION};
pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::DocumentStore;

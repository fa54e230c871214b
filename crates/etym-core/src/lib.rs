//! Dual-graph data model for historical-linguistic etymology.
//!
//! Languages are related by descent and roots by derivation; each relation
//! lives in its own directed graph inside an [`EtymologyGraph`]. Languages
//! and roots are read through the borrowed [`Lang`] and [`Root`] views.

pub mod error;
pub mod graph;
pub mod key;
pub mod lang;
pub mod root;

/// Open-ended attribute bag attached to languages and roots.
pub type Info = serde_json::Map<String, serde_json::Value>;

// Re-export commonly used types
pub use error::CoreError;
pub use graph::EtymologyGraph;
pub use key::{LangKey, RootKey};
pub use lang::Lang;
pub use root::Root;

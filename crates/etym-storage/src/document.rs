//! JSON document shapes for persisted etymology data.
//!
//! Two interchangeable shapes share one top-level structure:
//! - **Graph form**: relationships live in the node-link encodings
//!   `lang_graph` and `root_graph`; the `langs`/`roots` lists carry only
//!   `info`.
//! - **Dict form**: `lang_graph`/`root_graph` are `null`; each language
//!   record names its `source` and each root record its `sources`.
//!
//! Written documents also carry a `format` discriminator and a `version`.
//! Both are optional on read so that files predating them still load.

use std::fmt;
use std::str::FromStr;

use etym_core::Info;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Version number written into every document.
pub const DOCUMENT_VERSION: u32 = 1;

/// Which of the two document shapes to produce or expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentForm {
    /// Relationships encoded as node-link graphs.
    #[default]
    Graph,
    /// Relationships encoded as per-record source fields.
    Dict,
}

impl fmt::Display for DocumentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentForm::Graph => f.write_str("graph"),
            DocumentForm::Dict => f.write_str("dict"),
        }
    }
}

impl FromStr for DocumentForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graph" => Ok(DocumentForm::Graph),
            "dict" => Ok(DocumentForm::Dict),
            _ => Err(format!("invalid document form '{}', expected graph/dict", s)),
        }
    }
}

/// Top-level persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtymologyDocument {
    /// Declared shape. Absent in legacy files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DocumentForm>,
    /// Declared version. Absent in legacy files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Language-descent graph (graph form only).
    #[serde(default)]
    pub lang_graph: Option<NodeLinkGraph>,
    /// Root-derivation graph (graph form only).
    #[serde(default)]
    pub root_graph: Option<NodeLinkGraph>,
    #[serde(default)]
    pub langs: Vec<LangRecord>,
    #[serde(default)]
    pub roots: Vec<RootRecord>,
}

impl EtymologyDocument {
    /// Parses a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the document as JSON indented by four spaces.
    pub fn to_json_pretty(&self) -> Result<String, StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| StorageError::MalformedDocument {
            reason: format!("non-UTF-8 output: {e}"),
        })
    }
}

/// A directed graph as a node list plus an edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    #[serde(default = "default_directed")]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    /// Graph-level attributes, passed through untouched.
    #[serde(default)]
    pub graph: serde_json::Map<String, serde_json::Value>,
    pub nodes: Vec<NodeLinkNode>,
    #[serde(default, alias = "links")]
    pub edges: Vec<NodeLinkEdge>,
}

fn default_directed() -> bool {
    true
}

impl NodeLinkGraph {
    /// An empty directed, simple graph.
    pub fn new() -> Self {
        NodeLinkGraph {
            directed: true,
            multigraph: false,
            graph: serde_json::Map::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl Default for NodeLinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    pub source: String,
    pub target: String,
}

/// One language. `source` is written only in dict form, as `null` when the
/// language has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub source: Option<Option<String>>,
    #[serde(default)]
    pub info: Option<Info>,
}

/// One root, keyed by its canonical `"lang text gloss"` string. `sources` is
/// written only in dict form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootRecord {
    pub root: String,
    #[serde(
        default,
        alias = "source",
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub sources: Option<Option<Vec<String>>>,
    #[serde(default)]
    pub info: Option<Info>,
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

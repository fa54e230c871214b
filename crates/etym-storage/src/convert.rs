//! Conversions between [`EtymologyGraph`] and [`EtymologyDocument`].
//!
//! [`to_graph_document`] and [`to_dict_document`] walk a store to produce
//! either shape. [`load_document`] picks the shape from the document's
//! `format` field (or, for legacy files, from which fields are populated) and
//! rebuilds the store through the same validated mutation methods callers
//! use, so every edge in either encoding is restored.

use std::fmt::Display;

use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;
use tracing::{debug, info, warn};

use etym_core::{EtymologyGraph, LangKey, RootKey};

use crate::document::{
    DocumentForm, EtymologyDocument, LangRecord, NodeLinkEdge, NodeLinkGraph, NodeLinkNode,
    RootRecord, DOCUMENT_VERSION,
};
use crate::error::StorageError;

/// Produces the document shape requested by `form`.
pub fn to_document(graph: &EtymologyGraph, form: DocumentForm) -> EtymologyDocument {
    match form {
        DocumentForm::Graph => to_graph_document(graph),
        DocumentForm::Dict => to_dict_document(graph),
    }
}

/// Graph form: relationships in node-link encodings, attributes in the lists.
pub fn to_graph_document(graph: &EtymologyGraph) -> EtymologyDocument {
    let langs = graph
        .languages()
        .map(|lang| LangRecord {
            name: lang.name().to_string(),
            source: None,
            info: lang.info().cloned(),
        })
        .collect();
    let roots = graph
        .roots()
        .map(|root| RootRecord {
            root: root.key().to_string(),
            sources: None,
            info: root.info().cloned(),
        })
        .collect();

    EtymologyDocument {
        format: Some(DocumentForm::Graph),
        version: Some(DOCUMENT_VERSION),
        lang_graph: Some(encode_node_link(graph.descent())),
        root_graph: Some(encode_node_link(graph.derivation())),
        langs,
        roots,
    }
}

/// Dict form: relationships as explicit per-record source fields.
pub fn to_dict_document(graph: &EtymologyGraph) -> EtymologyDocument {
    let langs = graph
        .languages()
        .map(|lang| LangRecord {
            name: lang.name().to_string(),
            source: Some(lang.source().map(ToString::to_string)),
            info: lang.info().cloned(),
        })
        .collect();
    let roots = graph
        .roots()
        .map(|root| RootRecord {
            root: root.key().to_string(),
            sources: Some(Some(
                root.sources().into_iter().map(ToString::to_string).collect(),
            )),
            info: root.info().cloned(),
        })
        .collect();

    EtymologyDocument {
        format: Some(DocumentForm::Dict),
        version: Some(DOCUMENT_VERSION),
        lang_graph: None,
        root_graph: None,
        langs,
        roots,
    }
}

/// Determines which shape a document is in.
///
/// A declared `format` must agree with the populated fields. Without one,
/// both graphs present means graph form and both absent means dict form;
/// exactly one present is rejected rather than guessed at.
pub fn detect_form(doc: &EtymologyDocument) -> Result<DocumentForm, StorageError> {
    if let Some(version) = doc.version {
        if version != DOCUMENT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: version,
                supported: DOCUMENT_VERSION,
            });
        }
    }

    let has_graphs = (doc.lang_graph.is_some(), doc.root_graph.is_some());
    match (doc.format, has_graphs) {
        (Some(DocumentForm::Graph), (true, true)) => Ok(DocumentForm::Graph),
        (Some(DocumentForm::Graph), _) => Err(StorageError::MalformedDocument {
            reason: "graph form requires both lang_graph and root_graph".into(),
        }),
        (Some(DocumentForm::Dict), (false, false)) => Ok(DocumentForm::Dict),
        (Some(DocumentForm::Dict), _) => Err(StorageError::MalformedDocument {
            reason: "dict form must not carry lang_graph or root_graph".into(),
        }),
        (None, (true, true)) => {
            warn!("document has no format field, treating as graph form");
            Ok(DocumentForm::Graph)
        }
        (None, (false, false)) => {
            warn!("document has no format field, treating as dict form");
            Ok(DocumentForm::Dict)
        }
        (None, _) => Err(StorageError::MalformedDocument {
            reason: "exactly one of lang_graph and root_graph is present".into(),
        }),
    }
}

/// Rebuilds a store from a document of either shape.
pub fn load_document(doc: &EtymologyDocument) -> Result<EtymologyGraph, StorageError> {
    match detect_form(doc)? {
        DocumentForm::Graph => load_graph_form(doc),
        DocumentForm::Dict => load_dict_form(doc),
    }
}

/// Rebuilds a store from a graph-form document.
///
/// Nodes come first, then every edge through the validated insertion
/// methods, then `info` is set from the attribute lists by key, exactly as
/// written. Records whose key has no graph node still create one.
pub fn load_graph_form(doc: &EtymologyDocument) -> Result<EtymologyGraph, StorageError> {
    let lang_graph = require_graph(doc.lang_graph.as_ref(), "lang_graph")?;
    let root_graph = require_graph(doc.root_graph.as_ref(), "root_graph")?;

    let mut graph = EtymologyGraph::new();

    for node in &lang_graph.nodes {
        graph.add_language(LangKey::new(node.id.as_str())?, None, None)?;
    }
    for edge in &lang_graph.edges {
        let source = LangKey::new(edge.source.as_str())?;
        let child = LangKey::new(edge.target.as_str())?;
        graph.add_language(child, Some(source), None)?;
    }

    for node in &root_graph.nodes {
        graph.add_root(RootKey::parse(&node.id)?, None, None)?;
    }
    for edge in &root_graph.edges {
        let source = RootKey::parse(&edge.source)?;
        let derived = RootKey::parse(&edge.target)?;
        graph.add_root(derived, Some(&[source]), None)?;
    }

    for record in &doc.langs {
        if record.source.is_some() {
            debug!(language = %record.name, "ignoring per-record source in graph form");
        }
        let name = LangKey::new(record.name.as_str())?;
        graph.add_language(name.clone(), None, None)?;
        graph.set_language_info(&name, record.info.clone())?;
    }
    for record in &doc.roots {
        let key = RootKey::parse(&record.root)?;
        graph.add_root(key.clone(), None, None)?;
        graph.set_root_info(&key, record.info.clone())?;
    }

    log_loaded(&graph, DocumentForm::Graph);
    Ok(graph)
}

/// Rebuilds a store from a dict-form document.
///
/// Each record is replayed through [`EtymologyGraph::add_language`] or
/// [`EtymologyGraph::add_root`] with its own sources, and its `info` is set
/// exactly as written. Absent and `null` source fields both mean "no source".
pub fn load_dict_form(doc: &EtymologyDocument) -> Result<EtymologyGraph, StorageError> {
    let mut graph = EtymologyGraph::new();

    for record in &doc.langs {
        let name = LangKey::new(record.name.as_str())?;
        let source = match record.source.as_ref().and_then(Option::as_deref) {
            Some(source) => Some(LangKey::new(source)?),
            None => None,
        };
        graph.add_language(name.clone(), source, None)?;
        graph.set_language_info(&name, record.info.clone())?;
    }

    for record in &doc.roots {
        let key = RootKey::parse(&record.root)?;
        let sources = record
            .sources
            .as_ref()
            .and_then(Option::as_ref)
            .map(|sources| {
                sources
                    .iter()
                    .map(|source| RootKey::parse(source))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        graph.add_root(key.clone(), sources.as_deref(), None)?;
        graph.set_root_info(&key, record.info.clone())?;
    }

    log_loaded(&graph, DocumentForm::Dict);
    Ok(graph)
}

fn require_graph<'d>(
    encoded: Option<&'d NodeLinkGraph>,
    field: &str,
) -> Result<&'d NodeLinkGraph, StorageError> {
    let encoded = encoded.ok_or_else(|| StorageError::MalformedDocument {
        reason: format!("{field} is missing"),
    })?;
    if !encoded.directed {
        return Err(StorageError::MalformedDocument {
            reason: format!("{field} must be directed"),
        });
    }
    if encoded.multigraph {
        return Err(StorageError::MalformedDocument {
            reason: format!("{field} must not be a multigraph"),
        });
    }
    Ok(encoded)
}

/// Encodes a graph as nodes plus `source`/`target` edges, in index order.
fn encode_node_link<N: Display>(graph: &StableGraph<N, (), Directed, u32>) -> NodeLinkGraph {
    let nodes = graph
        .node_indices()
        .map(|idx| NodeLinkNode {
            id: graph[idx].to_string(),
        })
        .collect();
    let edges = graph
        .edge_references()
        .map(|edge| NodeLinkEdge {
            source: graph[edge.source()].to_string(),
            target: graph[edge.target()].to_string(),
        })
        .collect();
    NodeLinkGraph {
        nodes,
        edges,
        ..NodeLinkGraph::new()
    }
}

fn log_loaded(graph: &EtymologyGraph, form: DocumentForm) {
    info!(
        %form,
        languages = graph.language_count(),
        roots = graph.root_count(),
        descent_edges = graph.descent_edge_count(),
        derivation_edges = graph.derivation_edge_count(),
        "loaded etymology document"
    );
}

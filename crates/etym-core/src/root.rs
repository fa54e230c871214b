//! Borrowed view of a root in an [`EtymologyGraph`].

use std::fmt;

use petgraph::Direction;

use crate::graph::{EtymologyGraph, RootEntry};
use crate::key::{LangKey, RootKey};
use crate::lang::Lang;
use crate::Info;

/// A word or affix at one point in time, bound to its key and the store.
#[derive(Clone, Copy)]
pub struct Root<'g> {
    graph: &'g EtymologyGraph,
    key: &'g RootKey,
    entry: &'g RootEntry,
}

impl<'g> Root<'g> {
    pub(crate) fn new(graph: &'g EtymologyGraph, key: &'g RootKey, entry: &'g RootEntry) -> Self {
        Root { graph, key, entry }
    }

    /// The structured key.
    pub fn key(&self) -> &'g RootKey {
        self.key
    }

    /// Key of the language this root belongs to.
    pub fn lang(&self) -> &'g LangKey {
        self.key.lang()
    }

    /// The written form of the root.
    pub fn text(&self) -> &'g str {
        self.key.text()
    }

    /// The gloss (meaning) of the root.
    pub fn gloss(&self) -> &'g str {
        self.key.gloss()
    }

    /// The attribute bag, if one was supplied.
    pub fn info(&self) -> Option<&'g Info> {
        self.entry.info.as_ref()
    }

    /// The language view, or `None` if the language was never registered.
    pub fn language(&self) -> Option<Lang<'g>> {
        self.graph.language(self.key.lang()).ok()
    }

    /// Direct etyma, in the order their edges were added.
    pub fn sources(&self) -> Vec<&'g RootKey> {
        self.graph.root_neighbors(self.entry.node, Direction::Incoming)
    }

    /// Roots derived directly from this one, sorted by key.
    pub fn children(&self) -> Vec<&'g RootKey> {
        let mut children = self.graph.root_neighbors(self.entry.node, Direction::Outgoing);
        children.sort();
        children
    }

    /// Views of the direct etyma.
    pub fn source_roots(&self) -> Vec<Root<'g>> {
        self.sources()
            .into_iter()
            .filter_map(|key| self.graph.root_entry(key))
            .map(|(key, entry)| Root::new(self.graph, key, entry))
            .collect()
    }

    /// True iff the root has more than one etymon.
    pub fn is_compound(&self) -> bool {
        self.sources().len() > 1
    }

    /// Whether the root continues its single etymon across the direct
    /// parent-language edge.
    ///
    /// `None` when no etymon is recorded; `Some(false)` for compounds.
    pub fn is_inherited(&self) -> Option<bool> {
        let sources = self.sources();
        match sources.as_slice() {
            [] => None,
            [etymon] => {
                let parent = self.language().and_then(|lang| lang.source());
                Some(parent == Some(etymon.lang()))
            }
            _ => Some(false),
        }
    }
}

impl fmt::Debug for Root<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("key", &self.key.to_string())
            .field("info", &self.entry.info)
            .finish()
    }
}

impl fmt::Display for Root<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.key, f)
    }
}

//! EtymologyGraph: the dual-graph store tying together languages and roots.
//!
//! [`EtymologyGraph`] is the single entry point for constructing and querying
//! etymological data. It owns two separate `StableGraph` instances:
//! - **Descent graph** (`StableGraph<LangKey, ()>`): an edge `source -> child`
//!   means `child` is a direct continuation of `source`. Each language has at
//!   most one direct source and the graph is acyclic.
//! - **Derivation graph** (`StableGraph<RootKey, ()>`): an edge
//!   `etymon -> derived` means `derived` was formed from `etymon`. A derived
//!   root may have several etyma (compounding). The graph is acyclic.
//!
//! Alongside the graphs, two insertion-ordered maps hold the per-key entries
//! (node index plus `info` attribute bag). Both graphs are private; all
//! mutations go through `EtymologyGraph` methods, which validate structure
//! before touching anything. Reads go through the borrowed [`Lang`] and
//! [`Root`] views, so every relationship change is immediately visible
//! through any view taken afterwards.
//!
//! Bulk operations validate positional lengths up front and then apply
//! element-wise. A structural error part-way through leaves the earlier
//! elements applied.

use indexmap::IndexMap;
use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use tracing::debug;

use crate::error::CoreError;
use crate::key::{LangKey, RootKey};
use crate::lang::Lang;
use crate::root::Root;
use crate::Info;

/// Language-descent graph type.
pub type DescentGraph = StableGraph<LangKey, (), Directed, u32>;

/// Root-derivation graph type.
pub type DerivationGraph = StableGraph<RootKey, (), Directed, u32>;

/// Per-language entry: where the node lives and its attributes.
#[derive(Debug, Clone)]
pub(crate) struct LangEntry {
    pub(crate) node: NodeIndex<u32>,
    pub(crate) info: Option<Info>,
}

/// Per-root entry: where the node lives and its attributes.
#[derive(Debug, Clone)]
pub(crate) struct RootEntry {
    pub(crate) node: NodeIndex<u32>,
    pub(crate) info: Option<Info>,
}

/// The dual-graph etymology store.
#[derive(Debug, Clone, Default)]
pub struct EtymologyGraph {
    /// Language lineage
    descent: DescentGraph,
    /// Word and affix derivation
    derivation: DerivationGraph,
    /// Language entries in insertion order
    langs: IndexMap<LangKey, LangEntry>,
    /// Root entries in insertion order
    roots: IndexMap<RootKey, RootEntry>,
}

impl EtymologyGraph {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Returns a read-only reference to the language-descent graph.
    pub fn descent(&self) -> &DescentGraph {
        &self.descent
    }

    /// Returns a read-only reference to the root-derivation graph.
    pub fn derivation(&self) -> &DerivationGraph {
        &self.derivation
    }

    /// Looks up a language view by key.
    pub fn language(&self, name: &LangKey) -> Result<Lang<'_>, CoreError> {
        self.langs
            .get_key_value(name)
            .map(|(key, entry)| Lang::new(self, key, entry))
            .ok_or_else(|| CoreError::LanguageNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a root view by key.
    pub fn root(&self, key: &RootKey) -> Result<Root<'_>, CoreError> {
        self.roots
            .get_key_value(key)
            .map(|(key, entry)| Root::new(self, key, entry))
            .ok_or_else(|| CoreError::RootNotFound {
                key: key.to_string(),
            })
    }

    /// Returns true if the language is present.
    pub fn contains_language(&self, name: &LangKey) -> bool {
        self.langs.contains_key(name)
    }

    /// Returns true if the root is present.
    pub fn contains_root(&self, key: &RootKey) -> bool {
        self.roots.contains_key(key)
    }

    /// Iterates language views in insertion order.
    pub fn languages(&self) -> impl Iterator<Item = Lang<'_>> {
        self.langs
            .iter()
            .map(move |(key, entry)| Lang::new(self, key, entry))
    }

    /// Iterates root views in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = Root<'_>> {
        self.roots
            .iter()
            .map(move |(key, entry)| Root::new(self, key, entry))
    }

    /// Number of languages.
    pub fn language_count(&self) -> usize {
        self.langs.len()
    }

    /// Number of roots.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Number of `source -> child` edges in the descent graph.
    pub fn descent_edge_count(&self) -> usize {
        self.descent.edge_count()
    }

    /// Number of `etymon -> derived` edges in the derivation graph.
    pub fn derivation_edge_count(&self) -> usize {
        self.derivation.edge_count()
    }

    // -----------------------------------------------------------------------
    // Language methods
    // -----------------------------------------------------------------------

    /// Adds a language, optionally descending from `source`.
    ///
    /// Creates `name` if absent. A non-empty `Some(info)` replaces the
    /// attribute bag of `name`; `None` or an empty map keeps whatever it had
    /// (use [`set_language_info`](Self::set_language_info) to clear it). A given `source` is created
    /// without attributes if absent (an existing source keeps its bag) and
    /// the edge `source -> name` is added once.
    ///
    /// Fails with [`CoreError::ConflictingSource`] if `name` already descends
    /// from another language, and with [`CoreError::CycleDetected`] if the
    /// edge would close a loop. Nothing is mutated on failure.
    pub fn add_language(
        &mut self,
        name: LangKey,
        source: Option<LangKey>,
        info: Option<Info>,
    ) -> Result<Lang<'_>, CoreError> {
        if let Some(source) = &source {
            self.check_descent_edge(source, &name)?;
        }

        let child = self.ensure_language(&name, info);
        if let Some(source) = source {
            let parent = self.ensure_language(&source, None);
            if self.descent.find_edge(parent, child).is_none() {
                debug!(source = %source, child = %name, "adding descent edge");
                self.descent.add_edge(parent, child, ());
            }
        }
        self.language(&name)
    }

    /// Adds every name with the same optional `source` and `info`.
    pub fn add_languages(
        &mut self,
        names: &[LangKey],
        source: Option<&LangKey>,
        info: Option<&Info>,
    ) -> Result<(), CoreError> {
        for name in names {
            self.add_language(name.clone(), source.cloned(), info.cloned())?;
        }
        Ok(())
    }

    /// Adds each name paired positionally with its own optional source.
    ///
    /// With `sources` absent this is [`add_languages`](Self::add_languages)
    /// without a source. Differing lengths fail before any mutation.
    pub fn add_languages_from(
        &mut self,
        names: &[LangKey],
        sources: Option<&[Option<LangKey>]>,
        info: Option<&Info>,
    ) -> Result<(), CoreError> {
        let Some(sources) = sources else {
            return self.add_languages(names, None, info);
        };
        if names.len() != sources.len() {
            return Err(CoreError::LengthMismatch {
                what: "names",
                expected: names.len(),
                found: sources.len(),
            });
        }
        for (name, source) in names.iter().zip(sources) {
            self.add_language(name.clone(), source.clone(), info.cloned())?;
        }
        Ok(())
    }

    /// Replaces the attribute bag of an existing language.
    pub fn set_language_info(
        &mut self,
        name: &LangKey,
        info: Option<Info>,
    ) -> Result<(), CoreError> {
        let entry = self
            .langs
            .get_mut(name)
            .ok_or_else(|| CoreError::LanguageNotFound {
                name: name.to_string(),
            })?;
        entry.info = info;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Root methods
    // -----------------------------------------------------------------------

    /// Adds a root, optionally derived from one or more etyma.
    ///
    /// Creates `key` if absent, with the same `info` rules as
    /// [`add_language`](Self::add_language). Each source is created without
    /// attributes if absent and gets one edge `source -> key`; repeated
    /// sources and repeated calls never duplicate an edge. Several sources
    /// make a compound root.
    ///
    /// Fails with [`CoreError::CycleDetected`] for a self-derivation or a
    /// loop. Nothing is mutated on failure.
    pub fn add_root(
        &mut self,
        key: RootKey,
        sources: Option<&[RootKey]>,
        info: Option<Info>,
    ) -> Result<Root<'_>, CoreError> {
        let sources = sources.unwrap_or_default();
        for source in sources {
            self.check_derivation_edge(source, &key)?;
        }

        let derived = self.ensure_root(&key, info);
        for source in sources {
            let etymon = self.ensure_root(source, None);
            if self.derivation.find_edge(etymon, derived).is_none() {
                debug!(source = %source, derived = %key, "adding derivation edge");
                self.derivation.add_edge(etymon, derived, ());
            }
        }
        self.root(&key)
    }

    /// Adds every key with the same sources (every source feeds every key)
    /// and the same optional `info`.
    pub fn add_roots(
        &mut self,
        keys: &[RootKey],
        sources: Option<&[RootKey]>,
        info: Option<&Info>,
    ) -> Result<(), CoreError> {
        for key in keys {
            self.add_root(key.clone(), sources, info.cloned())?;
        }
        Ok(())
    }

    /// Adds each key paired positionally with its own list of sources.
    ///
    /// With `source_lists` absent every key is added without sources.
    /// Differing lengths fail before any mutation.
    pub fn add_roots_from(
        &mut self,
        keys: &[RootKey],
        source_lists: Option<&[Vec<RootKey>]>,
        info: Option<&Info>,
    ) -> Result<(), CoreError> {
        let Some(source_lists) = source_lists else {
            return self.add_roots(keys, None, info);
        };
        if keys.len() != source_lists.len() {
            return Err(CoreError::LengthMismatch {
                what: "roots",
                expected: keys.len(),
                found: source_lists.len(),
            });
        }
        for (key, sources) in keys.iter().zip(source_lists) {
            self.add_root(key.clone(), Some(sources), info.cloned())?;
        }
        Ok(())
    }

    /// Replaces the attribute bag of an existing root.
    pub fn set_root_info(&mut self, key: &RootKey, info: Option<Info>) -> Result<(), CoreError> {
        let entry = self
            .roots
            .get_mut(key)
            .ok_or_else(|| CoreError::RootNotFound {
                key: key.to_string(),
            })?;
        entry.info = info;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Crate-internal queries used by the views
    // -----------------------------------------------------------------------

    /// Direct sources of a language node, smallest key first.
    pub(crate) fn language_sources(&self, node: NodeIndex<u32>) -> Vec<&LangKey> {
        let mut sources: Vec<&LangKey> = self
            .descent
            .neighbors_directed(node, Direction::Incoming)
            .map(|idx| &self.descent[idx])
            .collect();
        sources.sort();
        sources
    }

    /// Direct descendants of a language node, sorted by key.
    pub(crate) fn language_children(&self, node: NodeIndex<u32>) -> Vec<&LangKey> {
        let mut children: Vec<&LangKey> = self
            .descent
            .neighbors_directed(node, Direction::Outgoing)
            .map(|idx| &self.descent[idx])
            .collect();
        children.sort();
        children
    }

    /// Neighbors of a root node in one direction, in edge-insertion order.
    pub(crate) fn root_neighbors(&self, node: NodeIndex<u32>, dir: Direction) -> Vec<&RootKey> {
        let mut edges: Vec<_> = self.derivation.edges_directed(node, dir).collect();
        edges.sort_by_key(|edge| edge.id().index());
        edges
            .into_iter()
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                &self.derivation[other]
            })
            .collect()
    }

    /// Roots whose key embeds `lang`, in insertion order.
    ///
    /// A linear scan over all roots: O(number of roots). Callers go through
    /// [`Lang::vocabulary`], so an index keyed by language can replace this
    /// without changing them.
    pub(crate) fn roots_in_language<'g>(
        &'g self,
        lang: &'g LangKey,
    ) -> impl Iterator<Item = (&'g RootKey, &'g RootEntry)> + 'g {
        self.roots.iter().filter(move |(key, _)| key.lang() == lang)
    }

    /// Looks up a root entry by key, for views that hold only the key.
    pub(crate) fn root_entry(&self, key: &RootKey) -> Option<(&RootKey, &RootEntry)> {
        self.roots.get_key_value(key)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn ensure_language(&mut self, name: &LangKey, info: Option<Info>) -> NodeIndex<u32> {
        if let Some(entry) = self.langs.get_mut(name) {
            // An empty bag counts as not supplied.
            if let Some(info) = info.filter(|info| !info.is_empty()) {
                entry.info = Some(info);
            }
            return entry.node;
        }
        debug!(language = %name, "creating language");
        let node = self.descent.add_node(name.clone());
        self.langs.insert(name.clone(), LangEntry { node, info });
        node
    }

    fn ensure_root(&mut self, key: &RootKey, info: Option<Info>) -> NodeIndex<u32> {
        if let Some(entry) = self.roots.get_mut(key) {
            // An empty bag counts as not supplied.
            if let Some(info) = info.filter(|info| !info.is_empty()) {
                entry.info = Some(info);
            }
            return entry.node;
        }
        debug!(root = %key, "creating root");
        let node = self.derivation.add_node(key.clone());
        self.roots.insert(key.clone(), RootEntry { node, info });
        node
    }

    /// Validates `source -> child` against the single-source and acyclicity
    /// rules of the descent graph.
    ///
    /// The reachability walk is O(V + E), so a load replaying E edges costs
    /// O(E * (V + E)) in the worst case.
    fn check_descent_edge(&self, source: &LangKey, child: &LangKey) -> Result<(), CoreError> {
        let cycle = || CoreError::CycleDetected {
            graph: "descent",
            from: source.to_string(),
            to: child.to_string(),
        };
        if source == child {
            return Err(cycle());
        }
        let Some(child_entry) = self.langs.get(child) else {
            return Ok(());
        };
        if let Some(existing) = self
            .language_sources(child_entry.node)
            .into_iter()
            .find(|existing| *existing != source)
        {
            return Err(CoreError::ConflictingSource {
                language: child.to_string(),
                existing: existing.to_string(),
                requested: source.to_string(),
            });
        }
        if let Some(source_entry) = self.langs.get(source) {
            if has_path_connecting(&self.descent, child_entry.node, source_entry.node, None) {
                return Err(cycle());
            }
        }
        Ok(())
    }

    /// Validates `source -> derived` against acyclicity of the derivation
    /// graph. Same cost as [`check_descent_edge`](Self::check_descent_edge).
    fn check_derivation_edge(&self, source: &RootKey, derived: &RootKey) -> Result<(), CoreError> {
        let cycle = || CoreError::CycleDetected {
            graph: "derivation",
            from: source.to_string(),
            to: derived.to_string(),
        };
        if source == derived {
            return Err(cycle());
        }
        if let (Some(derived_entry), Some(source_entry)) =
            (self.roots.get(derived), self.roots.get(source))
        {
            if has_path_connecting(&self.derivation, derived_entry.node, source_entry.node, None) {
                return Err(cycle());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lang(name: &str) -> LangKey {
        LangKey::new(name).unwrap()
    }

    fn root(key: &str) -> RootKey {
        RootKey::parse(key).unwrap()
    }

    fn info(value: serde_json::Value) -> Info {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn lookup_returns_inserted_identity() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("p-west-omaic"), None, None).unwrap();
        graph.add_root(root("p-west-omaic kala black"), None, None).unwrap();

        let found = graph.language(&lang("p-west-omaic")).unwrap();
        assert_eq!(found.key().to_string(), "p-west-omaic");
        let found = graph.root(&root("p-west-omaic kala black")).unwrap();
        assert_eq!(found.key().to_string(), "p-west-omaic kala black");
    }

    #[test]
    fn missing_keys_are_not_found() {
        let graph = EtymologyGraph::new();
        assert!(matches!(
            graph.language(&lang("xx")),
            Err(CoreError::LanguageNotFound { .. })
        ));
        assert!(matches!(
            graph.root(&root("xx a b")),
            Err(CoreError::RootNotFound { .. })
        ));
    }

    #[test]
    fn add_root_twice_with_same_source_is_idempotent() {
        let mut graph = EtymologyGraph::new();
        let sources = [root("la pater father")];
        graph.add_root(root("it padre father"), Some(&sources), None).unwrap();
        graph.add_root(root("it padre father"), Some(&sources), None).unwrap();

        assert_eq!(graph.root_count(), 2);
        assert_eq!(graph.derivation_edge_count(), 1);
    }

    #[test]
    fn duplicate_sources_in_one_call_collapse() {
        let mut graph = EtymologyGraph::new();
        let s = root("la pater father");
        let view = graph
            .add_root(root("it padre father"), Some(&[s.clone(), s]), None)
            .unwrap();
        assert!(!view.is_compound());
        assert_eq!(graph.derivation_edge_count(), 1);
    }

    #[test]
    fn add_language_twice_with_same_source_is_idempotent() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("it"), Some(lang("la")), None).unwrap();
        graph.add_language(lang("it"), Some(lang("la")), None).unwrap();
        assert_eq!(graph.language_count(), 2);
        assert_eq!(graph.descent_edge_count(), 1);
    }

    #[test]
    fn second_language_source_is_rejected() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("en"), Some(lang("ang")), None).unwrap();

        let err = graph
            .add_language(lang("en"), Some(lang("fro")), None)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::ConflictingSource {
                language: "en".into(),
                existing: "ang".into(),
                requested: "fro".into(),
            }
        );
        // Validation precedes mutation: "fro" was never created.
        assert!(!graph.contains_language(&lang("fro")));
        assert_eq!(graph.descent_edge_count(), 1);
    }

    #[test]
    fn descent_cycles_are_rejected() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("b"), Some(lang("a")), None).unwrap();
        graph.add_language(lang("c"), Some(lang("b")), None).unwrap();

        assert!(matches!(
            graph.add_language(lang("a"), Some(lang("c")), None),
            Err(CoreError::CycleDetected { graph: "descent", .. })
        ));
        assert!(matches!(
            graph.add_language(lang("d"), Some(lang("d")), None),
            Err(CoreError::CycleDetected { .. })
        ));
        assert!(!graph.contains_language(&lang("d")));
    }

    #[test]
    fn derivation_cycles_are_rejected() {
        let mut graph = EtymologyGraph::new();
        graph.add_root(root("x b b"), Some(&[root("x a a")]), None).unwrap();
        graph.add_root(root("x c c"), Some(&[root("x b b")]), None).unwrap();

        let err = graph
            .add_root(root("x a a"), Some(&[root("x c c")]), None)
            .unwrap_err();
        assert!(matches!(err, CoreError::CycleDetected { graph: "derivation", .. }));

        assert!(graph
            .add_root(root("x d d"), Some(&[root("x d d")]), None)
            .is_err());
        assert_eq!(graph.derivation_edge_count(), 2);
    }

    #[test]
    fn info_replaced_when_given_and_kept_otherwise() {
        let mut graph = EtymologyGraph::new();
        graph
            .add_language(lang("la"), None, Some(info(json!({"period": "classical"}))))
            .unwrap();
        // Re-insert without info keeps the bag.
        graph.add_language(lang("la"), None, None).unwrap();
        // Used as a source: bag untouched.
        graph.add_language(lang("it"), Some(lang("la")), None).unwrap();
        assert_eq!(
            graph.language(&lang("la")).unwrap().info(),
            Some(&info(json!({"period": "classical"})))
        );

        // Re-supplying replaces wholesale rather than merging.
        graph
            .add_language(lang("la"), None, Some(info(json!({"script": "latin"}))))
            .unwrap();
        assert_eq!(
            graph.language(&lang("la")).unwrap().info(),
            Some(&info(json!({"script": "latin"})))
        );

        graph.set_language_info(&lang("la"), None).unwrap();
        assert!(graph.language(&lang("la")).unwrap().info().is_none());
        assert!(graph.set_language_info(&lang("xx"), None).is_err());
    }

    #[test]
    fn empty_info_does_not_wipe_existing_bag() {
        let mut graph = EtymologyGraph::new();
        graph
            .add_language(lang("la"), None, Some(info(json!({"period": "classical"}))))
            .unwrap();
        graph.add_language(lang("la"), None, Some(Info::new())).unwrap();
        assert_eq!(
            graph.language(&lang("la")).unwrap().info(),
            Some(&info(json!({"period": "classical"})))
        );

        graph
            .add_root(root("la pater father"), None, Some(info(json!({"pos": "noun"}))))
            .unwrap();
        graph
            .add_root(root("la pater father"), None, Some(Info::new()))
            .unwrap();
        assert_eq!(
            graph.root(&root("la pater father")).unwrap().info(),
            Some(&info(json!({"pos": "noun"})))
        );

        // A fresh node keeps the empty bag it was given.
        graph.add_language(lang("it"), None, Some(Info::new())).unwrap();
        assert_eq!(graph.language(&lang("it")).unwrap().info(), Some(&Info::new()));
    }

    #[test]
    fn root_source_keeps_existing_info() {
        let mut graph = EtymologyGraph::new();
        graph
            .add_root(root("la pater father"), None, Some(info(json!({"pos": "noun"}))))
            .unwrap();
        graph
            .add_root(
                root("it padre father"),
                Some(&[root("la pater father")]),
                Some(info(json!({"pos": "noun"}))),
            )
            .unwrap();
        let pater = graph.root(&root("la pater father")).unwrap();
        assert_eq!(pater.info(), Some(&info(json!({"pos": "noun"}))));

        graph
            .set_root_info(&root("la pater father"), Some(info(json!({}))))
            .unwrap();
        assert_eq!(
            graph.root(&root("la pater father")).unwrap().info(),
            Some(&Info::new())
        );
    }

    #[test]
    fn add_languages_shares_source_and_info() {
        let mut graph = EtymologyGraph::new();
        let shared = info(json!({"family": "romance"}));
        graph
            .add_languages(&[lang("it"), lang("es")], Some(&lang("la")), Some(&shared))
            .unwrap();

        for name in ["it", "es"] {
            let view = graph.language(&lang(name)).unwrap();
            assert_eq!(view.source(), Some(&lang("la")));
            assert_eq!(view.info(), Some(&shared));
        }
        assert!(graph.language(&lang("la")).unwrap().info().is_none());
    }

    #[test]
    fn add_languages_from_pairs_positionally() {
        let mut graph = EtymologyGraph::new();
        graph
            .add_languages_from(
                &[lang("ang"), lang("en"), lang("la")],
                Some(&[None, Some(lang("ang")), None]),
                None,
            )
            .unwrap();
        assert_eq!(graph.language(&lang("ang")).unwrap().source(), None);
        assert_eq!(graph.language(&lang("en")).unwrap().source(), Some(&lang("ang")));
        assert_eq!(graph.language_count(), 3);
    }

    #[test]
    fn positional_length_mismatch_fails_before_mutation() {
        let mut graph = EtymologyGraph::new();
        let err = graph
            .add_languages_from(&[lang("a"), lang("b")], Some(&[None]), None)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::LengthMismatch {
                what: "names",
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(graph.language_count(), 0);

        let err = graph
            .add_roots_from(&[root("x a a")], Some(&[vec![], vec![]]), None)
            .unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { what: "roots", .. }));
        assert_eq!(graph.root_count(), 0);
    }

    #[test]
    fn add_roots_is_a_cross_product() {
        let mut graph = EtymologyGraph::new();
        let sources = [root("x a a"), root("x b b")];
        graph
            .add_roots(&[root("y ab ab"), root("z ab ab")], Some(&sources), None)
            .unwrap();

        assert_eq!(graph.derivation_edge_count(), 4);
        for key in ["y ab ab", "z ab ab"] {
            let view = graph.root(&root(key)).unwrap();
            assert!(view.is_compound());
            assert_eq!(view.sources(), vec![&sources[0], &sources[1]]);
        }
    }

    #[test]
    fn add_roots_from_without_sources_adds_bare_roots() {
        let mut graph = EtymologyGraph::new();
        graph
            .add_roots_from(&[root("x a a"), root("x b b")], None, None)
            .unwrap();
        assert_eq!(graph.root_count(), 2);
        assert_eq!(graph.derivation_edge_count(), 0);
    }

    #[test]
    fn bulk_failure_keeps_earlier_elements() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("en"), Some(lang("ang")), None).unwrap();
        let result = graph.add_languages(
            &[lang("sco"), lang("en")],
            Some(&lang("fro")),
            None,
        );
        assert!(matches!(result, Err(CoreError::ConflictingSource { .. })));
        // "sco" was applied before "en" failed.
        assert_eq!(graph.language(&lang("sco")).unwrap().source(), Some(&lang("fro")));
    }

    #[test]
    fn views_see_later_mutations() {
        let mut graph = EtymologyGraph::new();
        graph.add_root(root("la pater father"), None, None).unwrap();
        graph
            .add_root(root("it padre father"), Some(&[root("la pater father")]), None)
            .unwrap();
        let children: Vec<String> = graph
            .root(&root("la pater father"))
            .unwrap()
            .children()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(children, vec!["it padre father".to_string()]);
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("it"), Some(lang("la")), None).unwrap();
        graph.add_language(lang("ang"), None, None).unwrap();
        let names: Vec<&str> = graph.languages().map(|l| l.name()).collect();
        assert_eq!(names, vec!["it", "la", "ang"]);
    }
}

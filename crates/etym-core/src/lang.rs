//! Borrowed view of a language in an [`EtymologyGraph`].

use std::fmt;

use crate::error::CoreError;
use crate::graph::{EtymologyGraph, LangEntry};
use crate::key::{LangKey, RootKey};
use crate::root::Root;
use crate::Info;

/// A language, bound to its key and the store that owns it.
///
/// Views hold no relationships of their own; every query reads the store's
/// graphs, so they always reflect the current structure.
#[derive(Clone, Copy)]
pub struct Lang<'g> {
    graph: &'g EtymologyGraph,
    key: &'g LangKey,
    entry: &'g LangEntry,
}

impl<'g> Lang<'g> {
    pub(crate) fn new(graph: &'g EtymologyGraph, key: &'g LangKey, entry: &'g LangEntry) -> Self {
        Lang { graph, key, entry }
    }

    /// The language key.
    pub fn key(&self) -> &'g LangKey {
        self.key
    }

    /// The language name, same as the key.
    pub fn name(&self) -> &'g str {
        self.key.as_str()
    }

    /// The attribute bag, if one was supplied.
    pub fn info(&self) -> Option<&'g Info> {
        self.entry.info.as_ref()
    }

    /// The direct source language, if any.
    ///
    /// Should a language ever carry several predecessors, the
    /// lexicographically smallest key is returned.
    pub fn source(&self) -> Option<&'g LangKey> {
        self.graph.language_sources(self.entry.node).first().copied()
    }

    /// Direct descendant languages, sorted by key.
    pub fn children(&self) -> Vec<&'g LangKey> {
        self.graph.language_children(self.entry.node)
    }

    /// Keys of every root whose language token is this language.
    ///
    /// Computed by scanning all roots, O(number of roots).
    pub fn vocabulary(&self) -> Vec<&'g RootKey> {
        self.graph
            .roots_in_language(self.key)
            .map(|(key, _)| key)
            .collect()
    }

    /// Finds the single root of this language matching `query`.
    ///
    /// A query wrapped in angle brackets (`<father>`) matches on gloss,
    /// anything else on text. Zero or several matches fail with
    /// [`CoreError::LookupNotFound`].
    pub fn lookup(&self, query: &str) -> Result<Root<'g>, CoreError> {
        match query
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(gloss) => self.find_unique(query, |key| key.gloss() == gloss),
            None => self.find_unique(query, |key| key.text() == query),
        }
    }

    /// Finds the single root of this language with the given text.
    pub fn lookup_text(&self, text: &str) -> Result<Root<'g>, CoreError> {
        self.find_unique(text, |key| key.text() == text)
    }

    /// Finds the single root of this language with the given gloss.
    pub fn lookup_gloss(&self, gloss: &str) -> Result<Root<'g>, CoreError> {
        self.find_unique(gloss, |key| key.gloss() == gloss)
    }

    fn find_unique(
        &self,
        query: &str,
        matches: impl Fn(&RootKey) -> bool,
    ) -> Result<Root<'g>, CoreError> {
        let graph = self.graph;
        let mut found = graph
            .roots_in_language(self.key)
            .filter(|(key, _)| matches(*key));
        let not_found = |count: usize| CoreError::LookupNotFound {
            language: self.key.to_string(),
            query: query.to_string(),
            matches: count,
        };
        match (found.next(), found.next()) {
            (Some((key, entry)), None) => Ok(Root::new(graph, key, entry)),
            (None, _) => Err(not_found(0)),
            (Some(_), Some(_)) => Err(not_found(2 + found.count())),
        }
    }
}

impl fmt::Debug for Lang<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lang")
            .field("name", &self.key)
            .field("info", &self.entry.info)
            .finish()
    }
}

impl fmt::Display for Lang<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.key, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(name: &str) -> LangKey {
        LangKey::new(name).unwrap()
    }

    fn root(key: &str) -> RootKey {
        RootKey::parse(key).unwrap()
    }

    fn sample() -> EtymologyGraph {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("la"), None, None).unwrap();
        graph
            .add_languages(&[lang("it"), lang("fr")], Some(&lang("la")), None)
            .unwrap();
        graph
            .add_roots_from(
                &[root("la pater father"), root("la mater mother"), root("it padre father")],
                Some(&[vec![], vec![], vec![root("la pater father")]]),
                None,
            )
            .unwrap();
        graph
    }

    #[test]
    fn source_and_children() {
        let graph = sample();
        let it = graph.language(&lang("it")).unwrap();
        assert_eq!(it.source(), Some(&lang("la")));

        let la = graph.language(&lang("la")).unwrap();
        assert_eq!(la.source(), None);
        assert_eq!(la.children(), vec![&lang("fr"), &lang("it")]);
    }

    #[test]
    fn vocabulary_is_exactly_the_language_token() {
        let mut graph = sample();
        // Same text and gloss in another language must not leak in.
        graph
            .add_root(root("it pater father"), None, None)
            .unwrap();

        let la = graph.language(&lang("la")).unwrap();
        assert_eq!(
            la.vocabulary(),
            vec![&root("la pater father"), &root("la mater mother")]
        );

        let it = graph.language(&lang("it")).unwrap();
        assert_eq!(
            it.vocabulary(),
            vec![&root("it padre father"), &root("it pater father")]
        );

        let fr = graph.language(&lang("fr")).unwrap();
        assert!(fr.vocabulary().is_empty());
    }

    #[test]
    fn lookup_by_text_and_gloss() {
        let graph = sample();
        let la = graph.language(&lang("la")).unwrap();

        let by_text = la.lookup("pater").unwrap();
        assert_eq!(by_text.key(), &root("la pater father"));

        let by_gloss = la.lookup("<mother>").unwrap();
        assert_eq!(by_gloss.key(), &root("la mater mother"));

        assert_eq!(la.lookup_gloss("father").unwrap().text(), "pater");
        assert_eq!(la.lookup_text("mater").unwrap().gloss(), "mother");
    }

    #[test]
    fn lookup_missing_is_not_found() {
        let graph = sample();
        let la = graph.language(&lang("la")).unwrap();
        let err = la.lookup("<brother>").unwrap_err();
        assert_eq!(
            err,
            CoreError::LookupNotFound {
                language: "la".into(),
                query: "<brother>".into(),
                matches: 0,
            }
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn ambiguous_lookup_is_not_found() {
        let mut graph = sample();
        graph
            .add_root(root("la pater sire"), None, None)
            .unwrap();
        graph
            .add_root(root("la pater priest"), None, None)
            .unwrap();
        let la = graph.language(&lang("la")).unwrap();

        match la.lookup("pater") {
            Err(CoreError::LookupNotFound { matches, .. }) => assert_eq!(matches, 3),
            other => panic!("expected ambiguous lookup to fail, got {other:?}"),
        }
        // The gloss is still unique.
        assert!(la.lookup("<sire>").is_ok());
    }

    #[test]
    fn bracketed_text_without_closing_is_text_lookup() {
        let mut graph = EtymologyGraph::new();
        graph.add_language(lang("xx"), None, None).unwrap();
        graph.add_root(root("xx <a gloss"), None, None).unwrap();
        let xx = graph.language(&lang("xx")).unwrap();
        assert_eq!(xx.lookup("<a").unwrap().gloss(), "gloss");
    }

    #[test]
    fn display_is_name() {
        let graph = sample();
        assert_eq!(graph.language(&lang("la")).unwrap().to_string(), "la");
    }
}

//! Namespace resolver interface.
//!
//! Fetching and caching controlled-vocabulary definitions is a collaborator
//! concern; the parser only asks a [`NamespaceResolver`] whether a name is
//! a member of a namespace. Lookups are synchronous and possibly slow, and
//! their verdicts are recorded as warnings without ever blocking graph
//! construction.

use std::collections::{BTreeMap, BTreeSet};

/// Outcome of a single vocabulary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The namespace is known and contains the name.
    Known,
    /// The namespace is known but the name is not a member.
    Unknown,
    /// The namespace itself is not known to the resolver.
    NamespaceUndeclared,
}

/// Supplies vocabulary membership verdicts for namespaced identifiers.
pub trait NamespaceResolver {
    fn resolve(&self, namespace: &str, name: &str) -> Lookup;

    /// Optional bulk access to a namespace's full term set.
    fn namespace_terms(&self, namespace: &str) -> Option<&BTreeSet<String>> {
        let _ = namespace;
        None
    }
}

/// An in-memory resolver over preloaded vocabularies.
///
/// Useful for tests and for callers that load their namespace files ahead
/// of a parse.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    namespaces: BTreeMap<String, BTreeSet<String>>,
}

impl MapResolver {
    pub fn new(namespaces: BTreeMap<String, BTreeSet<String>>) -> Self {
        MapResolver { namespaces }
    }

    /// A resolver that knows no namespaces at all.
    pub fn empty() -> Self {
        MapResolver {
            namespaces: BTreeMap::new(),
        }
    }

    /// Adds (or extends) one namespace's term set.
    pub fn insert<I, S>(&mut self, namespace: impl Into<String>, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .extend(names.into_iter().map(Into::into));
    }
}

impl NamespaceResolver for MapResolver {
    fn resolve(&self, namespace: &str, name: &str) -> Lookup {
        match self.namespaces.get(namespace) {
            Some(names) if names.contains(name) => Lookup::Known,
            Some(_) => Lookup::Unknown,
            None => Lookup::NamespaceUndeclared,
        }
    }

    fn namespace_terms(&self, namespace: &str) -> Option<&BTreeSet<String>> {
        self.namespaces.get(namespace)
    }
}

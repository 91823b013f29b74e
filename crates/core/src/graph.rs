//! The assembled knowledge graph.
//!
//! Nodes are interned by canonical term key, edges are multigraph edges
//! deduplicated by their full key (source, target, relation, context), and
//! everything recorded during a parse — document metadata, namespace and
//! annotation declarations, warnings — lives alongside the graph structure.
//! Mutation is crate-internal; callers read the finished graph and may
//! union independently parsed graphs with [`BelGraph::merge`].

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::context::Context;
use crate::error::Warning;
use crate::relation::Relation;
use crate::term::Term;

/// The weight of one edge: the relation plus the context captured when the
/// edge was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub relation: Relation,
    pub context: Context,
}

/// A deduplicating multigraph of BEL terms and relations.
#[derive(Debug)]
pub struct BelGraph {
    graph: DiGraph<Term, EdgeData>,
    node_keys: HashMap<String, NodeIndex>,
    document: BTreeMap<String, String>,
    namespace_urls: BTreeMap<String, String>,
    namespace_lists: BTreeMap<String, BTreeSet<String>>,
    annotation_urls: BTreeMap<String, String>,
    annotation_lists: BTreeMap<String, BTreeSet<String>>,
    warnings: Vec<Warning>,
}

impl Default for BelGraph {
    fn default() -> Self {
        BelGraph::new()
    }
}

impl BelGraph {
    pub fn new() -> Self {
        BelGraph {
            graph: DiGraph::new(),
            node_keys: HashMap::new(),
            document: BTreeMap::new(),
            namespace_urls: BTreeMap::new(),
            namespace_lists: BTreeMap::new(),
            annotation_urls: BTreeMap::new(),
            annotation_lists: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    // ── Mutators (crate-internal) ───────────────────────────────────

    /// Insert-or-reuse by canonical key.
    pub(crate) fn register_node(&mut self, term: &Term) -> NodeIndex {
        let key = term.key();
        if let Some(ix) = self.node_keys.get(&key) {
            return *ix;
        }
        let ix = self.graph.add_node(term.clone());
        self.node_keys.insert(key, ix);
        ix
    }

    /// Adds an edge unless an edge with the identical full key already
    /// exists. Returns whether an edge was added.
    pub(crate) fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, data: EdgeData) -> bool {
        let duplicate = self
            .graph
            .edges_connecting(source, target)
            .any(|e| e.weight() == &data);
        if duplicate {
            return false;
        }
        self.graph.add_edge(source, target, data);
        true
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        debug!(line = warning.line, kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub(crate) fn set_document_value(&mut self, key: String, value: String) {
        self.document.insert(key, value);
    }

    /// Records a URL-form namespace definition; keeps the first definition
    /// and returns false on a duplicate keyword.
    pub(crate) fn define_namespace_url(&mut self, keyword: String, url: String) -> bool {
        if self.namespace_defined(&keyword) {
            return false;
        }
        self.namespace_urls.insert(keyword, url);
        true
    }

    pub(crate) fn define_namespace_list(
        &mut self,
        keyword: String,
        values: BTreeSet<String>,
    ) -> bool {
        if self.namespace_defined(&keyword) {
            return false;
        }
        self.namespace_lists.insert(keyword, values);
        true
    }

    pub(crate) fn define_annotation_url(&mut self, keyword: String, url: String) -> bool {
        if self.annotation_defined(&keyword) {
            return false;
        }
        self.annotation_urls.insert(keyword, url);
        true
    }

    pub(crate) fn define_annotation_list(
        &mut self,
        keyword: String,
        values: BTreeSet<String>,
    ) -> bool {
        if self.annotation_defined(&keyword) {
            return false;
        }
        self.annotation_lists.insert(keyword, values);
        true
    }

    pub(crate) fn namespace_list(&self, keyword: &str) -> Option<&BTreeSet<String>> {
        self.namespace_lists.get(keyword)
    }

    // ── Read access ─────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The underlying petgraph structure, for traversal and analysis.
    pub fn graph(&self) -> &DiGraph<Term, EdgeData> {
        &self.graph
    }

    pub fn term(&self, ix: NodeIndex) -> Option<&Term> {
        self.graph.node_weight(ix)
    }

    /// Looks a node up by its canonical term key.
    pub fn node_by_key(&self, key: &str) -> Option<NodeIndex> {
        self.node_keys.get(key).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Term)> {
        self.graph.node_indices().map(move |ix| (ix, &self.graph[ix]))
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &EdgeData)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    pub fn document(&self) -> &BTreeMap<String, String> {
        &self.document
    }

    pub fn namespace_urls(&self) -> &BTreeMap<String, String> {
        &self.namespace_urls
    }

    pub fn namespace_lists(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.namespace_lists
    }

    pub fn annotation_urls(&self) -> &BTreeMap<String, String> {
        &self.annotation_urls
    }

    pub fn annotation_lists(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.annotation_lists
    }

    pub fn namespace_defined(&self, keyword: &str) -> bool {
        self.namespace_urls.contains_key(keyword) || self.namespace_lists.contains_key(keyword)
    }

    pub fn annotation_defined(&self, keyword: &str) -> bool {
        self.annotation_urls.contains_key(keyword) || self.annotation_lists.contains_key(keyword)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    // ── Merge ───────────────────────────────────────────────────────

    /// Unions another graph into this one: node keys and edge multisets
    /// are unioned, metadata and definitions keep this graph's entries on
    /// conflict, warnings are concatenated.
    pub fn merge(&mut self, other: BelGraph) {
        let mut mapped = Vec::with_capacity(other.graph.node_count());
        for ix in other.graph.node_indices() {
            mapped.push(self.register_node(&other.graph[ix]));
        }
        for edge in other.graph.edge_references() {
            self.add_edge(
                mapped[edge.source().index()],
                mapped[edge.target().index()],
                edge.weight().clone(),
            );
        }
        for (key, value) in other.document {
            self.document.entry(key).or_insert(value);
        }
        for (keyword, url) in other.namespace_urls {
            if !self.namespace_defined(&keyword) {
                self.namespace_urls.insert(keyword, url);
            }
        }
        for (keyword, values) in other.namespace_lists {
            if !self.namespace_defined(&keyword) {
                self.namespace_lists.insert(keyword, values);
            }
        }
        for (keyword, url) in other.annotation_urls {
            if !self.annotation_defined(&keyword) {
                self.annotation_urls.insert(keyword, url);
            }
        }
        for (keyword, values) in other.annotation_lists {
            if !self.annotation_defined(&keyword) {
                self.annotation_lists.insert(keyword, values);
            }
        }
        self.warnings.extend(other.warnings);
    }
}

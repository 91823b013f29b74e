//! Typed records for the JSON graph interchange format.
//!
//! The shapes here mirror the layout used by public BEL network
//! repositories: a single `graph` object holding `label`, `metadata`,
//! `nodes`, and `edges`, with per-edge evidence records nested under
//! `metadata.evidences`. Decoding keeps optional fields optional;
//! the ingestion pass decides which records are usable.

use std::collections::BTreeMap;

/// A decoded interchange document.
#[derive(Debug, Clone, Default)]
pub struct InterchangeGraph {
    /// Graph label, ingested as the document `Name`.
    pub label: Option<String>,
    /// Document-level metadata. Only known document keys are ingested.
    pub metadata: BTreeMap<String, String>,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

// ── Nodes ───────────────────────────────────────────────────────────

/// One node record. The label is a BEL term in source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub label: Option<String>,
}

// ── Edges ───────────────────────────────────────────────────────────

/// One edge record. `label` carries the full BEL statement; `source`
/// and `target` are the endpoint node labels, kept for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct EdgeRecord {
    pub source: Option<String>,
    pub target: Option<String>,
    pub relation: Option<String>,
    pub label: Option<String>,
    /// Evidence records from `metadata.evidences`.
    pub evidences: Vec<EvidenceRecord>,
}

/// One supporting evidence record on an edge.
#[derive(Debug, Clone, Default)]
pub struct EvidenceRecord {
    /// Present only when the record carried a non-blank type and id.
    pub citation: Option<CitationRecord>,
    pub summary_text: String,
    /// Annotation pairs from `experiment_context`.
    pub experiment_context: BTreeMap<String, String>,
}

/// The citation inside an evidence record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRecord {
    pub citation_type: String,
    pub reference: String,
    pub name: Option<String>,
}

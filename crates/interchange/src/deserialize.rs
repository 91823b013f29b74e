//! Decoding interchange JSON into typed records.
//!
//! The entry point is [`decode_graph`], which takes a
//! `&serde_json::Value` and produces an [`InterchangeGraph`]. Only the
//! top-level shape is enforced here; record-level fields stay optional
//! so that ingestion can decide which records are usable.

use std::fmt;

use tracing::debug;

use crate::types::*;

/// Errors for a malformed interchange document or invalid options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    /// The document is missing a required top-level field.
    MissingField { field: String },
    /// The document structure is invalid.
    InvalidDocument(String),
    /// The parser configuration is contradictory.
    Config(belgraph_core::ConfigError),
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::MissingField { field } => {
                write!(f, "document missing required field: '{}'", field)
            }
            InterchangeError::InvalidDocument(msg) => {
                write!(f, "invalid document: {}", msg)
            }
            InterchangeError::Config(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for InterchangeError {}

impl From<belgraph_core::ConfigError> for InterchangeError {
    fn from(error: belgraph_core::ConfigError) -> Self {
        InterchangeError::Config(error)
    }
}

/// Decodes an interchange JSON document into typed records.
///
/// The document must be an object with a `graph` object holding `nodes`
/// and `edges` arrays; everything below that level is optional.
pub fn decode_graph(document: &serde_json::Value) -> Result<InterchangeGraph, InterchangeError> {
    if !document.is_object() {
        return Err(InterchangeError::InvalidDocument(
            "expected a JSON object".to_string(),
        ));
    }

    let root = document
        .get("graph")
        .ok_or_else(|| InterchangeError::MissingField {
            field: "graph".to_string(),
        })?;

    let label = root
        .get("label")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let metadata = root
        .get("metadata")
        .and_then(|m| m.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| scalar_string(v).map(|s| (k.clone(), s)))
                .collect()
        })
        .unwrap_or_default();

    let nodes = root
        .get("nodes")
        .and_then(|n| n.as_array())
        .ok_or_else(|| InterchangeError::MissingField {
            field: "nodes".to_string(),
        })?
        .iter()
        .map(decode_node)
        .collect();

    let edges = root
        .get("edges")
        .and_then(|e| e.as_array())
        .ok_or_else(|| InterchangeError::MissingField {
            field: "edges".to_string(),
        })?
        .iter()
        .map(decode_edge)
        .collect();

    Ok(InterchangeGraph {
        label,
        metadata,
        nodes,
        edges,
    })
}

// ── Record decoding ─────────────────────────────────────────────────

fn opt_str(obj: &serde_json::Value, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn decode_node(obj: &serde_json::Value) -> NodeRecord {
    NodeRecord {
        label: opt_str(obj, "label"),
    }
}

fn decode_edge(obj: &serde_json::Value) -> EdgeRecord {
    let evidences = obj
        .get("metadata")
        .and_then(|m| m.get("evidences"))
        .and_then(|e| e.as_array())
        .map(|arr| arr.iter().map(decode_evidence).collect())
        .unwrap_or_default();

    EdgeRecord {
        source: opt_str(obj, "source"),
        target: opt_str(obj, "target"),
        relation: opt_str(obj, "relation"),
        label: opt_str(obj, "label"),
        evidences,
    }
}

fn decode_evidence(obj: &serde_json::Value) -> EvidenceRecord {
    let citation = obj.get("citation").and_then(decode_citation);

    let summary_text = obj
        .get("summary_text")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let experiment_context = obj
        .get("experiment_context")
        .and_then(|c| c.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| scalar_string(v).map(|s| (k.clone(), s)))
                .collect()
        })
        .unwrap_or_default();

    EvidenceRecord {
        citation,
        summary_text,
        experiment_context,
    }
}

/// A citation is usable only with a non-blank `type` and `id`.
fn decode_citation(obj: &serde_json::Value) -> Option<CitationRecord> {
    let citation_type = obj
        .get("type")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or("");
    let reference = obj
        .get("id")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or("");

    if citation_type.is_empty() || reference.is_empty() {
        debug!(%obj, "citation record without type and id");
        return None;
    }

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string());

    Some(CitationRecord {
        citation_type: citation_type.to_string(),
        reference: reference.to_string(),
        name,
    })
}

/// Metadata and context values arrive as strings, numbers, or booleans;
/// anything structured is dropped.
fn scalar_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_document() {
        let document = json!({"graph": {"nodes": [], "edges": []}});
        let decoded = decode_graph(&document).unwrap();
        assert!(decoded.label.is_none());
        assert!(decoded.metadata.is_empty());
        assert!(decoded.nodes.is_empty());
        assert!(decoded.edges.is_empty());
    }

    #[test]
    fn test_missing_graph() {
        let document = json!({"nodes": [], "edges": []});
        match decode_graph(&document).unwrap_err() {
            InterchangeError::MissingField { field } => assert_eq!(field, "graph"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_document() {
        let document = json!(["not", "a", "graph"]);
        match decode_graph(&document).unwrap_err() {
            InterchangeError::InvalidDocument(_) => {}
            other => panic!("expected InvalidDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_node_and_edge_arrays() {
        let document = json!({"graph": {"edges": []}});
        match decode_graph(&document).unwrap_err() {
            InterchangeError::MissingField { field } => assert_eq!(field, "nodes"),
            other => panic!("expected MissingField, got {:?}", other),
        }

        let document = json!({"graph": {"nodes": []}});
        match decode_graph(&document).unwrap_err() {
            InterchangeError::MissingField { field } => assert_eq!(field, "edges"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_label_and_metadata() {
        let document = json!({"graph": {
            "label": "Apoptosis Network",
            "metadata": {
                "Description": "test network",
                "version": 2,
                "nested": {"dropped": true}
            },
            "nodes": [],
            "edges": []
        }});
        let decoded = decode_graph(&document).unwrap();
        assert_eq!(decoded.label.as_deref(), Some("Apoptosis Network"));
        assert_eq!(decoded.metadata["Description"], "test network");
        assert_eq!(decoded.metadata["version"], "2");
        assert!(!decoded.metadata.contains_key("nested"));
    }

    #[test]
    fn test_decode_edge_with_evidence() {
        let document = json!({"graph": {"nodes": [], "edges": [{
            "source": "p(HGNC:AKT1)",
            "target": "p(HGNC:FOXO3)",
            "relation": "increases",
            "label": "p(HGNC:AKT1) increases p(HGNC:FOXO3)",
            "metadata": {"evidences": [{
                "citation": {"type": " PubMed ", "id": " 12345 ", "name": " A title "},
                "summary_text": "observed in vitro",
                "experiment_context": {"tissue": "liver", "passage": 3}
            }]}
        }]}});

        let decoded = decode_graph(&document).unwrap();
        assert_eq!(decoded.edges.len(), 1);
        let edge = &decoded.edges[0];
        assert_eq!(edge.relation.as_deref(), Some("increases"));
        assert_eq!(edge.evidences.len(), 1);

        let evidence = &edge.evidences[0];
        let citation = evidence.citation.as_ref().unwrap();
        assert_eq!(citation.citation_type, "PubMed");
        assert_eq!(citation.reference, "12345");
        assert_eq!(citation.name.as_deref(), Some("A title"));
        assert_eq!(evidence.summary_text, "observed in vitro");
        assert_eq!(evidence.experiment_context["tissue"], "liver");
        assert_eq!(evidence.experiment_context["passage"], "3");
    }

    #[test]
    fn test_citation_without_reference_is_dropped() {
        let document = json!({"graph": {"nodes": [], "edges": [{
            "relation": "increases",
            "label": "a(CHEBI:oxygen) increases bp(GOBP:apoptosis)",
            "metadata": {"evidences": [
                {"citation": {"type": "PubMed", "id": "  "}, "summary_text": "text"},
                {"citation": {"type": "PubMed"}, "summary_text": "text"},
                {"summary_text": "no citation at all"}
            ]}
        }]}});

        let decoded = decode_graph(&document).unwrap();
        for evidence in &decoded.edges[0].evidences {
            assert!(evidence.citation.is_none());
        }
    }

    #[test]
    fn test_edge_without_metadata_has_no_evidences() {
        let document = json!({"graph": {"nodes": [], "edges": [
            {"relation": "hasComponent", "label": "x hasComponent y"}
        ]}});
        let decoded = decode_graph(&document).unwrap();
        assert!(decoded.edges[0].evidences.is_empty());
        assert!(decoded.edges[0].source.is_none());
    }

    #[test]
    fn test_nodes_keep_missing_labels() {
        let document = json!({"graph": {"nodes": [
            {"label": "p(HGNC:AKT1)"},
            {"id": "unlabeled"}
        ], "edges": []}});
        let decoded = decode_graph(&document).unwrap();
        assert_eq!(decoded.nodes[0].label.as_deref(), Some("p(HGNC:AKT1)"));
        assert!(decoded.nodes[1].label.is_none());
    }
}

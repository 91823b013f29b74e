//! Driving the document parser with decoded interchange records.
//!
//! Record-level problems never abort an ingestion. A node or edge that
//! cannot be used is recorded as a warning on the graph, an evidence
//! record that is merely empty is logged at debug level and skipped,
//! and the next record is taken either way. Warnings carry the record's
//! 1-based position in its array in place of a line number.

use belgraph_core::{
    BelGraph, Citation, DocumentParser, NamespaceResolver, ParserOptions, Relation, Warning,
    WarningKind, DOCUMENT_KEYS,
};
use tracing::debug;

use crate::deserialize::{decode_graph, InterchangeError};
use crate::types::{EdgeRecord, InterchangeGraph};

/// The evidence sentence some repositories attach to edges that have no
/// real support yet. Records carrying it are not usable evidence.
pub const PLACEHOLDER_EVIDENCE: &str = "This Network edge has no supporting evidence.  \
     Please add real evidence to this edge prior to deleting.";

/// Builds a graph from an interchange JSON document.
///
/// Fails only on a malformed top-level document or contradictory
/// options; every record-level problem becomes a warning on the graph.
pub fn from_interchange(
    document: &serde_json::Value,
    options: ParserOptions,
    resolver: &dyn NamespaceResolver,
) -> Result<BelGraph, InterchangeError> {
    let decoded = decode_graph(document)?;
    let mut parser = DocumentParser::new(options, resolver)?;
    ingest(&decoded, &mut parser);
    Ok(parser.finish())
}

/// Feeds decoded records through a prepared parser.
pub(crate) fn ingest(decoded: &InterchangeGraph, parser: &mut DocumentParser<'_>) {
    if let Some(label) = &decoded.label {
        parser.set_document_value("Name", label.clone());
    }
    for key in DOCUMENT_KEYS {
        if let Some(value) = decoded.metadata.get(*key) {
            parser.set_document_value(*key, value.clone());
        }
    }

    for (ix, node) in decoded.nodes.iter().enumerate() {
        let ordinal = ix as u32 + 1;
        match &node.label {
            Some(label) => {
                parser.parse_term(ordinal, label);
            }
            None => parser.record_warning(Warning::new(
                ordinal,
                "",
                WarningKind::Structural,
                "node record has no label",
            )),
        }
    }

    for (ix, edge) in decoded.edges.iter().enumerate() {
        ingest_edge(edge, ix as u32 + 1, parser);
    }
}

fn ingest_edge(edge: &EdgeRecord, ordinal: u32, parser: &mut DocumentParser<'_>) {
    let Some(relation) = edge.relation.as_deref() else {
        parser.record_warning(Warning::new(
            ordinal,
            edge.label.as_deref().unwrap_or(""),
            WarningKind::Structural,
            "edge record has no relation",
        ));
        return;
    };

    // Legacy vocabulary with no counterpart in the relation set.
    if relation == "actsIn" {
        debug!(ordinal, "skipping actsIn edge");
        return;
    }

    let Some(statement) = edge.label.as_deref() else {
        let endpoints = format!(
            "{} {} {}",
            edge.source.as_deref().unwrap_or("?"),
            relation,
            edge.target.as_deref().unwrap_or("?"),
        );
        parser.record_warning(Warning::new(
            ordinal,
            endpoints,
            WarningKind::Structural,
            "edge record has no statement label",
        ));
        return;
    };

    let Some(known) = Relation::from_keyword(relation) else {
        parser.record_warning(Warning::new(
            ordinal,
            statement,
            WarningKind::Structural,
            format!("unknown relation '{relation}'"),
        ));
        return;
    };

    if !known.is_qualified() {
        // Unqualified relations carry no provenance; parse once under a
        // cleared context.
        parser.control_mut().clear();
        parser.parse_statement(ordinal, statement);
        return;
    }

    if edge.evidences.is_empty() {
        debug!(ordinal, statement, "qualified edge without evidence records");
        return;
    }

    for evidence in &edge.evidences {
        let Some(citation) = &evidence.citation else {
            debug!(ordinal, "evidence record without a citation");
            continue;
        };
        let summary = evidence.summary_text.trim();
        if summary.is_empty() || summary == PLACEHOLDER_EVIDENCE {
            debug!(ordinal, "evidence record without usable summary text");
            continue;
        }

        let control = parser.control_mut();
        control.clear();
        let mut cited = Citation::new(citation.citation_type.clone(), citation.reference.clone());
        cited.name = citation.name.clone();
        control.set_citation(cited);
        control.set_evidence(summary);
        for (key, value) in &evidence.experiment_context {
            control.set_annotation_value(key.clone(), value.clone());
        }

        parser.parse_statement(ordinal, statement);
    }
}

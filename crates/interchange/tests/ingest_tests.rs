//! End-to-end interchange ingestion through the public API.

use std::collections::BTreeSet;

use belgraph_core::{BelGraph, ConfigError, MapResolver, ParserOptions, Relation, WarningKind};
use belgraph_interchange::{from_cbn, from_interchange, InterchangeError, PLACEHOLDER_EVIDENCE};
use serde_json::json;

fn resolver() -> MapResolver {
    let mut r = MapResolver::empty();
    r.insert("HGNC", ["AKT1", "FOXO3", "MYC", "CASP3"]);
    r.insert("GOBP", ["apoptosis"]);
    r
}

fn ingest(document: &serde_json::Value) -> BelGraph {
    from_interchange(document, ParserOptions::default(), &resolver()).unwrap()
}

#[test]
fn qualified_edge_carries_citation_and_evidence() {
    let document = json!({"graph": {
        "label": "Test Network",
        "nodes": [{"label": "p(HGNC:AKT1)"}, {"label": "p(HGNC:FOXO3)"}],
        "edges": [{
            "source": "p(HGNC:AKT1)",
            "target": "p(HGNC:FOXO3)",
            "relation": "increases",
            "label": "p(HGNC:AKT1) increases p(HGNC:FOXO3)",
            "metadata": {"evidences": [{
                "citation": {"type": "PubMed", "id": "12345", "name": "A cited article"},
                "summary_text": "observed in vitro",
                "experiment_context": {"Tissue": "liver"}
            }]}
        }]
    }});

    let graph = ingest(&document);
    assert!(graph.warnings().is_empty(), "{:?}", graph.warnings());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.document()["Name"], "Test Network");

    let (source, target, data) = graph.edges().next().unwrap();
    assert_eq!(graph.term(source).unwrap().to_string(), "p(HGNC:AKT1)");
    assert_eq!(graph.term(target).unwrap().to_string(), "p(HGNC:FOXO3)");
    assert_eq!(data.relation, Relation::Increases);

    let citation = data.context.citation.as_ref().unwrap();
    assert_eq!(citation.citation_type, "PubMed");
    assert_eq!(citation.reference, "12345");
    assert_eq!(citation.name.as_deref(), Some("A cited article"));
    assert_eq!(data.context.evidence.as_deref(), Some("observed in vitro"));
    assert_eq!(
        data.context.annotations["Tissue"],
        BTreeSet::from(["liver".to_string()])
    );
}

#[test]
fn each_usable_evidence_yields_an_edge() {
    let document = json!({"graph": {"nodes": [], "edges": [{
        "relation": "increases",
        "label": "p(HGNC:AKT1) increases p(HGNC:FOXO3)",
        "metadata": {"evidences": [
            {
                "citation": {"type": "PubMed", "id": "111"},
                "summary_text": "first observation"
            },
            {
                "citation": {"type": "PubMed", "id": "222"},
                "summary_text": "replicated later"
            }
        ]}
    }]}});

    let graph = ingest(&document);
    assert_eq!(graph.edge_count(), 2);

    let references: BTreeSet<&str> = graph
        .edges()
        .filter_map(|(_, _, data)| data.context.citation.as_ref())
        .map(|citation| citation.reference.as_str())
        .collect();
    assert_eq!(references, BTreeSet::from(["111", "222"]));
}

#[test]
fn unusable_evidence_records_are_skipped_individually() {
    let document = json!({"graph": {"nodes": [], "edges": [{
        "relation": "increases",
        "label": "p(HGNC:AKT1) increases p(HGNC:FOXO3)",
        "metadata": {"evidences": [
            {"summary_text": "no citation on this one"},
            {
                "citation": {"type": "PubMed", "id": "333"},
                "summary_text": "the usable record"
            }
        ]}
    }]}});

    let graph = ingest(&document);
    assert_eq!(graph.edge_count(), 1);
    let (_, _, data) = graph.edges().next().unwrap();
    assert_eq!(data.context.citation.as_ref().unwrap().reference, "333");
}

#[test]
fn placeholder_evidence_is_not_support() {
    let document = json!({"graph": {
        "nodes": [{"label": "p(HGNC:AKT1)"}, {"label": "p(HGNC:FOXO3)"}],
        "edges": [{
            "relation": "increases",
            "label": "p(HGNC:AKT1) increases p(HGNC:FOXO3)",
            "metadata": {"evidences": [{
                "citation": {"type": "PubMed", "id": "12345"},
                "summary_text": PLACEHOLDER_EVIDENCE
            }]}
        }]
    }});

    let graph = ingest(&document);
    assert!(graph.warnings().is_empty());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn acts_in_edges_are_skipped() {
    let document = json!({"graph": {"nodes": [], "edges": [{
        "relation": "actsIn",
        "label": "p(HGNC:AKT1) actsIn bp(GOBP:apoptosis)",
        "metadata": {"evidences": [{
            "citation": {"type": "PubMed", "id": "12345"},
            "summary_text": "legacy record"
        }]}
    }]}});

    let graph = ingest(&document);
    assert!(graph.warnings().is_empty());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn unqualified_relations_need_no_evidence() {
    let document = json!({"graph": {"nodes": [], "edges": [{
        "relation": "hasMember",
        "label": "p(HGNC:AKT1) hasMember p(HGNC:FOXO3)"
    }]}});

    let graph = ingest(&document);
    assert!(graph.warnings().is_empty(), "{:?}", graph.warnings());
    assert_eq!(graph.edge_count(), 1);

    let (_, _, data) = graph.edges().next().unwrap();
    assert_eq!(data.relation, Relation::HasMember);
    assert!(data.context.is_empty());
}

#[test]
fn metadata_fills_known_document_properties() {
    let document = json!({"graph": {
        "label": "Annotated Network",
        "metadata": {
            "Description": "a described network",
            "Version": "2.0",
            "network_type": "causal"
        },
        "nodes": [],
        "edges": []
    }});

    let graph = ingest(&document);
    assert_eq!(graph.document()["Name"], "Annotated Network");
    assert_eq!(graph.document()["Description"], "a described network");
    assert_eq!(graph.document()["Version"], "2.0");
    assert!(!graph.document().contains_key("network_type"));
}

#[test]
fn node_records_without_labels_warn() {
    let document = json!({"graph": {
        "nodes": [{"id": "unlabeled"}, {"label": "p(HGNC:AKT1)"}],
        "edges": []
    }});

    let graph = ingest(&document);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.warnings().len(), 1);
    assert_eq!(graph.warnings()[0].line, 1);
    assert_eq!(graph.warnings()[0].kind, WarningKind::Structural);
}

#[test]
fn edges_missing_relation_or_label_warn() {
    let document = json!({"graph": {"nodes": [], "edges": [
        {"label": "p(HGNC:AKT1) increases p(HGNC:FOXO3)"},
        {"relation": "increases", "source": "p(HGNC:AKT1)", "target": "p(HGNC:FOXO3)"}
    ]}});

    let graph = ingest(&document);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.warnings().len(), 2);
    assert!(graph.warnings()[0].message.contains("no relation"));
    assert!(graph.warnings()[1].message.contains("no statement label"));
    assert_eq!(graph.warnings()[1].line, 2);
    assert_eq!(graph.warnings()[1].source, "p(HGNC:AKT1) increases p(HGNC:FOXO3)");
}

#[test]
fn unknown_relations_warn_and_skip() {
    let document = json!({"graph": {"nodes": [], "edges": [{
        "relation": "fizzles",
        "label": "p(HGNC:AKT1) fizzles p(HGNC:FOXO3)"
    }]}});

    let graph = ingest(&document);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.warnings().len(), 1);
    assert!(graph.warnings()[0].message.contains("unknown relation 'fizzles'"));
}

#[test]
fn malformed_documents_are_rejected() {
    let error = from_interchange(&json!([]), ParserOptions::default(), &resolver()).unwrap_err();
    assert!(matches!(error, InterchangeError::InvalidDocument(_)));

    let error = from_interchange(&json!({}), ParserOptions::default(), &resolver()).unwrap_err();
    assert_eq!(
        error,
        InterchangeError::MissingField {
            field: "graph".to_string()
        }
    );

    let error = from_interchange(
        &json!({"graph": {"nodes": []}}),
        ParserOptions::default(),
        &resolver(),
    )
    .unwrap_err();
    assert_eq!(
        error,
        InterchangeError::MissingField {
            field: "edges".to_string()
        }
    );
}

#[test]
fn contradictory_options_fail_before_ingestion() {
    let options = ParserOptions {
        naked_namespace: Some("UNKNOWN".to_string()),
        ..ParserOptions::default()
    };
    let document = json!({"graph": {"nodes": [], "edges": []}});
    let error = from_interchange(&document, options, &resolver()).unwrap_err();
    assert!(matches!(
        error,
        InterchangeError::Config(ConfigError::NakedNamespaceDisabled(_))
    ));
}

// ── CBN ingestion ───────────────────────────────────────────────────

#[test]
fn cbn_context_is_normalized_and_resources_installed() {
    let document = json!({"graph": {
        "label": "CBN Export",
        "nodes": [{"label": "p(HGNC:AKT1)"}, {"label": "bp(GOBP:apoptosis)"}],
        "edges": [{
            "relation": "increases",
            "label": "p(HGNC:AKT1) increases bp(GOBP:apoptosis)",
            "metadata": {"evidences": [{
                "citation": {"type": "PubMed", "id": "9876"},
                "summary_text": "seen in exposed cultures",
                "experiment_context": {
                    "species_common_name": "human",
                    "tissue": "lung",
                    "exposure": "smoke"
                }
            }]}
        }]
    }});

    let graph = from_cbn(&document, ParserOptions::default(), &resolver()).unwrap();
    assert!(graph.warnings().is_empty(), "{:?}", graph.warnings());
    assert_eq!(graph.edge_count(), 1);

    let (_, _, data) = graph.edges().next().unwrap();
    assert_eq!(
        data.context.annotations["Species"],
        BTreeSet::from(["9606".to_string()])
    );
    assert_eq!(
        data.context.annotations["Tissue"],
        BTreeSet::from(["lung".to_string()])
    );
    assert_eq!(
        data.context.annotations["exposure"],
        BTreeSet::from(["smoke".to_string()])
    );

    assert!(graph.namespace_urls()["HGNC"].contains("arty.scai.fraunhofer.de"));
    assert!(graph.namespace_urls()["HGNC"].ends_with(".belns"));
    assert!(graph.annotation_urls()["Species"].ends_with(".belanno"));
    assert_eq!(graph.annotation_urls().len(), 4);
}

#[test]
fn cbn_attribution_overrides_export_metadata() {
    let document = json!({"graph": {
        "metadata": {"Authors": "original lab"},
        "nodes": [],
        "edges": []
    }});

    let graph = from_cbn(&document, ParserOptions::default(), &resolver()).unwrap();
    assert_eq!(
        graph.document()["Authors"],
        "Causal Biological Networks Database"
    );
    let licenses = &graph.document()["Licenses"];
    assert!(licenses.contains("www.causalbionet.com"));
    assert!(licenses.contains("led and funded by Philip Morris International"));
    assert!(licenses.ends_with("please visit www.pmi.com."));
}

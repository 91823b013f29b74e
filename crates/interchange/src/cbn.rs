//! Ingestion of Causal Biological Network Database exports.
//!
//! CBN serves the same interchange layout with its own experiment
//! context conventions. [`from_cbn`] rewrites those conventions into
//! canonical annotations, installs the namespace and annotation
//! resources the exports are written against, and then runs the
//! standard ingestion.

use belgraph_core::{BelGraph, DocumentParser, NamespaceResolver, ParserOptions};
use tracing::{debug, warn};

use crate::deserialize::{decode_graph, InterchangeError};
use crate::ingest::ingest;
use crate::types::InterchangeGraph;

/// Namespace resources the CBN exports are written against.
const CBN_NAMESPACE_URLS: &[(&str, &str)] = &[
    (
        "HGNC",
        "https://arty.scai.fraunhofer.de/artifactory/bel/namespace/hgnc-human-genes/hgnc-human-genes-20150601.belns",
    ),
    (
        "GOBP",
        "https://arty.scai.fraunhofer.de/artifactory/bel/namespace/go-biological-process/go-biological-process-20150601.belns",
    ),
    (
        "SFAM",
        "https://arty.scai.fraunhofer.de/artifactory/bel/namespace/selventa-protein-families/selventa-protein-families-20150601.belns",
    ),
];

/// Annotation resources the CBN exports are written against.
const CBN_ANNOTATION_URLS: &[(&str, &str)] = &[
    (
        "Cell",
        "https://arty.scai.fraunhofer.de/artifactory/bel/annotation/cell-line/cell-line-20150601.belanno",
    ),
    (
        "Disease",
        "https://arty.scai.fraunhofer.de/artifactory/bel/annotation/disease/disease-20150601.belanno",
    ),
    (
        "Species",
        "https://arty.scai.fraunhofer.de/artifactory/bel/annotation/species-taxonomy-id/species-taxonomy-id-20170511.belanno",
    ),
    (
        "Tissue",
        "https://arty.scai.fraunhofer.de/artifactory/bel/annotation/mesh-anatomy/mesh-anatomy-20150601.belanno",
    ),
];

const CBN_AUTHORS: &str = "Causal Biological Networks Database";

const CBN_ATTRIBUTION: &str = "Please cite www.causalbionet.com and https://bionet.sbvimprover.com \
    as well as any relevant publications. The sbv IMPROVER project, the website and the Symposia \
    are part of a collaborative project designed to enable scientists to learn about and \
    contribute to the development of a new crowd sourcing method for verification of scientific \
    data and results. The current challenges, website and biological network models were \
    developed and are maintained as part of a collaboration among Selventa, OrangeBus and ADS. \
    The project is led and funded by Philip Morris International. For more information on the \
    focus of Philip Morris International's research, please visit www.pmi.com.";

/// Builds a graph from a CBN network export.
///
/// Shares the failure contract of
/// [`from_interchange`](crate::ingest::from_interchange).
pub fn from_cbn(
    document: &serde_json::Value,
    options: ParserOptions,
    resolver: &dyn NamespaceResolver,
) -> Result<BelGraph, InterchangeError> {
    let mut decoded = decode_graph(document)?;
    normalize(&mut decoded);

    let mut parser = DocumentParser::new(options, resolver)?;
    for (keyword, url) in CBN_NAMESPACE_URLS {
        parser.define_namespace_url(*keyword, *url);
    }
    for (keyword, url) in CBN_ANNOTATION_URLS {
        parser.define_annotation_url(*keyword, *url);
    }

    ingest(&decoded, &mut parser);

    // The export's own metadata never overrides the attribution.
    parser.set_document_value("Authors", CBN_AUTHORS);
    parser.set_document_value("Licenses", CBN_ATTRIBUTION);

    Ok(parser.finish())
}

/// Canonical annotation names for the context keys CBN uses.
fn canonical_annotation(key: &str) -> Option<&'static str> {
    match key {
        "tissue" => Some("Tissue"),
        "disease" => Some("Disease"),
        "cell" => Some("Cell"),
        _ => None,
    }
}

/// Taxonomy identifiers for the species names CBN uses.
fn taxonomy_id(name: &str) -> Option<&'static str> {
    match name {
        "human" => Some("9606"),
        "rat" => Some("10116"),
        "mouse" => Some("10090"),
        _ => None,
    }
}

/// Rewrites CBN experiment-context conventions in place: keys are
/// lower-cased and mapped to their canonical annotation names, species
/// common names become taxonomy identifiers, and blank values are
/// dropped.
fn normalize(decoded: &mut InterchangeGraph) {
    for edge in &mut decoded.edges {
        for evidence in &mut edge.evidences {
            let context = std::mem::take(&mut evidence.experiment_context);
            for (key, value) in context {
                let value = value.trim();
                if value.is_empty() {
                    debug!(key, "context key without a value");
                    continue;
                }
                let key = key.trim().to_lowercase();

                if key == "species_common_name" {
                    let species = match taxonomy_id(&value.to_lowercase()) {
                        Some(id) => id.to_string(),
                        None => {
                            warn!(species = value, "unrecognized species common name");
                            value.to_string()
                        }
                    };
                    evidence
                        .experiment_context
                        .insert("Species".to_string(), species);
                } else if let Some(canonical) = canonical_annotation(&key) {
                    evidence
                        .experiment_context
                        .insert(canonical.to_string(), value.to_string());
                } else {
                    evidence.experiment_context.insert(key, value.to_string());
                }
            }
        }
    }
}

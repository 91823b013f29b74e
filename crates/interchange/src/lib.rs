//! belgraph-interchange: JSON graph interchange ingestion.
//!
//! Decodes documents shaped like the JSON Graph Interchange Format,
//! a single `graph` object with `label`, `metadata`, `nodes`, and
//! `edges`, evidence records nested under each edge's
//! `metadata.evidences`, and drives the belgraph-core document parser
//! with them. Two entry points:
//!
//! - [`from_interchange`] ingests a standard document.
//! - [`from_cbn`] first applies Causal Biological Network Database
//!   conventions (canonical annotation names, species taxonomy
//!   identifiers) and installs the namespace resources those exports
//!   are written against.
//!
//! Record-level problems are recorded as warnings on the resulting
//! graph, matching the line-level resilience contract of the text
//! parser; only a malformed top-level document or contradictory
//! options fail the call.

pub mod cbn;
pub mod deserialize;
pub mod ingest;
pub mod types;

pub use cbn::from_cbn;
pub use deserialize::{decode_graph, InterchangeError};
pub use ingest::{from_interchange, PLACEHOLDER_EVIDENCE};
pub use types::*;

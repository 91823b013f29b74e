//! belgraph-core: BEL document parser and knowledge-graph assembler.
//!
//! Parses documents written in the Biological Expression Language into an
//! annotated, queryable multigraph: terms become content-addressed nodes,
//! statements become edges carrying a by-value snapshot of the citation,
//! evidence, and annotation scope in force when they were parsed.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`parse_document()`] -- parse a whole document into a [`BelGraph`]
//! - [`DocumentParser`] -- incremental line-oriented parsing
//! - [`ParserOptions`] -- naked-name, nesting, and citation-clearing policy
//! - [`NamespaceResolver`] -- externally supplied vocabulary lookups
//! - [`Term`], [`Relation`], [`Context`] -- the graph's node and edge model
//! - [`Warning`] -- non-fatal findings accumulated during a parse

/// BEL language version this parser targets.
pub const BEL_VERSION: &str = "1.0";

mod assemble;
pub mod context;
pub mod driver;
pub mod error;
pub mod graph;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod relation;
pub mod resolver;
pub mod term;

// ── Convenience re-exports: key types ────────────────────────────────

pub use context::{Citation, Context, ControlContext};
pub use error::{ConfigError, StatementError, Warning, WarningKind};
pub use graph::{BelGraph, EdgeData};
pub use options::ParserOptions;
pub use relation::Relation;
pub use resolver::{Lookup, MapResolver, NamespaceResolver};
pub use term::{Func, Identifier, Term, TranslocationKind, Variant};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use driver::{parse_document, DocumentParser, DOCUMENT_KEYS};
pub use parser::parse_term;

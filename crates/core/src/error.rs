//! Warning and error types for document parsing.
//!
//! Almost nothing in this crate is fatal: lexical, structural, and semantic
//! problems on a line become a [`Warning`] attached to the graph and parsing
//! moves on to the next line. The single exception is [`ConfigError`], which
//! rejects a contradictory parser configuration before any input is read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a recorded [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Unparsable token or line structure.
    Lexical,
    /// Malformed term nesting, unknown function or relation keyword, or
    /// argument-arity mismatch.
    Structural,
    /// An entity name without a namespace prefix under strict mode.
    NakedName,
    /// A name that is not a member of its (known) namespace.
    UnknownNamespaceTerm,
    /// A namespace the resolver does not know.
    NamespaceUndeclared,
    /// SET of an annotation that was never defined, or UNSET of a key that
    /// is not currently set.
    AnnotationUndeclared,
    /// A qualified relation parsed without citation and evidence in scope.
    MissingContext,
}

/// A non-fatal problem recorded against one logical line.
///
/// Warnings are append-only: the list attached to a graph only grows during
/// a parse and is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// 1-based logical line number (or record ordinal for adapter input).
    pub line: u32,
    /// The source text of the offending line.
    pub source: String,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(line: u32, source: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Warning {
            line,
            source: source.into(),
            kind,
            message: message.into(),
        }
    }
}

/// A failure scoped to a single statement or control line.
///
/// These never escape the document driver; each one is converted into a
/// [`Warning`] via [`StatementError::kind`] and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("{0}")]
    Lexical(String),
    #[error("{0}")]
    Structural(String),
    #[error("name '{0}' has no namespace")]
    NakedName(String),
    #[error("relation '{relation}' requires a citation and evidence to be set")]
    MissingContext { relation: String },
    #[error("annotation '{0}' has not been defined")]
    AnnotationUndeclared(String),
    #[error("cannot unset '{0}': it is not currently set")]
    UnsetMissing(String),
}

impl StatementError {
    /// The warning classification for this error.
    pub fn kind(&self) -> WarningKind {
        match self {
            StatementError::Lexical(_) => WarningKind::Lexical,
            StatementError::Structural(_) => WarningKind::Structural,
            StatementError::NakedName(_) => WarningKind::NakedName,
            StatementError::MissingContext { .. } => WarningKind::MissingContext,
            StatementError::AnnotationUndeclared(_) | StatementError::UnsetMissing(_) => {
                WarningKind::AnnotationUndeclared
            }
        }
    }
}

/// Contradictory parser configuration, detected at construction.
///
/// This is the only error the library returns to the caller; everything
/// found in the input itself is recorded as a [`Warning`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("naked_namespace '{0}' is set but allow_naked_names is disabled")]
    NakedNamespaceDisabled(String),
}

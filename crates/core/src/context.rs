//! Citation, evidence, and annotation scope.
//!
//! One [`ControlContext`] lives for exactly one parse run. SET and UNSET
//! lines mutate it in document order, and every statement captures a value
//! [`ControlContext::snapshot`] at edge-creation time — later mutation never
//! reaches an edge that has already been created.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A literature reference: `SET Citation = {"PubMed", "Article title", "12345"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "type")]
    pub citation_type: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Citation {
    pub fn new(citation_type: impl Into<String>, reference: impl Into<String>) -> Self {
        Citation {
            citation_type: citation_type.into(),
            reference: reference.into(),
            name: None,
        }
    }
}

/// The provenance scope attached to an edge.
///
/// Annotation values are sets so that the list form
/// `SET Tissue = {"brain", "liver"}` is first-class; a single SET stores a
/// singleton set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub citation: Option<Citation>,
    pub evidence: Option<String>,
    pub annotations: BTreeMap<String, BTreeSet<String>>,
}

impl Context {
    pub fn is_empty(&self) -> bool {
        self.citation.is_none() && self.evidence.is_none() && self.annotations.is_empty()
    }

    /// Whether a qualified relation may be recorded under this context:
    /// a citation plus non-blank evidence.
    pub fn has_support(&self) -> bool {
        self.citation.is_some()
            && self
                .evidence
                .as_deref()
                .is_some_and(|e| !e.trim().is_empty())
    }
}

/// The single mutable [`Context`] owned by one parser run.
#[derive(Debug, Clone)]
pub struct ControlContext {
    current: Context,
    citation_clearing: bool,
}

impl ControlContext {
    pub fn new(citation_clearing: bool) -> Self {
        ControlContext {
            current: Context::default(),
            citation_clearing,
        }
    }

    /// Resets citation, evidence, and annotations to empty.
    pub fn clear(&mut self) {
        self.current = Context::default();
    }

    /// Installs a citation. Under the citation-clearing policy a new
    /// citation opens a new provenance scope, so evidence and annotations
    /// are cleared first; with the policy disabled they are left in place.
    pub fn set_citation(&mut self, citation: Citation) {
        if self.citation_clearing {
            self.current.evidence = None;
            self.current.annotations.clear();
        }
        self.current.citation = Some(citation);
    }

    /// Removes the citation; returns false if none was set.
    pub fn unset_citation(&mut self) -> bool {
        self.current.citation.take().is_some()
    }

    pub fn set_evidence(&mut self, text: impl Into<String>) {
        self.current.evidence = Some(text.into());
    }

    /// Removes the evidence; returns false if none was set.
    pub fn unset_evidence(&mut self) -> bool {
        self.current.evidence.take().is_some()
    }

    /// Replaces the value set for one annotation.
    pub fn set_annotation(&mut self, name: impl Into<String>, values: BTreeSet<String>) {
        self.current.annotations.insert(name.into(), values);
    }

    /// Sets one annotation to a single value.
    pub fn set_annotation_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let mut values = BTreeSet::new();
        values.insert(value.into());
        self.current.annotations.insert(name.into(), values);
    }

    /// Removes one annotation; returns false if it was not set.
    pub fn unset_annotation(&mut self, name: &str) -> bool {
        self.current.annotations.remove(name).is_some()
    }

    /// `UNSET ALL`.
    pub fn unset_all(&mut self) {
        self.clear();
    }

    /// The context value a statement captures at edge creation.
    pub fn snapshot(&self) -> Context {
        self.current.clone()
    }

    pub fn citation(&self) -> Option<&Citation> {
        self.current.citation.as_ref()
    }

    pub fn evidence(&self) -> Option<&str> {
        self.current.evidence.as_deref()
    }

    pub fn annotations(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.current.annotations
    }

    pub fn has_support(&self) -> bool {
        self.current.has_support()
    }
}

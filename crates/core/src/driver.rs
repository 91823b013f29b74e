//! Document driver: logical-line assembly, dispatch, and the resilience
//! contract.
//!
//! The driver owns one parse: it joins continuation lines, routes each
//! logical line to the control, definition, or statement grammar, applies
//! the result, and converts every statement-scoped failure into a warning
//! so that a single malformed line never aborts the document. The only
//! fatal error is a contradictory configuration, rejected before any input
//! is read.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::assemble::Registrar;
use crate::context::ControlContext;
use crate::error::{ConfigError, StatementError, Warning};
use crate::graph::{BelGraph, EdgeData};
use crate::lexer::{self, Spanned, Token};
use crate::options::ParserOptions;
use crate::parser::{self, ControlLine, DefinitionLine, ParsedStatement, Parser};
use crate::resolver::NamespaceResolver;

/// Document properties accepted by `SET DOCUMENT <Key> = <value>`.
pub const DOCUMENT_KEYS: &[&str] = &[
    "Name",
    "Description",
    "Version",
    "Authors",
    "ContactInfo",
    "Copyright",
    "Disclaimer",
    "Licenses",
];

/// Parses a complete BEL document into a graph.
///
/// This is the whole-document convenience over [`DocumentParser`]; the
/// only failure is a contradictory configuration.
pub fn parse_document(
    text: &str,
    options: ParserOptions,
    resolver: &dyn NamespaceResolver,
) -> Result<BelGraph, ConfigError> {
    let mut parser = DocumentParser::new(options, resolver)?;
    parser.parse_lines(text.lines());
    Ok(parser.finish())
}

/// One document parse in progress.
pub struct DocumentParser<'r> {
    options: ParserOptions,
    resolver: &'r dyn NamespaceResolver,
    graph: BelGraph,
    control: ControlContext,
}

impl<'r> DocumentParser<'r> {
    pub fn new(
        options: ParserOptions,
        resolver: &'r dyn NamespaceResolver,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let control = ControlContext::new(options.citation_clearing);
        Ok(DocumentParser {
            options,
            resolver,
            graph: BelGraph::new(),
            control,
        })
    }

    /// Feeds physical lines in order, assembling logical lines: blank and
    /// `#` comment lines are skipped, a trailing `\` joins the next
    /// physical line, and a logical line keeps the number of its first
    /// physical line.
    pub fn parse_lines<'t>(&mut self, lines: impl Iterator<Item = &'t str>) {
        let mut pending: Option<(u32, String)> = None;
        for (ix, raw) in lines.enumerate() {
            let number = ix as u32 + 1;
            let trimmed = raw.trim();

            if let Some((start, mut text)) = pending.take() {
                if let Some(stripped) = trimmed.strip_suffix('\\') {
                    text.push(' ');
                    text.push_str(stripped.trim_end());
                    pending = Some((start, text));
                } else {
                    text.push(' ');
                    text.push_str(trimmed);
                    self.parse_line(start, &text);
                }
                continue;
            }

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(stripped) = trimmed.strip_suffix('\\') {
                pending = Some((number, stripped.trim_end().to_string()));
            } else {
                self.parse_line(number, trimmed);
            }
        }
        if let Some((start, text)) = pending {
            self.parse_line(start, &text);
        }
    }

    /// Parses one logical line. Never fails: every statement-scoped error
    /// is recorded as a warning and the driver moves on.
    pub fn parse_line(&mut self, line: u32, text: &str) {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return;
        }
        let tokens = match lexer::lex(text) {
            Ok(tokens) => tokens,
            Err(error) => {
                self.record_error(line, text, &error);
                return;
            }
        };
        if let Err(error) = self.dispatch(line, text, &tokens) {
            self.record_error(line, text, &error);
        }
    }

    fn dispatch(
        &mut self,
        line: u32,
        source: &str,
        tokens: &[Spanned],
    ) -> Result<(), StatementError> {
        let word = |ix: usize| match tokens.get(ix).map(|s| &s.token) {
            Some(Token::Word(w)) => Some(w.as_str()),
            _ => None,
        };
        match (word(0), word(1)) {
            (Some("SET"), Some("DOCUMENT")) => {
                let (key, value) = Parser::new(tokens, &self.options).parse_document_set()?;
                self.apply_document(key, value)
            }
            (Some("SET"), _) => {
                let control = Parser::new(tokens, &self.options).parse_set()?;
                self.apply_control(control)
            }
            (Some("UNSET"), _) => {
                let control = Parser::new(tokens, &self.options).parse_unset()?;
                self.apply_control(control)
            }
            (Some("DEFINE"), _) => {
                let definition = Parser::new(tokens, &self.options).parse_define()?;
                self.apply_definition(definition)
            }
            _ => self.apply_statement(line, source, tokens),
        }
    }

    fn apply_document(&mut self, key: String, value: String) -> Result<(), StatementError> {
        if !DOCUMENT_KEYS.contains(&key.as_str()) {
            return Err(StatementError::Structural(format!(
                "unknown document property '{key}'"
            )));
        }
        self.graph.set_document_value(key, value);
        Ok(())
    }

    fn apply_control(&mut self, control: ControlLine) -> Result<(), StatementError> {
        match control {
            ControlLine::SetCitation(citation) => {
                self.control.set_citation(citation);
                Ok(())
            }
            ControlLine::SetEvidence(text) => {
                self.control.set_evidence(text);
                Ok(())
            }
            ControlLine::SetAnnotation { key, values } => {
                if !self.graph.annotation_defined(&key) {
                    return Err(StatementError::AnnotationUndeclared(key));
                }
                self.control.set_annotation(key, values);
                Ok(())
            }
            ControlLine::UnsetCitation => self
                .control
                .unset_citation()
                .then_some(())
                .ok_or_else(|| StatementError::UnsetMissing("Citation".to_string())),
            ControlLine::UnsetEvidence => self
                .control
                .unset_evidence()
                .then_some(())
                .ok_or_else(|| StatementError::UnsetMissing("Evidence".to_string())),
            ControlLine::UnsetAnnotation(key) => {
                if self.control.unset_annotation(&key) {
                    Ok(())
                } else {
                    Err(StatementError::UnsetMissing(key))
                }
            }
            ControlLine::UnsetAll => {
                self.control.unset_all();
                Ok(())
            }
        }
    }

    fn apply_definition(&mut self, definition: DefinitionLine) -> Result<(), StatementError> {
        let (keyword, fresh) = match definition {
            DefinitionLine::NamespaceUrl { keyword, url } => {
                let fresh = self.graph.define_namespace_url(keyword.clone(), url);
                (keyword, fresh)
            }
            DefinitionLine::NamespaceList { keyword, values } => {
                let fresh = self.graph.define_namespace_list(keyword.clone(), values);
                (keyword, fresh)
            }
            DefinitionLine::AnnotationUrl { keyword, url } => {
                let fresh = self.graph.define_annotation_url(keyword.clone(), url);
                (keyword, fresh)
            }
            DefinitionLine::AnnotationList { keyword, values } => {
                let fresh = self.graph.define_annotation_list(keyword.clone(), values);
                (keyword, fresh)
            }
        };
        if fresh {
            Ok(())
        } else {
            Err(StatementError::Structural(format!(
                "'{keyword}' is already defined"
            )))
        }
    }

    /// Statement application is atomic: syntax, the nesting policy, and
    /// the context requirement are all checked before the first node is
    /// registered, so a dropped statement contributes nothing.
    fn apply_statement(
        &mut self,
        line: u32,
        source: &str,
        tokens: &[Spanned],
    ) -> Result<(), StatementError> {
        let statement = Parser::new(tokens, &self.options).parse_statement()?;

        if matches!(statement, ParsedStatement::Nested { .. }) && !self.options.allow_nested {
            return Err(StatementError::Structural(
                "nested statements are disabled; set allow_nested to accept them".to_string(),
            ));
        }

        let needs_context = match &statement {
            ParsedStatement::TermOnly(_) => None,
            ParsedStatement::Relation { relation, .. } => {
                relation.is_qualified().then_some(*relation)
            }
            ParsedStatement::Nested {
                relation,
                inner_relation,
                ..
            } => [*relation, *inner_relation]
                .into_iter()
                .find(|r| r.is_qualified()),
        };
        if let Some(relation) = needs_context {
            if !self.control.has_support() {
                return Err(StatementError::MissingContext {
                    relation: relation.keyword().to_string(),
                });
            }
        }

        let mut registrar = Registrar {
            graph: &mut self.graph,
            resolver: self.resolver,
            options: &self.options,
            line,
            source,
        };
        match statement {
            ParsedStatement::TermOnly(term) => {
                registrar.register(&term);
            }
            ParsedStatement::Relation {
                subject,
                relation,
                object,
            } => {
                let subject_ix = registrar.register(&subject);
                let object_ix = registrar.register(&object);
                let context = self.control.snapshot();
                self.graph
                    .add_edge(subject_ix, object_ix, EdgeData { relation, context });
            }
            ParsedStatement::Nested {
                subject,
                relation,
                inner_subject,
                inner_relation,
                inner_object,
            } => {
                let subject_ix = registrar.register(&subject);
                let inner_subject_ix = registrar.register(&inner_subject);
                let inner_object_ix = registrar.register(&inner_object);
                let context = self.control.snapshot();
                self.graph.add_edge(
                    subject_ix,
                    inner_subject_ix,
                    EdgeData {
                        relation,
                        context: context.clone(),
                    },
                );
                self.graph.add_edge(
                    inner_subject_ix,
                    inner_object_ix,
                    EdgeData {
                        relation: inner_relation,
                        context,
                    },
                );
            }
        }
        Ok(())
    }

    // ── Record entry points ─────────────────────────────────────────
    //
    // Adapter input arrives as decoded records rather than text lines;
    // these entry points take a caller-supplied ordinal in place of a
    // line number.

    /// Parses and registers a bare term, as when ingesting a node label.
    /// Failures become warnings; returns the node index on success.
    pub fn parse_term(&mut self, line: u32, text: &str) -> Option<NodeIndex> {
        let text = text.trim();
        match parser::parse_term(text, &self.options) {
            Ok(term) => {
                let mut registrar = Registrar {
                    graph: &mut self.graph,
                    resolver: self.resolver,
                    options: &self.options,
                    line,
                    source: text,
                };
                Some(registrar.register(&term))
            }
            Err(error) => {
                self.record_error(line, text, &error);
                None
            }
        }
    }

    /// Parses and applies one statement. Failures become warnings.
    pub fn parse_statement(&mut self, line: u32, text: &str) {
        let text = text.trim();
        let tokens = match lexer::lex(text) {
            Ok(tokens) => tokens,
            Err(error) => {
                self.record_error(line, text, &error);
                return;
            }
        };
        if let Err(error) = self.apply_statement(line, text, &tokens) {
            self.record_error(line, text, &error);
        }
    }

    pub fn control(&self) -> &ControlContext {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ControlContext {
        &mut self.control
    }

    pub fn graph(&self) -> &BelGraph {
        &self.graph
    }

    pub fn record_warning(&mut self, warning: Warning) {
        self.graph.warn(warning);
    }

    pub fn set_document_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.graph.set_document_value(key.into(), value.into());
    }

    pub fn define_namespace_url(
        &mut self,
        keyword: impl Into<String>,
        url: impl Into<String>,
    ) -> bool {
        self.graph.define_namespace_url(keyword.into(), url.into())
    }

    pub fn define_annotation_url(
        &mut self,
        keyword: impl Into<String>,
        url: impl Into<String>,
    ) -> bool {
        self.graph.define_annotation_url(keyword.into(), url.into())
    }

    /// Completes the parse and hands the graph to the caller.
    pub fn finish(self) -> BelGraph {
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            warnings = self.graph.warnings().len(),
            "document parse complete"
        );
        self.graph
    }

    fn record_error(&mut self, line: u32, source: &str, error: &StatementError) {
        self.graph
            .warn(Warning::new(line, source, error.kind(), error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MapResolver;

    #[test]
    fn joins_continuation_lines() {
        let resolver = MapResolver::empty();
        let mut parser = DocumentParser::new(ParserOptions::default(), &resolver).unwrap();
        parser.parse_lines(
            "SET DOCUMENT Description = \\\n    \"split over lines\"\n".lines(),
        );
        let graph = parser.finish();
        assert_eq!(graph.document()["Description"], "split over lines");
    }

    #[test]
    fn logical_line_number_is_first_physical() {
        let resolver = MapResolver::empty();
        let mut parser = DocumentParser::new(ParserOptions::default(), &resolver).unwrap();
        // Line 1 is a comment; the bad statement starts on line 2 and
        // continues onto line 3.
        parser.parse_lines("# header\nwidget(HGNC:AKT1) \\\n  -> p(HGNC:FOXO3)\n".lines());
        let graph = parser.finish();
        assert_eq!(graph.warnings().len(), 1);
        assert_eq!(graph.warnings()[0].line, 2);
    }

    #[test]
    fn unknown_document_property_warns() {
        let resolver = MapResolver::empty();
        let mut parser = DocumentParser::new(ParserOptions::default(), &resolver).unwrap();
        parser.parse_line(1, "SET DOCUMENT Flavor = \"cherry\"");
        let graph = parser.finish();
        assert_eq!(graph.warnings().len(), 1);
        assert!(graph.warnings()[0]
            .message
            .contains("unknown document property"));
        assert!(graph.document().is_empty());
    }
}

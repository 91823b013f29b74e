//! DEFINE lines and document properties.

use std::collections::BTreeSet;

use crate::error::StatementError;

use super::Parser;

/// A parsed namespace or annotation definition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DefinitionLine {
    NamespaceUrl { keyword: String, url: String },
    NamespaceList { keyword: String, values: BTreeSet<String> },
    AnnotationUrl { keyword: String, url: String },
    AnnotationList { keyword: String, values: BTreeSet<String> },
}

impl<'a> Parser<'a> {
    /// `SET DOCUMENT <key> = <value>`. Key validation is left to the
    /// driver, which knows the document property vocabulary.
    pub(crate) fn parse_document_set(&mut self) -> Result<(String, String), StatementError> {
        self.expect_word("SET")?;
        self.expect_word("DOCUMENT")?;
        let key = self.take_word()?;
        self.expect_eq()?;
        let value = self.take_value()?;
        self.expect_eof()?;
        Ok((key, value))
    }

    /// `DEFINE NAMESPACE <kw> AS URL "<url>"` and the ANNOTATION / LIST
    /// combinations of the same shape.
    pub(crate) fn parse_define(&mut self) -> Result<DefinitionLine, StatementError> {
        self.expect_word("DEFINE")?;
        let what = self.take_word()?;
        let keyword = self.take_word()?;
        self.expect_word("AS")?;
        let form = self.take_word()?;

        let line = match (what.as_str(), form.as_str()) {
            ("NAMESPACE", "URL") => DefinitionLine::NamespaceUrl {
                keyword,
                url: self.take_str()?,
            },
            ("NAMESPACE", "LIST") => DefinitionLine::NamespaceList {
                keyword,
                values: self.parse_value_list()?.into_iter().collect(),
            },
            ("ANNOTATION", "URL") => DefinitionLine::AnnotationUrl {
                keyword,
                url: self.take_str()?,
            },
            ("ANNOTATION", "LIST") => DefinitionLine::AnnotationList {
                keyword,
                values: self.parse_value_list()?.into_iter().collect(),
            },
            _ => {
                return Err(
                    self.err(format!("unsupported definition form '{what} AS {form}'"))
                )
            }
        };
        self.expect_eof()?;
        Ok(line)
    }
}

//! SET and UNSET lines: citation, evidence, and annotation scope control.

use std::collections::BTreeSet;

use crate::context::Citation;
use crate::error::StatementError;
use crate::lexer::Token;

use super::Parser;

/// A parsed scope-control line, applied to the [`crate::ControlContext`]
/// by the document driver.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ControlLine {
    SetCitation(Citation),
    SetEvidence(String),
    SetAnnotation {
        key: String,
        values: BTreeSet<String>,
    },
    UnsetCitation,
    UnsetEvidence,
    UnsetAnnotation(String),
    UnsetAll,
}

impl<'a> Parser<'a> {
    /// `SET <key> = <value>` where the key selects citation, evidence, or
    /// an annotation, and the value is a scalar or a brace list.
    pub(crate) fn parse_set(&mut self) -> Result<ControlLine, StatementError> {
        self.expect_word("SET")?;
        let key = self.take_word()?;
        self.expect_eq()?;

        let line = match key.as_str() {
            "Citation" => {
                let items = self.parse_value_list()?;
                if items.len() < 2 {
                    return Err(
                        self.err("citation requires at least a type and a reference")
                    );
                }
                // Two items are type and reference; three or more are type,
                // name, reference, with any further fields ignored.
                let mut citation = if items.len() == 2 {
                    Citation::new(&items[0], &items[1])
                } else {
                    Citation::new(&items[0], &items[2])
                };
                if items.len() > 2 {
                    citation.name = Some(items[1].clone());
                }
                ControlLine::SetCitation(citation)
            }
            "Evidence" | "SupportingText" => ControlLine::SetEvidence(self.take_value()?),
            _ => {
                let values = if self.cur() == &Token::LBrace {
                    let items = self.parse_value_list()?;
                    if items.is_empty() {
                        return Err(self.err("annotation list requires at least one value"));
                    }
                    items.into_iter().collect()
                } else {
                    BTreeSet::from([self.take_value()?])
                };
                ControlLine::SetAnnotation { key, values }
            }
        };
        self.expect_eof()?;
        Ok(line)
    }

    /// `UNSET <key>` or `UNSET ALL`.
    pub(crate) fn parse_unset(&mut self) -> Result<ControlLine, StatementError> {
        self.expect_word("UNSET")?;
        let key = self.take_word()?;
        self.expect_eof()?;
        Ok(match key.as_str() {
            "ALL" => ControlLine::UnsetAll,
            "Citation" => ControlLine::UnsetCitation,
            "Evidence" | "SupportingText" => ControlLine::UnsetEvidence,
            _ => ControlLine::UnsetAnnotation(key),
        })
    }

    /// `{ value, value, ... }`, possibly empty.
    pub(super) fn parse_value_list(&mut self) -> Result<Vec<String>, StatementError> {
        self.expect_lbrace()?;
        let mut items = Vec::new();
        if self.cur() != &Token::RBrace {
            items.push(self.take_value()?);
            while self.cur() == &Token::Comma {
                self.advance();
                items.push(self.take_value()?);
            }
        }
        self.expect_rbrace()?;
        Ok(items)
    }
}

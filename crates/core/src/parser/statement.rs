//! Statement grammar: `subject`, `subject relation object`, and the nested
//! `subject relation (inner_subject inner_relation inner_object)` form.

use crate::error::StatementError;
use crate::lexer::Token;
use crate::relation::Relation;
use crate::term::Term;

use super::Parser;

/// A syntactically complete statement, before context checks and graph
/// registration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedStatement {
    TermOnly(Term),
    Relation {
        subject: Term,
        relation: Relation,
        object: Term,
    },
    /// The nested object statement. It contributes two edges: subject to
    /// inner subject under the outer relation, and inner subject to inner
    /// object under the inner relation.
    Nested {
        subject: Term,
        relation: Relation,
        inner_subject: Term,
        inner_relation: Relation,
        inner_object: Term,
    },
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Result<ParsedStatement, StatementError> {
        let subject = self.parse_term()?;
        if self.at_eof() {
            return Ok(ParsedStatement::TermOnly(subject));
        }
        let relation = self.take_relation()?;

        if self.cur() == &Token::LParen {
            self.advance();
            let inner_subject = self.parse_term()?;
            let inner_relation = self.take_relation()?;
            let inner_object = self.parse_term()?;
            self.expect_rparen()?;
            self.expect_eof()?;
            return Ok(ParsedStatement::Nested {
                subject,
                relation,
                inner_subject,
                inner_relation,
                inner_object,
            });
        }

        let object = self.parse_term()?;
        self.expect_eof()?;
        Ok(ParsedStatement::Relation {
            subject,
            relation,
            object,
        })
    }

    fn take_relation(&mut self) -> Result<Relation, StatementError> {
        let relation = match self.cur() {
            Token::Word(w) => match Relation::from_keyword(w) {
                Some(relation) => relation,
                None => return Err(self.err(format!("unknown relation '{w}'"))),
            },
            Token::IncreasesArrow => Relation::Increases,
            Token::DecreasesArrow => Relation::Decreases,
            Token::DirectlyIncreasesArrow => Relation::DirectlyIncreases,
            Token::DirectlyDecreasesArrow => Relation::DirectlyDecreases,
            Token::AssociationArrow => Relation::Association,
            other => return Err(self.err(format!("expected a relation, got {other}"))),
        };
        self.advance();
        Ok(relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::options::ParserOptions;

    fn parse(text: &str) -> Result<ParsedStatement, StatementError> {
        let tokens = lexer::lex(text)?;
        let options = ParserOptions::default();
        let mut parser = Parser::new(&tokens, &options);
        parser.parse_statement()
    }

    #[test]
    fn parses_term_only() {
        assert!(matches!(
            parse("p(HGNC:AKT1)").unwrap(),
            ParsedStatement::TermOnly(_)
        ));
    }

    #[test]
    fn arrow_and_keyword_spellings_agree() {
        let arrow = parse("p(HGNC:AKT1) -> p(HGNC:FOXO3)").unwrap();
        let keyword = parse("p(HGNC:AKT1) increases p(HGNC:FOXO3)").unwrap();
        assert_eq!(arrow, keyword);
        match arrow {
            ParsedStatement::Relation { relation, .. } => {
                assert_eq!(relation, Relation::Increases)
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn parses_nested_statement() {
        let statement =
            parse("p(HGNC:AKT1) => (p(HGNC:FOXO3) -| bp(GOBP:apoptosis))").unwrap();
        match statement {
            ParsedStatement::Nested {
                relation,
                inner_relation,
                ..
            } => {
                assert_eq!(relation, Relation::DirectlyIncreases);
                assert_eq!(inner_relation, Relation::Decreases);
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_relation() {
        let err = parse("p(HGNC:AKT1) frobs p(HGNC:FOXO3)").unwrap_err();
        assert!(err.to_string().contains("unknown relation 'frobs'"), "{err}");
    }

    #[test]
    fn rejects_trailing_input() {
        let err = parse("p(HGNC:AKT1) -> p(HGNC:FOXO3) p(HGNC:TP53)").unwrap_err();
        assert!(err.to_string().contains("unexpected trailing input"), "{err}");
    }
}

//! Recursive-descent parsing over the token stream.
//!
//! One [`Parser`] is built per logical line. The grammar is split by line
//! kind: `term` handles BEL terms, `statement` full statements, `control`
//! the SET/UNSET family, and `definition` DEFINE lines and document
//! properties. All of them share the cursor and helper suite here.

mod control;
mod definition;
mod statement;
mod term;

pub(crate) use control::ControlLine;
pub(crate) use definition::DefinitionLine;
pub(crate) use statement::ParsedStatement;

use crate::error::StatementError;
use crate::lexer::{self, Spanned, Token};
use crate::options::ParserOptions;
use crate::term::Term;

/// Parses a standalone BEL term expression, such as `p(HGNC:AKT1)`.
///
/// This is the entry point for callers holding a bare term outside a
/// document, for example node labels in interchange payloads.
pub fn parse_term(text: &str, options: &ParserOptions) -> Result<Term, StatementError> {
    let tokens = lexer::lex(text)?;
    let mut parser = Parser::new(&tokens, options);
    let term = parser.parse_term()?;
    parser.expect_eof()?;
    Ok(term)
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(crate) struct Parser<'a> {
    tokens: &'a [Spanned],
    options: &'a ParserOptions,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Spanned], options: &'a ParserOptions) -> Self {
        Parser {
            tokens,
            options,
            pos: 0,
        }
    }

    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].token
    }

    fn peek(&self) -> &Token {
        let ix = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[ix].token
    }

    fn peek2(&self) -> &Token {
        let ix = (self.pos + 2).min(self.tokens.len() - 1);
        &self.tokens[ix].token
    }

    fn col(&self) -> u32 {
        self.tokens[self.pos.min(self.tokens.len() - 1)].col
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn at_eof(&self) -> bool {
        matches!(self.cur(), Token::Eof)
    }

    fn err(&self, message: impl Into<String>) -> StatementError {
        StatementError::Structural(format!("{} (column {})", message.into(), self.col()))
    }

    fn expect_lparen(&mut self) -> Result<(), StatementError> {
        if self.cur() == &Token::LParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '(', got {}", self.cur())))
        }
    }

    fn expect_rparen(&mut self) -> Result<(), StatementError> {
        if self.cur() == &Token::RParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected ')', got {}", self.cur())))
        }
    }

    fn expect_lbrace(&mut self) -> Result<(), StatementError> {
        if self.cur() == &Token::LBrace {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{{', got {}", self.cur())))
        }
    }

    fn expect_rbrace(&mut self) -> Result<(), StatementError> {
        if self.cur() == &Token::RBrace {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '}}', got {}", self.cur())))
        }
    }

    fn expect_comma(&mut self) -> Result<(), StatementError> {
        if self.cur() == &Token::Comma {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected ',', got {}", self.cur())))
        }
    }

    fn expect_eq(&mut self) -> Result<(), StatementError> {
        if self.cur() == &Token::Eq {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '=', got {}", self.cur())))
        }
    }

    fn expect_word(&mut self, expected: &str) -> Result<(), StatementError> {
        if let Token::Word(w) = self.cur() {
            if w == expected {
                self.advance();
                return Ok(());
            }
        }
        Err(self.err(format!("expected '{}', got {}", expected, self.cur())))
    }

    fn expect_eof(&mut self) -> Result<(), StatementError> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.err(format!("unexpected trailing input: {}", self.cur())))
        }
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.cur(), Token::Word(x) if x == w)
    }

    fn take_word(&mut self) -> Result<String, StatementError> {
        if let Token::Word(w) = self.cur().clone() {
            self.advance();
            Ok(w)
        } else {
            Err(self.err(format!("expected identifier, got {}", self.cur())))
        }
    }

    fn take_str(&mut self) -> Result<String, StatementError> {
        if let Token::Str(s) = self.cur().clone() {
            self.advance();
            Ok(s)
        } else {
            Err(self.err(format!("expected string literal, got {}", self.cur())))
        }
    }

    fn take_int(&mut self) -> Result<i64, StatementError> {
        if let Token::Int(n) = self.cur() {
            let n = *n;
            self.advance();
            Ok(n)
        } else {
            Err(self.err(format!("expected integer, got {}", self.cur())))
        }
    }

    /// A value position accepts a bare word, a quoted string, or an
    /// integer; all are carried as text.
    fn take_value(&mut self) -> Result<String, StatementError> {
        match self.cur().clone() {
            Token::Word(w) => {
                self.advance();
                Ok(w)
            }
            Token::Str(s) => {
                self.advance();
                Ok(s)
            }
            Token::Int(n) => {
                self.advance();
                Ok(n.to_string())
            }
            other => Err(self.err(format!("expected a value, got {other}"))),
        }
    }
}

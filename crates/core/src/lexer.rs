use crate::error::StatementError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifiers and keywords — distinguished in the parser
    Word(String),
    /// Quoted string literal (content without quotes, escapes resolved)
    Str(String),
    /// Integer literal
    Int(i64),
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Eq,
    // Relation arrows
    IncreasesArrow,         // ->
    DecreasesArrow,         // -|
    DirectlyIncreasesArrow, // =>
    DirectlyDecreasesArrow, // =|
    AssociationArrow,       // --
    // End of input
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{w}'"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Int(n) => write!(f, "{n}"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Eq => write!(f, "'='"),
            Token::IncreasesArrow => write!(f, "'->'"),
            Token::DecreasesArrow => write!(f, "'-|'"),
            Token::DirectlyIncreasesArrow => write!(f, "'=>'"),
            Token::DirectlyDecreasesArrow => write!(f, "'=|'"),
            Token::AssociationArrow => write!(f, "'--'"),
            Token::Eof => write!(f, "end of line"),
        }
    }
}

/// A token together with its 1-based column on the logical line.
#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub col: u32,
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, StatementError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];
        let col = pos as u32 + 1;

        // Whitespace
        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // String literal
        if c == '"' {
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(StatementError::Lexical(format!(
                        "unterminated string literal at column {}",
                        col
                    )));
                }
                let sc = chars[pos];
                if sc == '"' {
                    pos += 1;
                    break;
                }
                if sc == '\\' {
                    pos += 1;
                    if pos >= chars.len() {
                        return Err(StatementError::Lexical(format!(
                            "unterminated escape in string at column {}",
                            col
                        )));
                    }
                    match chars[pos] {
                        '"' => s.push('"'),
                        '\\' => s.push('\\'),
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        other => {
                            s.push('\\');
                            s.push(other);
                        }
                    }
                    pos += 1;
                    continue;
                }
                s.push(sc);
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Str(s),
                col,
            });
            continue;
        }

        // Number
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let s: String = chars[start..pos].iter().collect();
            let n: i64 = s.parse().map_err(|_| {
                StatementError::Lexical(format!("invalid integer '{}' at column {}", s, col))
            })?;
            tokens.push(Spanned {
                token: Token::Int(n),
                col,
            });
            continue;
        }

        // Punctuation and arrows
        match c {
            '(' => {
                tokens.push(Spanned {
                    token: Token::LParen,
                    col,
                });
                pos += 1;
                continue;
            }
            ')' => {
                tokens.push(Spanned {
                    token: Token::RParen,
                    col,
                });
                pos += 1;
                continue;
            }
            '{' => {
                tokens.push(Spanned {
                    token: Token::LBrace,
                    col,
                });
                pos += 1;
                continue;
            }
            '}' => {
                tokens.push(Spanned {
                    token: Token::RBrace,
                    col,
                });
                pos += 1;
                continue;
            }
            ',' => {
                tokens.push(Spanned {
                    token: Token::Comma,
                    col,
                });
                pos += 1;
                continue;
            }
            ':' => {
                tokens.push(Spanned {
                    token: Token::Colon,
                    col,
                });
                pos += 1;
                continue;
            }
            '=' => {
                let token = match chars.get(pos + 1) {
                    Some('>') => {
                        pos += 2;
                        Token::DirectlyIncreasesArrow
                    }
                    Some('|') => {
                        pos += 2;
                        Token::DirectlyDecreasesArrow
                    }
                    _ => {
                        pos += 1;
                        Token::Eq
                    }
                };
                tokens.push(Spanned { token, col });
                continue;
            }
            '-' => {
                let token = match chars.get(pos + 1) {
                    Some('>') => Token::IncreasesArrow,
                    Some('|') => Token::DecreasesArrow,
                    Some('-') => Token::AssociationArrow,
                    _ => {
                        return Err(StatementError::Lexical(format!(
                            "unexpected character '-' at column {}",
                            col
                        )))
                    }
                };
                pos += 2;
                tokens.push(Spanned { token, col });
                continue;
            }
            _ => {}
        }

        // Identifier / keyword
        if c.is_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                col,
            });
            continue;
        }

        return Err(StatementError::Lexical(format!(
            "unexpected character '{}' at column {}",
            c, col
        )));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        col: chars.len() as u32 + 1,
    });
    Ok(tokens)
}

// Error types for lexing and parsing.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::Token;

/// A location in the source text.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
/// `offset` is the 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// What went wrong while scanning a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated quoted identifier")]
    UnterminatedQuotedIdentifier,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid placeholder number `{0}`")]
    InvalidPlaceholder(String),
}

/// A tokenization failure. `position` points at the start of the offending
/// token or character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {position}")]
pub struct LexError {
    pub position: Position,
    pub kind: LexErrorKind,
}

/// A grammar violation: the parser wanted `expected` but saw `found`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at {position}: expected {expected}, found {}", found.describe())]
pub struct SyntaxError {
    pub position: Position,
    pub expected: String,
    pub found: Token,
}

/// Any failure produced while turning text into statements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("nesting depth exceeds limit of {limit} at {position}")]
    RecursionLimit { position: Position, limit: usize },
}

impl ParseError {
    /// Where the failure was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(e) => e.position,
            Self::Syntax(e) => e.position,
            Self::RecursionLimit { position, .. } => *position,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_syntax_error_message() {
        let err = ParseError::from(SyntaxError {
            position: Position::new(1, 14, 13),
            expected: "table name".to_owned(),
            found: Token {
                kind: TokenKind::Eof,
                text: String::new(),
                position: Position::new(1, 14, 13),
            },
        });
        assert_eq!(
            err.to_string(),
            "syntax error at line 1, column 14: expected table name, found end of input"
        );
        assert_eq!(err.position().offset, 13);
    }

    #[test]
    fn test_lex_error_message() {
        let err = ParseError::from(LexError {
            position: Position::new(2, 3, 10),
            kind: LexErrorKind::UnexpectedCharacter('#'),
        });
        assert_eq!(err.to_string(), "unexpected character '#' at line 2, column 3");
        assert_eq!(err.position().line, 2);
    }
}

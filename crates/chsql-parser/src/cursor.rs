// Read-only cursor over a token vector.

use crate::error::Position;
use crate::token::{Token, TokenKind};

/// A position within a token sequence that always ends with `Eof`.
///
/// Peeking past the end yields the final `Eof` token, and advancing at `Eof`
/// stays put, so the parser never has to bounds-check.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    /// Wrap `tokens`, appending an `Eof` if the sequence lacks one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let position = tokens.last().map_or_else(Position::default, |t| {
                Position::new(
                    t.position.line,
                    t.position.column + u32::try_from(t.text.chars().count()).unwrap_or(0),
                    t.position.offset + t.text.len(),
                )
            });
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                position,
            });
        }
        Self { tokens, pos: 0 }
    }

    /// The current token.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// The token `n` places ahead, clamped to the final `Eof`.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Consume and return the current token. At `Eof` the cursor does not
    /// move and keeps returning `Eof`.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Number of tokens, including the trailing `Eof`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

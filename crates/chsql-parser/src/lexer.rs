// SQL lexer.
//
// Converts SQL text into a stream of tokens. Uses memchr for accelerated
// quote and newline scanning. Tracks line and character column so every
// token and error carries a usable position.

use chsql_ast::keywords::{is_ident_continue, is_ident_start};
use memchr::{memchr, memchr2};

use crate::error::{LexError, LexErrorKind, Position};
use crate::token::{Token, TokenKind};

/// SQL lexer that produces tokens one at a time from source text.
pub struct Lexer<'a> {
    /// The source text.
    src: &'a str,
    /// Current byte offset into `src`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column in characters (1-based).
    col: u32,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            src: source,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with an `Eof`
    /// token whose position is just past the last character.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let start = self.pos;
        let position = self.position();

        let Some(ch) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                position,
            });
        };

        let kind = match ch {
            '\'' => self.lex_string(position)?,
            '"' => self.lex_quoted_id(b'"', position)?,
            '`' => self.lex_quoted_id(b'`', position)?,

            '0'..='9' => self.lex_number(),
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number(),

            c if is_ident_start(c) => self.lex_identifier(),

            '?' => self.lex_question(position)?,
            ':' | '$' => self.lex_named_param(ch, position)?,

            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '[' => self.single(TokenKind::LeftBracket),
            ']' => self.single(TokenKind::RightBracket),
            '.' => self.single(TokenKind::Dot),

            '=' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '<' => {
                self.advance();
                match self.peek() {
                    Some(b'=') => {
                        self.advance();
                        TokenKind::Le
                    }
                    Some(b'>') => {
                        self.advance();
                        TokenKind::LtGt
                    }
                    _ => TokenKind::Lt,
                }
            }
            '>' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '!' if self.peek_at(1) == Some(b'=') => {
                self.advance();
                self.advance();
                TokenKind::Ne
            }
            '|' if self.peek_at(1) == Some(b'|') => {
                self.advance();
                self.advance();
                TokenKind::Concat
            }

            other => {
                return Err(LexError {
                    position,
                    kind: LexErrorKind::UnexpectedCharacter(other),
                });
            }
        };

        Ok(Token {
            kind,
            text: self.src[start..self.pos].to_owned(),
            position,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    const fn position(&self) -> Position {
        Position::new(self.line, self.col, self.pos)
    }

    /// Consume one byte. Columns advance once per character, so UTF-8
    /// continuation bytes are not counted.
    fn advance(&mut self) {
        let b = self.src.as_bytes()[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.col = 1;
        } else if b & 0xC0 != 0x80 {
            self.col += 1;
        }
    }

    /// Consume `n` bytes. Uses memchr to count newlines in bulk.
    fn advance_by(&mut self, n: usize) {
        let end = self.pos + n;
        let mut chunk = &self.src[self.pos..end];
        while let Some(nl) = memchr(b'\n', chunk.as_bytes()) {
            self.line += 1;
            self.col = 1;
            chunk = &chunk[nl + 1..];
        }
        let counted = u32::try_from(chunk.chars().count()).unwrap_or(u32::MAX);
        self.col = self.col.saturating_add(counted);
        self.pos = end;
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.advance_by(c.len_utf8());
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Skip whitespace, line comments (`--`), and nested block comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.advance();
            }

            match (self.peek(), self.peek_at(1)) {
                (Some(b'-'), Some(b'-')) => {
                    let rest = &self.src.as_bytes()[self.pos..];
                    let len = memchr(b'\n', rest).unwrap_or(rest.len());
                    self.advance_by(len);
                }
                (Some(b'/'), Some(b'*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let position = self.position();
        self.advance(); // /
        self.advance(); // *
        let mut depth = 1u32;
        while depth > 0 {
            let rest = &self.src.as_bytes()[self.pos..];
            let Some(offset) = memchr2(b'*', b'/', rest) else {
                return Err(LexError {
                    position,
                    kind: LexErrorKind::UnterminatedBlockComment,
                });
            };
            self.advance_by(offset);
            match (self.peek(), self.peek_at(1)) {
                (Some(b'/'), Some(b'*')) => {
                    self.advance();
                    self.advance();
                    depth += 1;
                }
                (Some(b'*'), Some(b'/')) => {
                    self.advance();
                    self.advance();
                    depth -= 1;
                }
                _ => self.advance(),
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Literal tokenizers
    // -----------------------------------------------------------------------

    /// Lex a single-quoted string. `''` and backslash escapes are resolved;
    /// an unknown backslash pair is kept verbatim.
    fn lex_string(&mut self, position: Position) -> Result<TokenKind, LexError> {
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            let rest = &self.src.as_bytes()[self.pos..];
            let Some(offset) = memchr2(b'\'', b'\\', rest) else {
                self.advance_by(rest.len());
                return Err(LexError {
                    position,
                    kind: LexErrorKind::UnterminatedString,
                });
            };
            value.push_str(&self.src[self.pos..self.pos + offset]);
            self.advance_by(offset);

            if self.peek() == Some(b'\\') {
                self.advance();
                let Some(escaped) = self.peek_char() else {
                    return Err(LexError {
                        position,
                        kind: LexErrorKind::UnterminatedString,
                    });
                };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    '\\' | '\'' | '"' => value.push(escaped),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
                self.advance_char();
                continue;
            }

            self.advance(); // the quote
            if self.peek() == Some(b'\'') {
                value.push('\'');
                self.advance();
            } else {
                return Ok(TokenKind::String(value));
            }
        }
    }

    /// Lex a `"..."` or `` `...` `` identifier. The quote character is
    /// escaped by doubling it.
    fn lex_quoted_id(&mut self, quote: u8, position: Position) -> Result<TokenKind, LexError> {
        self.advance();

        let mut value = String::new();
        loop {
            let rest = &self.src.as_bytes()[self.pos..];
            let Some(offset) = memchr(quote, rest) else {
                self.advance_by(rest.len());
                return Err(LexError {
                    position,
                    kind: LexErrorKind::UnterminatedQuotedIdentifier,
                });
            };
            value.push_str(&self.src[self.pos..self.pos + offset]);
            self.advance_by(offset);
            self.advance();

            if self.peek() == Some(quote) {
                value.push(char::from(quote));
                self.advance();
            } else {
                return Ok(TokenKind::QuotedId(value));
            }
        }
    }

    /// Lex a number. The token keeps its source text; an exponent is only
    /// consumed when digits follow it.
    fn lex_number(&mut self) -> TokenKind {
        let start = self.pos;

        if self.peek() == Some(b'0')
            && matches!(self.peek_at(1), Some(b'x' | b'X'))
            && self.peek_at(2).is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return TokenKind::Number(self.src[start..self.pos].to_owned());
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        // `1.5`, `.5` and `1.`; a dot followed by a name is not part of the number.
        if self.peek() == Some(b'.')
            && !self
                .peek_at(1)
                .is_some_and(|c| c == b'.' || c == b'_' || c.is_ascii_alphabetic())
        {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..=sign {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        TokenKind::Number(self.src[start..self.pos].to_owned())
    }

    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek_char().is_some_and(is_ident_continue) {
            self.advance_char();
        }
        let word = &self.src[start..self.pos];
        TokenKind::lookup_keyword(word).unwrap_or_else(|| TokenKind::Id(word.to_owned()))
    }

    /// `?` or `?NNN`.
    fn lex_question(&mut self, position: Position) -> Result<TokenKind, LexError> {
        self.advance();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if start == self.pos {
            return Ok(TokenKind::Question);
        }
        let digits = &self.src[start..self.pos];
        digits
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(TokenKind::QuestionNum)
            .ok_or_else(|| LexError {
                position,
                kind: LexErrorKind::InvalidPlaceholder(digits.to_owned()),
            })
    }

    /// `:name` or `$name`. A lone sigil is an unexpected character.
    fn lex_named_param(&mut self, sigil: char, position: Position) -> Result<TokenKind, LexError> {
        if !self
            .src
            .get(self.pos + 1..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(is_ident_continue)
        {
            return Err(LexError {
                position,
                kind: LexErrorKind::UnexpectedCharacter(sigil),
            });
        }
        self.advance();
        let start = self.pos;
        while self.peek_char().is_some_and(is_ident_continue) {
            self.advance_char();
        }
        let name = self.src[start..self.pos].to_owned();
        Ok(if sigil == ':' {
            TokenKind::ColonParam(name)
        } else {
            TokenKind::DollarParam(name)
        })
    }
}

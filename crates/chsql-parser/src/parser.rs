// Recursive descent parser: driver loop, token helpers and SELECT.
//
// Expression parsing lives in expr.rs; the remaining statement families live
// in dml.rs, ddl.rs and basic.rs as further `impl Parser` blocks.

use chsql_ast::{
    CompoundOp, Cte, FromClause, Join, JoinConstraint, JoinKind, LimitClause, NullsOrder,
    OrderByItem, QualifiedName, SelectBody, SelectCore, SelectItem, SelectStatement,
    SetQuantifier, Setting, SortDirection, Statement, TableFactor, WithClause,
};
use tracing::trace;

use crate::config::ParserConfig;
use crate::cursor::TokenCursor;
use crate::error::{ParseError, Result, SyntaxError};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

pub struct Parser {
    pub(crate) cursor: TokenCursor,
    config: ParserConfig,
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            config,
            depth: 0,
        }
    }

    /// Lex `sql` completely, then build a parser over the tokens. Lexical
    /// errors anywhere in the input surface here, before any parsing.
    pub fn from_sql(sql: &str) -> Result<Self> {
        Self::from_sql_with(sql, ParserConfig::default())
    }

    pub fn from_sql_with(sql: &str, config: ParserConfig) -> Result<Self> {
        let tokens = Lexer::tokenize(sql)?;
        trace!(tokens = tokens.len(), "lexed source");
        Ok(Self::with_config(tokens, config))
    }

    /// Parse every statement up to end of input.
    ///
    /// Empty statements (`;;`) are skipped. Each statement must be followed
    /// by `;` or end of input. The first error aborts the whole parse.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>> {
        let mut stmts = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.at_eof() {
                break;
            }
            let stmt = self.parse_statement()?;
            trace!(category = %stmt.category(), "parsed statement");
            stmts.push(stmt);
            if !self.eat(&TokenKind::Semicolon) && !self.at_eof() {
                return Err(self.err_expected("';' or end of input"));
            }
        }
        Ok(stmts)
    }

    /// Parse one statement starting at the current token.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek() {
            TokenKind::KwSelect | TokenKind::KwWith | TokenKind::LeftParen => {
                Ok(Statement::Select(self.parse_query()?))
            }
            TokenKind::KwInsert => self.parse_insert(),
            TokenKind::KwUpdate => self.parse_update(),
            TokenKind::KwDelete => self.parse_delete(),
            TokenKind::KwCreate => self.parse_create(),
            TokenKind::KwAlter => self.parse_alter(),
            TokenKind::KwDrop => self.parse_drop(),
            TokenKind::KwSet => self.parse_set(),
            TokenKind::KwDesc => self.parse_describe(),
            TokenKind::Id(word) => match word.to_ascii_uppercase().as_str() {
                "TRUNCATE" => self.parse_truncate(),
                "RENAME" => self.parse_rename(),
                "USE" => self.parse_use(),
                "SHOW" => self.parse_show(),
                "DESCRIBE" => self.parse_describe(),
                "EXPLAIN" => self.parse_explain(),
                "OPTIMIZE" => self.parse_optimize(),
                "BEGIN" => Ok(self.parse_transaction(Statement::Begin)),
                "COMMIT" => Ok(self.parse_transaction(Statement::Commit)),
                "ROLLBACK" => Ok(self.parse_transaction(Statement::Rollback)),
                _ => Err(self.err_expected("statement")),
            },
            _ => Err(self.err_expected("statement")),
        }
    }

    // -----------------------------------------------------------------------
    // Token navigation
    // -----------------------------------------------------------------------

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.cursor.peek().kind
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &TokenKind {
        &self.cursor.peek_nth(n).kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.cursor.at_eof()
    }

    pub(crate) fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    /// Same variant as `kind`, ignoring any payload.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    pub(crate) fn check_kw(&self, kw: &TokenKind) -> bool {
        self.peek() == kw
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_kw(&mut self, kw: &TokenKind) -> bool {
        if self.peek() == kw {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_kw(&mut self, kw: &TokenKind) -> Result<()> {
        if self.eat_kw(kw) {
            Ok(())
        } else {
            Err(self.err_expected(kw.keyword_text().unwrap_or("keyword")))
        }
    }

    pub(crate) fn expect_token(&mut self, kind: &TokenKind, what: &str) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.err_expected(what))
        }
    }

    /// Whether the current token is the contextual word `word`.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        Self::is_word(self.peek(), word)
    }

    pub(crate) fn check_word_nth(&self, n: usize, word: &str) -> bool {
        Self::is_word(self.peek_nth(n), word)
    }

    fn is_word(kind: &TokenKind, word: &str) -> bool {
        matches!(kind, TokenKind::Id(s) if s.eq_ignore_ascii_case(word))
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.err_expected(word))
        }
    }

    pub(crate) fn err_expected(&self, what: &str) -> ParseError {
        let found = self.cursor.peek().clone();
        ParseError::Syntax(SyntaxError {
            position: found.position,
            expected: what.to_owned(),
            found,
        })
    }

    fn check_depth(&self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::RecursionLimit {
                position: self.cursor.peek().position,
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is hit.
    pub(crate) fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.check_depth()?;
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Build a left-deep chain (`a + b + c`, `x UNION y UNION z`) in a loop.
    /// Every link `f` adds through [`Self::add_link`] nests the tree one
    /// level deeper, so it counts against `max_depth` until the chain closes.
    pub(crate) fn left_chain<T>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut usize) -> Result<T>,
    ) -> Result<T> {
        let mut links = 0;
        let result = f(self, &mut links);
        self.depth -= links;
        result
    }

    pub(crate) fn add_link(&mut self, links: &mut usize) -> Result<()> {
        self.check_depth()?;
        self.depth += 1;
        *links += 1;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shared fragments
    // -----------------------------------------------------------------------

    pub(crate) fn parse_identifier(&mut self) -> Result<String> {
        let name = match self.peek() {
            TokenKind::Id(s) | TokenKind::QuotedId(s) => s.clone(),
            _ => return Err(self.err_expected("identifier")),
        };
        self.advance();
        Ok(name)
    }

    pub(crate) fn check_identifier(&self) -> bool {
        matches!(self.peek(), TokenKind::Id(_) | TokenKind::QuotedId(_))
    }

    /// `name` or `db.name`.
    pub(crate) fn parse_qualified_name(&mut self) -> Result<QualifiedName> {
        let first = self.parse_identifier()?;
        if self.eat(&TokenKind::Dot) {
            let second = self.parse_identifier()?;
            Ok(QualifiedName::qualified(first, second))
        } else {
            Ok(QualifiedName::bare(first))
        }
    }

    /// A bare word that may also be spelled like a keyword: engine and
    /// output-format names. The raw text is kept.
    pub(crate) fn parse_word(&mut self, what: &str) -> Result<String> {
        let word = match self.peek() {
            TokenKind::Id(s) | TokenKind::QuotedId(s) => s.clone(),
            kind if kind.is_keyword() => self.cursor.peek().text.clone(),
            _ => return Err(self.err_expected(what)),
        };
        self.advance();
        Ok(word)
    }

    pub(crate) fn parse_string(&mut self, what: &str) -> Result<String> {
        if let TokenKind::String(s) = self.peek() {
            let s = s.clone();
            self.advance();
            Ok(s)
        } else {
            Err(self.err_expected(what))
        }
    }

    /// `[AS] alias`. Any unquoted identifier is taken as an implicit alias.
    pub(crate) fn try_alias(&mut self) -> Result<Option<String>> {
        if self.eat_kw(&TokenKind::KwAs) {
            return Ok(Some(self.parse_identifier()?));
        }
        if self.check_identifier() {
            return Ok(Some(self.parse_identifier()?));
        }
        Ok(None)
    }

    pub(crate) fn parse_comma_sep<T>(
        &mut self,
        f: fn(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut v = vec![f(self)?];
        while self.eat(&TokenKind::Comma) {
            v.push(f(self)?);
        }
        Ok(v)
    }

    /// `( ident, ... )`
    pub(crate) fn parse_paren_identifiers(&mut self) -> Result<Vec<String>> {
        self.expect_token(&TokenKind::LeftParen, "`(`")?;
        let names = self.parse_comma_sep(Self::parse_identifier)?;
        self.expect_token(&TokenKind::RightParen, "`)`")?;
        Ok(names)
    }

    /// `IF NOT EXISTS`
    pub(crate) fn parse_if_not_exists(&mut self) -> bool {
        if self.check_word("IF")
            && self.peek_nth(1) == &TokenKind::KwNot
            && self.peek_nth(2) == &TokenKind::KwExists
        {
            for _ in 0..3 {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    /// `IF EXISTS`
    pub(crate) fn parse_if_exists(&mut self) -> bool {
        if self.check_word("IF") && self.peek_nth(1) == &TokenKind::KwExists {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// `ON CLUSTER name`
    pub(crate) fn parse_on_cluster(&mut self) -> Result<Option<String>> {
        if self.check_kw(&TokenKind::KwOn) && self.check_word_nth(1, "CLUSTER") {
            self.advance();
            self.advance();
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }

    pub(crate) fn parse_setting(&mut self) -> Result<Setting> {
        let name = self.parse_identifier()?;
        self.expect_token(&TokenKind::Eq, "`=`")?;
        let value = self.parse_expr()?;
        Ok(Setting { name, value })
    }

    // -----------------------------------------------------------------------
    // SELECT
    // -----------------------------------------------------------------------

    /// A full query: CTEs, set-operation body and trailing clauses.
    pub(crate) fn parse_query(&mut self) -> Result<SelectStatement> {
        self.descend(Self::parse_query_inner)
    }

    fn parse_query_inner(&mut self) -> Result<SelectStatement> {
        let with = if self.check_kw(&TokenKind::KwWith) {
            Some(self.parse_with()?)
        } else {
            None
        };

        let body = self.parse_select_body(0)?;

        let order_by = if self.eat_kw(&TokenKind::KwOrder) {
            self.expect_kw(&TokenKind::KwBy)?;
            self.parse_comma_sep(Self::parse_ordering_term)?
        } else {
            Vec::new()
        };

        let limit = self.parse_limit()?;

        let settings = if self.eat_kw(&TokenKind::KwSettings) {
            self.parse_comma_sep(Self::parse_setting)?
        } else {
            Vec::new()
        };

        let format = if self.eat_kw(&TokenKind::KwFormat) {
            Some(self.parse_word("format name")?)
        } else {
            None
        };

        Ok(SelectStatement {
            with,
            body,
            order_by,
            limit,
            settings,
            format,
        })
    }

    fn parse_with(&mut self) -> Result<WithClause> {
        self.expect_kw(&TokenKind::KwWith)?;
        let recursive = self.eat_kw(&TokenKind::KwRecursive);
        let ctes = self.parse_comma_sep(Self::parse_cte)?;
        Ok(WithClause { recursive, ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte> {
        let name = self.parse_identifier()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_identifiers()?
        } else {
            Vec::new()
        };
        self.expect_kw(&TokenKind::KwAs)?;
        self.expect_token(&TokenKind::LeftParen, "`(`")?;
        let query = self.parse_query()?;
        self.expect_token(&TokenKind::RightParen, "`)`")?;
        Ok(Cte {
            name,
            columns,
            query: Box::new(query),
        })
    }

    /// Set operations by precedence climbing. INTERSECT binds tighter than
    /// UNION and EXCEPT; equal levels associate left.
    fn parse_select_body(&mut self, min_prec: u8) -> Result<SelectBody> {
        let left = self.parse_select_operand()?;
        self.left_chain(|p, links| p.parse_compound_chain(left, min_prec, links))
    }

    fn parse_compound_chain(
        &mut self,
        mut left: SelectBody,
        min_prec: u8,
        links: &mut usize,
    ) -> Result<SelectBody> {
        loop {
            let op = match self.peek() {
                TokenKind::KwUnion => CompoundOp::Union,
                TokenKind::KwIntersect => CompoundOp::Intersect,
                TokenKind::KwExcept => CompoundOp::Except,
                _ => break,
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.add_link(links)?;
            self.advance();
            let quantifier = if self.eat_kw(&TokenKind::KwAll) {
                SetQuantifier::All
            } else if self.eat_kw(&TokenKind::KwDistinct) {
                SetQuantifier::Distinct
            } else {
                SetQuantifier::None
            };
            let right = self.parse_select_body(prec + 1)?;
            left = SelectBody::Compound {
                op,
                quantifier,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_select_operand(&mut self) -> Result<SelectBody> {
        match self.peek() {
            TokenKind::KwSelect => Ok(SelectBody::Select(Box::new(self.parse_select_core()?))),
            TokenKind::LeftParen => {
                self.advance();
                let query = self.parse_query()?;
                self.expect_token(&TokenKind::RightParen, "`)`")?;
                Ok(SelectBody::Nested(Box::new(query)))
            }
            _ => Err(self.err_expected("SELECT or `(`")),
        }
    }

    fn parse_select_core(&mut self) -> Result<SelectCore> {
        self.expect_kw(&TokenKind::KwSelect)?;
        let distinct = if self.eat_kw(&TokenKind::KwDistinct) {
            true
        } else {
            self.eat_kw(&TokenKind::KwAll);
            false
        };

        let projection = self.parse_comma_sep(Self::parse_select_item)?;

        let from = if self.eat_kw(&TokenKind::KwFrom) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };

        let selection = if self.eat_kw(&TokenKind::KwWhere) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.eat_kw(&TokenKind::KwGroup) {
            self.expect_kw(&TokenKind::KwBy)?;
            self.parse_comma_sep(Self::parse_expr)?
        } else {
            Vec::new()
        };

        let having = if self.eat_kw(&TokenKind::KwHaving) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(SelectCore {
            distinct,
            projection,
            from,
            selection,
            group_by,
            having,
        })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectItem::Wildcard);
        }

        let ident = |k: &TokenKind| matches!(k, TokenKind::Id(_) | TokenKind::QuotedId(_));
        // t.*
        if ident(self.peek())
            && self.peek_nth(1) == &TokenKind::Dot
            && self.peek_nth(2) == &TokenKind::Star
        {
            let table = self.parse_identifier()?;
            self.advance();
            self.advance();
            return Ok(SelectItem::QualifiedWildcard(QualifiedName::bare(table)));
        }
        // db.t.*
        if ident(self.peek())
            && self.peek_nth(1) == &TokenKind::Dot
            && ident(self.peek_nth(2))
            && self.peek_nth(3) == &TokenKind::Dot
            && self.peek_nth(4) == &TokenKind::Star
        {
            let name = self.parse_qualified_name()?;
            self.advance();
            self.advance();
            return Ok(SelectItem::QualifiedWildcard(name));
        }

        let expr = self.parse_expr()?;
        let alias = self.try_alias()?;
        Ok(SelectItem::Expr { expr, alias })
    }

    fn parse_from_clause(&mut self) -> Result<FromClause> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        while let Some(join) = self.parse_join()? {
            joins.push(join);
        }
        Ok(FromClause { relation, joins })
    }

    fn parse_join(&mut self) -> Result<Option<Join>> {
        let kind = match self.peek() {
            TokenKind::Comma => {
                self.advance();
                let relation = self.parse_table_factor()?;
                return Ok(Some(Join {
                    kind: JoinKind::Comma,
                    relation,
                    constraint: None,
                }));
            }
            TokenKind::KwJoin => JoinKind::Inner,
            TokenKind::KwInner => {
                self.advance();
                JoinKind::Inner
            }
            TokenKind::KwLeft | TokenKind::KwRight | TokenKind::KwFull => {
                let kind = match self.advance().kind {
                    TokenKind::KwLeft => JoinKind::Left,
                    TokenKind::KwRight => JoinKind::Right,
                    _ => JoinKind::Full,
                };
                self.eat_kw(&TokenKind::KwOuter);
                kind
            }
            TokenKind::KwCross => {
                self.advance();
                JoinKind::Cross
            }
            _ => return Ok(None),
        };
        self.expect_kw(&TokenKind::KwJoin)?;
        let relation = self.parse_table_factor()?;

        let constraint = if kind == JoinKind::Cross {
            None
        } else if self.eat_kw(&TokenKind::KwOn) {
            Some(JoinConstraint::On(self.parse_expr()?))
        } else if self.eat_kw(&TokenKind::KwUsing) {
            Some(JoinConstraint::Using(self.parse_paren_identifiers()?))
        } else {
            return Err(self.err_expected("ON or USING"));
        };

        Ok(Some(Join {
            kind,
            relation,
            constraint,
        }))
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor> {
        match self.peek() {
            TokenKind::LeftParen => {
                self.advance();
                if !matches!(
                    self.peek(),
                    TokenKind::KwSelect | TokenKind::KwWith | TokenKind::LeftParen
                ) {
                    return Err(self.err_expected("subquery"));
                }
                let subquery = self.parse_query()?;
                self.expect_token(&TokenKind::RightParen, "`)`")?;
                let alias = self.try_alias()?;
                Ok(TableFactor::Derived {
                    subquery: Box::new(subquery),
                    alias,
                })
            }
            TokenKind::Id(_) | TokenKind::QuotedId(_) => {
                if self.peek_nth(1) == &TokenKind::LeftParen {
                    let name = self.parse_identifier()?;
                    self.advance();
                    let args = if self.check(&TokenKind::RightParen) {
                        Vec::new()
                    } else {
                        self.parse_comma_sep(Self::parse_expr)?
                    };
                    self.expect_token(&TokenKind::RightParen, "`)`")?;
                    let alias = self.try_alias()?;
                    return Ok(TableFactor::Function { name, args, alias });
                }
                let name = self.parse_qualified_name()?;
                let alias = self.try_alias()?;
                Ok(TableFactor::Table { name, alias })
            }
            _ => Err(self.err_expected("table name, table function or subquery")),
        }
    }

    pub(crate) fn parse_ordering_term(&mut self) -> Result<OrderByItem> {
        let expr = self.parse_expr()?;
        let direction = self.parse_sort_direction();
        let nulls = if self.check_word("NULLS") {
            self.advance();
            if self.eat_word("FIRST") {
                Some(NullsOrder::First)
            } else if self.eat_word("LAST") {
                Some(NullsOrder::Last)
            } else {
                return Err(self.err_expected("FIRST or LAST"));
            }
        } else {
            None
        };
        Ok(OrderByItem {
            expr,
            direction,
            nulls,
        })
    }

    pub(crate) fn parse_sort_direction(&mut self) -> Option<SortDirection> {
        if self.eat_kw(&TokenKind::KwAsc) {
            Some(SortDirection::Asc)
        } else if self.eat_kw(&TokenKind::KwDesc) {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    /// `LIMIT n [OFFSET m]` or `LIMIT m, n`.
    fn parse_limit(&mut self) -> Result<Option<LimitClause>> {
        if !self.eat_kw(&TokenKind::KwLimit) {
            return Ok(None);
        }
        let first = self.parse_expr()?;
        if self.eat(&TokenKind::Comma) {
            let limit = self.parse_expr()?;
            return Ok(Some(LimitClause {
                limit,
                offset: Some(first),
            }));
        }
        let offset = if self.eat_word("OFFSET") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Some(LimitClause {
            limit: first,
            offset,
        }))
    }
}

#[cfg(test)]
mod tests {
    use chsql_ast::{Expr, StatementCategory};

    use super::*;
    use crate::error::Position;

    fn parse_ok(sql: &str) -> Vec<Statement> {
        let mut p = Parser::from_sql(sql).unwrap_or_else(|e| panic!("lex error for {sql}: {e}"));
        p.parse_statements()
            .unwrap_or_else(|e| panic!("parse error for {sql}: {e}"))
    }

    fn parse_one(sql: &str) -> Statement {
        let mut stmts = parse_ok(sql);
        assert_eq!(stmts.len(), 1, "expected 1 statement for: {sql}");
        stmts.remove(0)
    }

    fn parse_err(sql: &str) -> ParseError {
        Parser::from_sql(sql)
            .and_then(|mut p| p.parse_statements())
            .expect_err("expected parse error")
    }

    fn syntax_err(sql: &str) -> SyntaxError {
        match parse_err(sql) {
            ParseError::Syntax(e) => e,
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    /// Parse, format, reparse: the tree and the text must both be stable.
    fn assert_roundtrip(sql: &str) {
        let first = parse_one(sql);
        let text = first.to_string();
        let second = parse_one(&text);
        assert_eq!(first, second, "tree changed for: {sql}\nformatted: {text}");
        assert_eq!(text, second.to_string(), "text not a fixed point for: {sql}");
    }

    fn select(sql: &str) -> SelectStatement {
        match parse_one(sql) {
            Statement::Select(s) => s,
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    fn core(stmt: &SelectStatement) -> &SelectCore {
        match &stmt.body {
            SelectBody::Select(core) => core,
            other => panic!("expected select core, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(parse_ok("").is_empty());
        assert!(parse_ok("   \n\t").is_empty());
        assert!(parse_ok("-- nothing\n/* here */").is_empty());
        assert!(parse_ok(";;;").is_empty());
    }

    #[test]
    fn test_statement_count_and_empty_statements() {
        let stmts = parse_ok("SELECT 1;; SELECT 2; ;SELECT 3");
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[2].to_string(), "SELECT 3");
    }

    #[test]
    fn test_missing_separator() {
        let err = syntax_err("SELECT 1 SELECT 2");
        assert_eq!(err.expected, "';' or end of input");
        assert_eq!(err.position, Position::new(1, 10, 9));
        assert_eq!(err.found.kind, TokenKind::KwSelect);
    }

    #[test]
    fn test_select_star_from_missing_table() {
        let err = syntax_err("SELECT * FROM");
        assert_eq!(err.found.kind, TokenKind::Eof);
        assert_eq!(err.position, Position::new(1, 14, 13));
        assert_eq!(err.expected, "table name, table function or subquery");
    }

    #[test]
    fn test_unknown_statement() {
        let err = syntax_err("FROB t");
        assert_eq!(err.expected, "statement");
        assert_eq!(err.position.offset, 0);
    }

    #[test]
    fn test_lex_error_precedes_syntax_error() {
        // The syntax error comes first in the text but lexing finishes first.
        let err = parse_err("SELECT FROM; SELECT 'open");
        assert!(matches!(err, ParseError::Lex(_)), "{err:?}");
    }

    #[test]
    fn test_select_clauses() {
        let stmt = select(
            "SELECT DISTINCT a, b AS bee, c cee FROM db.t AS x \
             WHERE a > 1 GROUP BY a, b HAVING count(*) > 2 \
             ORDER BY a DESC NULLS FIRST, b LIMIT 10 OFFSET 5 \
             SETTINGS max_threads = 4 FORMAT JSONEachRow",
        );
        let c = core(&stmt);
        assert!(c.distinct);
        assert_eq!(c.projection.len(), 3);
        assert_eq!(c.group_by.len(), 2);
        assert!(c.having.is_some());
        assert_eq!(stmt.order_by.len(), 2);
        assert_eq!(stmt.order_by[0].nulls, Some(NullsOrder::First));
        assert_eq!(stmt.settings.len(), 1);
        assert_eq!(stmt.format.as_deref(), Some("JSONEachRow"));
        let limit = stmt.limit.as_ref().expect("limit");
        assert_eq!(limit.limit, Expr::number("10"));
        assert_eq!(limit.offset, Some(Expr::number("5")));
    }

    #[test]
    fn test_limit_comma_form_normalized() {
        let stmt = parse_one("SELECT a FROM t LIMIT 5, 10");
        assert_eq!(stmt.to_string(), "SELECT a FROM t LIMIT 10 OFFSET 5");
    }

    #[test]
    fn test_select_all_dropped() {
        assert_eq!(parse_one("select all a from t").to_string(), "SELECT a FROM t");
    }

    #[test]
    fn test_qualified_wildcards() {
        let stmt = select("SELECT t.*, db.u.* FROM t, db.u");
        let c = core(&stmt);
        assert_eq!(
            c.projection[0],
            SelectItem::QualifiedWildcard(QualifiedName::bare("t"))
        );
        assert_eq!(
            c.projection[1],
            SelectItem::QualifiedWildcard(QualifiedName::qualified("db", "u"))
        );
    }

    #[test]
    fn test_joins() {
        let stmt = select(
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT OUTER JOIN c USING (id) \
             CROSS JOIN d, e",
        );
        let from = core(&stmt).from.as_ref().expect("from");
        let kinds: Vec<JoinKind> = from.joins.iter().map(|j| j.kind).collect();
        assert_eq!(
            kinds,
            vec![JoinKind::Inner, JoinKind::Left, JoinKind::Cross, JoinKind::Comma]
        );
        assert_eq!(
            stmt.to_string(),
            "SELECT * FROM a INNER JOIN b ON a.id = b.id LEFT JOIN c USING (id) \
             CROSS JOIN d, e"
        );
    }

    #[test]
    fn test_join_requires_constraint() {
        let err = syntax_err("SELECT * FROM a JOIN b WHERE x");
        assert_eq!(err.expected, "ON or USING");
        assert_eq!(err.found.kind, TokenKind::KwWhere);
    }

    #[test]
    fn test_table_function_and_derived() {
        let stmt = select("SELECT n FROM numbers(10) AS n, (SELECT 1) sub");
        let from = core(&stmt).from.as_ref().expect("from");
        assert!(matches!(from.relation, TableFactor::Function { .. }));
        assert!(matches!(
            &from.joins[0].relation,
            TableFactor::Derived { alias, .. } if alias.as_deref() == Some("sub")
        ));
    }

    #[test]
    fn test_set_operation_precedence() {
        let stmt = select("SELECT 1 UNION ALL SELECT 2 INTERSECT SELECT 3 EXCEPT SELECT 4");
        // ((1 UNION ALL (2 INTERSECT 3)) EXCEPT 4)
        let SelectBody::Compound { op, left, .. } = &stmt.body else {
            panic!("expected compound");
        };
        assert_eq!(*op, CompoundOp::Except);
        let SelectBody::Compound { op, right, .. } = left.as_ref() else {
            panic!("expected compound");
        };
        assert_eq!(*op, CompoundOp::Union);
        assert!(matches!(
            right.as_ref(),
            SelectBody::Compound {
                op: CompoundOp::Intersect,
                ..
            }
        ));
        assert_eq!(
            Statement::Select(stmt).category(),
            StatementCategory::Query
        );
    }

    #[test]
    fn test_nested_query_operands() {
        assert_roundtrip("(SELECT 1) UNION (SELECT 2 ORDER BY 1 LIMIT 1)");
        assert_roundtrip("SELECT 1 UNION (SELECT 2 UNION SELECT 3)");
        assert_roundtrip("((SELECT 1))");
    }

    #[test]
    fn test_cte() {
        let stmt = select(
            "WITH RECURSIVE r (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM r), \
             s AS (SELECT 2) SELECT * FROM r",
        );
        let with = stmt.with.as_ref().expect("with");
        assert!(with.recursive);
        assert_eq!(with.ctes.len(), 2);
        assert_eq!(with.ctes[0].columns, vec!["n".to_owned()]);
        assert_eq!(
            Statement::Select(stmt).category(),
            StatementCategory::Query
        );
    }

    #[test]
    fn test_roundtrip_select_forms() {
        for sql in [
            "SELECT 1",
            "SELECT a AS \"select\", \"my col\" FROM \"order\"",
            "SELECT * FROM t WHERE a IN (SELECT b FROM u) AND NOT EXISTS (SELECT 1)",
            "SELECT count(DISTINCT a), sum(b) OVER (PARTITION BY c ORDER BY d) FROM t",
            "SELECT a FROM t ORDER BY a ASC NULLS LAST LIMIT 1, 2",
            "WITH c AS (SELECT 1) SELECT * FROM c SETTINGS a = 1, b = 'x' FORMAT TSV",
            "SELECT * FROM a LEFT JOIN b USING (x, y) RIGHT OUTER JOIN c ON TRUE",
            "SELECT * FROM a FULL JOIN b ON a.k = b.k",
            "SELECT DISTINCT db.t.c FROM db.t",
        ] {
            assert_roundtrip(sql);
        }
    }

    #[test]
    fn test_recursion_limit() {
        let config = ParserConfig::default().with_max_depth(8);
        let sql = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
        let err = Parser::from_sql_with(&sql, config)
            .and_then(|mut p| p.parse_statements())
            .expect_err("too deep");
        assert!(
            matches!(err, ParseError::RecursionLimit { limit: 8, .. }),
            "{err:?}"
        );

        let shallow = format!("SELECT {}1{}", "(".repeat(3), ")".repeat(3));
        assert!(
            Parser::from_sql_with(&shallow, config)
                .and_then(|mut p| p.parse_statements())
                .is_ok()
        );
    }

    #[test]
    fn test_chain_links_count_as_depth() {
        let config = ParserConfig::default().with_max_depth(8);
        let parse = |sql: &str| Parser::from_sql_with(sql, config).and_then(|mut p| p.parse_statements());

        for sql in [
            format!("SELECT 1{}", " + 1".repeat(20)),
            format!("SELECT a{}", "[0]".repeat(20)),
            format!("SELECT 1{}", " EXCEPT SELECT 1".repeat(20)),
        ] {
            let err = parse(&sql).expect_err("chain too long");
            assert!(
                matches!(err, ParseError::RecursionLimit { limit: 8, .. }),
                "{err:?}"
            );
        }

        // Links are released when the chain closes, so siblings start fresh.
        let sql = "SELECT 1 + 1 + 1, 2 * 2 * 2, 3 - (3 - 3) FROM t WHERE a AND b AND c";
        let stmts = parse(sql).expect("short chains");
        assert_eq!(stmts[0].to_string(), sql);
    }
}

// ---------------------------------------------------------------------------
// Property-based round-trip tests
// ---------------------------------------------------------------------------

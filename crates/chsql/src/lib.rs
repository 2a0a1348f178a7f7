//! Public API facade for chsql.
//!
//! Parses `ClickHouse`-flavoured SQL into the typed AST from [`ast`] and
//! prints it back in canonical form. Formatting a single statement is its
//! `Display` impl (`stmt.to_string()`); [`format_sequence`] renders a whole
//! document.
//!
//! ```
//! let stmts = chsql::parse_statements("select a from t where b <> 1").unwrap();
//! assert_eq!(stmts[0].to_string(), "SELECT a FROM t WHERE b != 1");
//! ```

pub use chsql_ast as ast;
pub use chsql_ast::{Statement, StatementCategory, format_sequence};
pub use chsql_parser as parser;
pub use chsql_parser::{
    DEFAULT_MAX_DEPTH, LexError, LexErrorKind, ParseError, ParserConfig, Position, SyntaxError,
    Token, TokenKind, parse_expr,
};

/// Parse a `;`-separated document into statements.
///
/// Empty input, whitespace, comments and bare `;` yield an empty vector.
/// The first error aborts the parse.
pub fn parse_statements(sql: &str) -> Result<Vec<Statement>, ParseError> {
    chsql_parser::parse_sql(sql)
}

/// [`parse_statements`] with a non-default [`ParserConfig`].
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn parse_statements_with(
    sql: &str,
    config: &ParserConfig,
) -> Result<Vec<Statement>, ParseError> {
    chsql_parser::parse_sql_with(sql, *config)
}

/// Parse `sql` and render it back in canonical form, one statement per line.
pub fn canonicalize(sql: &str) -> Result<String, ParseError> {
    let statements = parse_statements(sql)?;
    tracing::trace!(statements = statements.len(), "canonicalizing");
    Ok(format_sequence(&statements))
}

// Lexer and parser for ClickHouse-flavoured SQL.
//
// Hand-written recursive descent for statements, precedence climbing for
// expressions. Produces the AST from `chsql-ast`; source is lexed in full
// before parsing starts, so lexical errors are reported first.

pub mod config;
pub mod cursor;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod token;

mod basic;
mod ddl;
mod dml;

use chsql_ast::Statement;
use tracing::debug;

pub use config::{DEFAULT_MAX_DEPTH, ParserConfig};
pub use cursor::TokenCursor;
pub use error::{LexError, LexErrorKind, ParseError, Position, Result, SyntaxError};
pub use expr::parse_expr;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Parse a `;`-separated sequence of statements with the default
/// configuration.
pub fn parse_sql(sql: &str) -> Result<Vec<Statement>> {
    parse_sql_with(sql, ParserConfig::default())
}

/// Parse a `;`-separated sequence of statements.
///
/// The first lexical or syntax error aborts the whole parse; no partial
/// result is returned.
pub fn parse_sql_with(sql: &str, config: ParserConfig) -> Result<Vec<Statement>> {
    let _span = tracing::debug_span!("parse_statements", len = sql.len()).entered();
    let result = Parser::from_sql_with(sql, config).and_then(|mut p| p.parse_statements());
    match &result {
        Ok(stmts) => debug!(statements = stmts.len(), "parsed source"),
        Err(e) => debug!(error = %e, "parse failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sql_counts_statements() {
        let stmts = parse_sql("SELECT 1; ; INSERT INTO t VALUES (1);\nUSE db").expect("parse ok");
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[2].to_string(), "USE db");
    }

    #[test]
    fn test_parse_sql_with_small_depth() {
        let config = ParserConfig::default().with_max_depth(4);
        let err = parse_sql_with("SELECT ((((((1))))))", config).expect_err("too deep");
        assert!(matches!(err, ParseError::RecursionLimit { limit: 4, .. }));
        assert!(parse_sql_with("SELECT (1)", config).is_ok());
    }

    #[test]
    fn test_parse_sql_reports_first_error() {
        let err = parse_sql("SELECT 1; SELEC 2; SELECT 'open").expect_err("lex error");
        // Lexing runs over the whole input first.
        assert!(matches!(err, ParseError::Lex(_)));
        let err = parse_sql("SELECT 1; SELEC 2").expect_err("syntax error");
        assert_eq!(err.position().offset, 10);
    }
}

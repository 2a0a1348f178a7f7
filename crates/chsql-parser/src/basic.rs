// Session and utility statements: USE, SET, SHOW, DESCRIBE, EXPLAIN,
// OPTIMIZE and the transaction words.

use chsql_ast::{ExplainKind, ExplainStatement, OptimizeStatement, ShowStatement, Statement};

use crate::error::Result;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser {
    pub(crate) fn parse_use(&mut self) -> Result<Statement> {
        self.expect_word("USE")?;
        Ok(Statement::Use(self.parse_identifier()?))
    }

    pub(crate) fn parse_set(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwSet)?;
        Ok(Statement::Set(self.parse_comma_sep(Self::parse_setting)?))
    }

    /// `SHOW DATABASES | SHOW TABLES [FROM db] [LIKE 'p'] | SHOW CREATE TABLE name`
    pub(crate) fn parse_show(&mut self) -> Result<Statement> {
        self.expect_word("SHOW")?;
        let show = if self.eat_word("DATABASES") {
            ShowStatement::Databases
        } else if self.eat_word("TABLES") {
            let from = if self.eat_kw(&TokenKind::KwFrom) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            let like = if self.eat_kw(&TokenKind::KwLike) {
                Some(self.parse_string("pattern string")?)
            } else {
                None
            };
            ShowStatement::Tables { from, like }
        } else if self.eat_kw(&TokenKind::KwCreate) {
            self.expect_kw(&TokenKind::KwTable)?;
            ShowStatement::CreateTable(self.parse_qualified_name()?)
        } else {
            return Err(self.err_expected("DATABASES, TABLES or CREATE"));
        };
        Ok(Statement::Show(show))
    }

    /// `{DESCRIBE | DESC} [TABLE] name`
    pub(crate) fn parse_describe(&mut self) -> Result<Statement> {
        if !self.eat_kw(&TokenKind::KwDesc) {
            self.expect_word("DESCRIBE")?;
        }
        self.eat_kw(&TokenKind::KwTable);
        Ok(Statement::Describe(self.parse_qualified_name()?))
    }

    /// `EXPLAIN [AST | SYNTAX | PLAN | PIPELINE] statement`
    pub(crate) fn parse_explain(&mut self) -> Result<Statement> {
        self.expect_word("EXPLAIN")?;
        let kind = [
            ExplainKind::Ast,
            ExplainKind::Syntax,
            ExplainKind::Plan,
            ExplainKind::Pipeline,
        ]
        .into_iter()
        .find(|kind| self.check_word(kind.as_str()));
        if kind.is_some() {
            self.advance();
        }
        let statement = Box::new(self.descend(Self::parse_statement)?);
        Ok(Statement::Explain(ExplainStatement { kind, statement }))
    }

    /// `OPTIMIZE TABLE name [ON CLUSTER c] [FINAL]`
    pub(crate) fn parse_optimize(&mut self) -> Result<Statement> {
        self.expect_word("OPTIMIZE")?;
        self.expect_kw(&TokenKind::KwTable)?;
        let table = self.parse_qualified_name()?;
        let cluster = self.parse_on_cluster()?;
        let final_merge = self.eat_word("FINAL");
        Ok(Statement::Optimize(OptimizeStatement {
            table,
            cluster,
            final_merge,
        }))
    }

    /// `BEGIN | COMMIT | ROLLBACK`, each optionally followed by `TRANSACTION`.
    pub(crate) fn parse_transaction(&mut self, stmt: Statement) -> Statement {
        self.advance();
        self.eat_word("TRANSACTION");
        stmt
    }
}

#[cfg(test)]
mod tests {
    use chsql_ast::{QualifiedName, Setting, StatementCategory};

    use super::*;
    use crate::error::ParseError;

    fn parse_one(sql: &str) -> Statement {
        let mut p = Parser::from_sql(sql).expect("lex ok");
        let mut stmts = p
            .parse_statements()
            .unwrap_or_else(|e| panic!("parse error for {sql}: {e}"));
        assert_eq!(stmts.len(), 1, "expected 1 statement for: {sql}");
        stmts.remove(0)
    }

    fn canonical(sql: &str) -> String {
        parse_one(sql).to_string()
    }

    #[test]
    fn test_use_and_set() {
        assert_eq!(parse_one("use analytics"), Statement::Use("analytics".to_owned()));
        let stmt = parse_one("SET max_threads = 8, send_logs_level = 'trace'");
        let Statement::Set(settings) = &stmt else {
            panic!("expected SET");
        };
        assert_eq!(
            settings[0],
            Setting {
                name: "max_threads".to_owned(),
                value: chsql_ast::Expr::number("8"),
            }
        );
        assert_eq!(stmt.category(), StatementCategory::Basic);
        assert_eq!(
            stmt.to_string(),
            "SET max_threads = 8, send_logs_level = 'trace'"
        );
    }

    #[test]
    fn test_show() {
        assert_eq!(
            parse_one("show databases"),
            Statement::Show(ShowStatement::Databases)
        );
        assert_eq!(
            canonical("show tables from system like 'query%'"),
            "SHOW TABLES FROM system LIKE 'query%'"
        );
        assert_eq!(canonical("SHOW TABLES"), "SHOW TABLES");
        assert_eq!(
            parse_one("SHOW CREATE TABLE db.t"),
            Statement::Show(ShowStatement::CreateTable(QualifiedName::qualified(
                "db", "t"
            )))
        );
    }

    #[test]
    fn test_show_unknown_target() {
        let Err(ParseError::Syntax(err)) =
            Parser::from_sql("SHOW USERS").and_then(|mut p| p.parse_statements())
        else {
            panic!("expected syntax error");
        };
        assert_eq!(err.expected, "DATABASES, TABLES or CREATE");
    }

    #[test]
    fn test_describe_spellings() {
        let expected = Statement::Describe(QualifiedName::bare("t"));
        assert_eq!(parse_one("DESCRIBE t"), expected);
        assert_eq!(parse_one("desc table t"), expected);
        assert_eq!(expected.to_string(), "DESCRIBE TABLE t");
    }

    #[test]
    fn test_explain() {
        let stmt = parse_one("explain syntax SELECT 1");
        let Statement::Explain(explain) = &stmt else {
            panic!("expected EXPLAIN");
        };
        assert_eq!(explain.kind, Some(ExplainKind::Syntax));
        assert_eq!(explain.statement.category(), StatementCategory::Dml);
        assert_eq!(stmt.to_string(), "EXPLAIN SYNTAX SELECT 1");

        assert_eq!(canonical("EXPLAIN DROP TABLE t"), "EXPLAIN DROP TABLE t");
        // `ast` is only a kind when it comes right after EXPLAIN.
        assert_eq!(canonical("EXPLAIN SELECT ast FROM t"), "EXPLAIN SELECT ast FROM t");
    }

    #[test]
    fn test_optimize() {
        assert_eq!(
            parse_one("OPTIMIZE TABLE db.t ON CLUSTER c FINAL"),
            Statement::Optimize(OptimizeStatement {
                table: QualifiedName::qualified("db", "t"),
                cluster: Some("c".to_owned()),
                final_merge: true,
            })
        );
        assert_eq!(canonical("optimize table t"), "OPTIMIZE TABLE t");
    }

    #[test]
    fn test_transactions() {
        assert_eq!(parse_one("BEGIN TRANSACTION"), Statement::Begin);
        assert_eq!(parse_one("begin"), Statement::Begin);
        assert_eq!(parse_one("COMMIT"), Statement::Commit);
        assert_eq!(parse_one("rollback transaction"), Statement::Rollback);
        let mut p = Parser::from_sql("BEGIN; SELECT 1; COMMIT").expect("lex ok");
        let stmts = p.parse_statements().expect("parse ok");
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[2].to_string(), "COMMIT");
    }
}

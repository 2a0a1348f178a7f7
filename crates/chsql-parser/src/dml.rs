// INSERT / UPDATE / DELETE.

use chsql_ast::{
    Assignment, DeleteStatement, Expr, InsertSource, InsertStatement, Statement, UpdateStatement,
};

use crate::error::Result;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser {
    /// `INSERT INTO [TABLE] name [(cols)] {VALUES (row), ... | query}`
    pub(crate) fn parse_insert(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwInsert)?;
        self.expect_kw(&TokenKind::KwInto)?;
        self.eat_kw(&TokenKind::KwTable);
        let table = self.parse_qualified_name()?;

        // `(` opens the column list unless it wraps the source query.
        let columns = if self.check(&TokenKind::LeftParen) && !self.starts_query_at(1) {
            self.parse_paren_identifiers()?
        } else {
            Vec::new()
        };

        let source = if self.eat_kw(&TokenKind::KwValues) {
            InsertSource::Values(self.parse_values_rows()?)
        } else if matches!(
            self.peek(),
            TokenKind::KwSelect | TokenKind::KwWith | TokenKind::LeftParen
        ) {
            InsertSource::Select(Box::new(self.parse_query()?))
        } else {
            return Err(self.err_expected("VALUES or query"));
        };

        Ok(Statement::Insert(InsertStatement {
            table,
            columns,
            source,
        }))
    }

    /// Whether the token `n` ahead begins a query.
    fn starts_query_at(&self, n: usize) -> bool {
        matches!(self.peek_nth(n), TokenKind::KwSelect | TokenKind::KwWith)
    }

    /// One or more `(e, ...)` rows. The separating comma is optional.
    fn parse_values_rows(&mut self) -> Result<Vec<Vec<Expr>>> {
        let mut rows = vec![self.parse_values_row()?];
        while self.eat(&TokenKind::Comma) || self.check(&TokenKind::LeftParen) {
            rows.push(self.parse_values_row()?);
        }
        Ok(rows)
    }

    fn parse_values_row(&mut self) -> Result<Vec<Expr>> {
        self.expect_token(&TokenKind::LeftParen, "`(`")?;
        let row = self.parse_comma_sep(Self::parse_expr)?;
        self.expect_token(&TokenKind::RightParen, "`)`")?;
        Ok(row)
    }

    /// `UPDATE name [[AS] alias] SET col = e, ... [WHERE e]`
    pub(crate) fn parse_update(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwUpdate)?;
        let table = self.parse_qualified_name()?;
        let alias = self.try_alias()?;
        self.expect_kw(&TokenKind::KwSet)?;
        let assignments = self.parse_comma_sep(Self::parse_assignment)?;
        let selection = if self.eat_kw(&TokenKind::KwWhere) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Update(UpdateStatement {
            table,
            alias,
            assignments,
            selection,
        }))
    }

    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment> {
        let column = self.parse_identifier()?;
        self.expect_token(&TokenKind::Eq, "`=`")?;
        let value = self.parse_expr()?;
        Ok(Assignment { column, value })
    }

    /// `DELETE FROM name [ON CLUSTER c] [WHERE e]`
    pub(crate) fn parse_delete(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwDelete)?;
        self.expect_kw(&TokenKind::KwFrom)?;
        let table = self.parse_qualified_name()?;
        let cluster = self.parse_on_cluster()?;
        let selection = if self.eat_kw(&TokenKind::KwWhere) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete(DeleteStatement {
            table,
            cluster,
            selection,
        }))
    }
}

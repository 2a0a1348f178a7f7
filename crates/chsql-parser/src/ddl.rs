// CREATE / ALTER / DROP / TRUNCATE / RENAME.
//
// Table-level clauses of CREATE TABLE are accepted only in their fixed
// order (ENGINE, PARTITION BY, PRIMARY KEY, ORDER BY, SETTINGS, COMMENT, AS);
// the formatter emits them in the same order.

use chsql_ast::{
    AlterTableAction, AlterTableStatement, ColumnDef, ColumnOption, ColumnPosition,
    CreateDatabaseStatement, CreateIndexStatement, CreateTableStatement, CreateViewStatement,
    DropStatement, Engine, ForeignReference, IndexColumn, ObjectKind, RenamePair,
    RenameStatement, Statement, TableConstraint, TableConstraintKind, TableElement,
    TruncateStatement,
};
use chsql_ast::keywords::is_column_position_word;

use crate::error::Result;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser {
    // -----------------------------------------------------------------------
    // CREATE
    // -----------------------------------------------------------------------

    pub(crate) fn parse_create(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwCreate)?;
        let or_replace = if self.check_kw(&TokenKind::KwOr) && self.check_word_nth(1, "REPLACE")
        {
            self.advance();
            self.advance();
            true
        } else {
            false
        };

        if self.eat_word("TEMPORARY") {
            self.expect_kw(&TokenKind::KwTable)?;
            return self.parse_create_table(or_replace, true);
        }
        if self.eat_kw(&TokenKind::KwTable) {
            return self.parse_create_table(or_replace, false);
        }
        if self.eat_kw(&TokenKind::KwMaterialized) {
            self.expect_word("VIEW")?;
            return self.parse_create_view(or_replace, true);
        }
        if self.eat_word("VIEW") {
            return self.parse_create_view(or_replace, false);
        }
        if !or_replace {
            if self.eat_kw(&TokenKind::KwUnique) {
                self.expect_word("INDEX")?;
                return self.parse_create_index(true);
            }
            if self.eat_word("INDEX") {
                return self.parse_create_index(false);
            }
            if self.eat_word("DATABASE") {
                return self.parse_create_database();
            }
            return Err(self.err_expected("TABLE, VIEW, INDEX or DATABASE"));
        }
        Err(self.err_expected("TABLE or VIEW"))
    }

    fn parse_create_table(&mut self, or_replace: bool, temporary: bool) -> Result<Statement> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_qualified_name()?;
        let cluster = self.parse_on_cluster()?;

        let elements = if self.eat(&TokenKind::LeftParen) {
            let elements = self.parse_comma_sep(Self::parse_table_element)?;
            self.expect_token(&TokenKind::RightParen, "`)`")?;
            elements
        } else {
            Vec::new()
        };

        let engine = if self.check_word("ENGINE") {
            Some(self.parse_engine()?)
        } else {
            None
        };

        let partition_by = if self.check_word("PARTITION")
            && matches!(self.peek_nth(1), TokenKind::KwBy)
        {
            self.advance();
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };

        let primary_key = if self.eat_kw(&TokenKind::KwPrimary) {
            self.expect_word("KEY")?;
            Some(self.parse_expr()?)
        } else {
            None
        };

        let order_by = if self.eat_kw(&TokenKind::KwOrder) {
            self.expect_kw(&TokenKind::KwBy)?;
            Some(self.parse_expr()?)
        } else {
            None
        };

        let settings = if self.eat_kw(&TokenKind::KwSettings) {
            self.parse_comma_sep(Self::parse_setting)?
        } else {
            Vec::new()
        };

        let comment = if self.eat_kw(&TokenKind::KwComment) {
            Some(self.parse_string("comment string")?)
        } else {
            None
        };

        let as_select = if self.eat_kw(&TokenKind::KwAs) {
            Some(Box::new(self.parse_query()?))
        } else {
            None
        };

        if elements.is_empty() && as_select.is_none() {
            return Err(self.err_expected("column list or AS query"));
        }

        Ok(Statement::CreateTable(CreateTableStatement {
            or_replace,
            temporary,
            if_not_exists,
            name,
            cluster,
            elements,
            engine,
            partition_by,
            primary_key,
            order_by,
            settings,
            comment,
            as_select,
        }))
    }

    fn parse_table_element(&mut self) -> Result<TableElement> {
        if matches!(
            self.peek(),
            TokenKind::KwConstraint
                | TokenKind::KwPrimary
                | TokenKind::KwUnique
                | TokenKind::KwCheck
                | TokenKind::KwForeign
        ) {
            Ok(TableElement::Constraint(self.parse_table_constraint()?))
        } else {
            Ok(TableElement::Column(self.parse_column_def(false)?))
        }
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint> {
        let name = if self.eat_kw(&TokenKind::KwConstraint) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        let kind = match self.peek() {
            TokenKind::KwPrimary => {
                self.advance();
                self.expect_word("KEY")?;
                TableConstraintKind::PrimaryKey(self.parse_paren_identifiers()?)
            }
            TokenKind::KwUnique => {
                self.advance();
                TableConstraintKind::Unique(self.parse_paren_identifiers()?)
            }
            TokenKind::KwCheck => {
                self.advance();
                TableConstraintKind::Check(self.parse_expr()?)
            }
            TokenKind::KwForeign => {
                self.advance();
                self.expect_word("KEY")?;
                let columns = self.parse_paren_identifiers()?;
                let reference = self.parse_foreign_reference()?;
                TableConstraintKind::ForeignKey { columns, reference }
            }
            _ => return Err(self.err_expected("PRIMARY KEY, UNIQUE, CHECK or FOREIGN KEY")),
        };

        Ok(TableConstraint { name, kind })
    }

    /// `REFERENCES table [(cols)]`
    fn parse_foreign_reference(&mut self) -> Result<ForeignReference> {
        self.expect_kw(&TokenKind::KwReferences)?;
        let table = self.parse_qualified_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_identifiers()?
        } else {
            Vec::new()
        };
        Ok(ForeignReference { table, columns })
    }

    /// `name [type] option*`. Under `ALTER ... ADD COLUMN` a following
    /// `FIRST` or `AFTER` is a position, never a type name.
    fn parse_column_def(&mut self, before_position: bool) -> Result<ColumnDef> {
        let name = self.parse_identifier()?;

        let has_type = match self.peek() {
            TokenKind::Id(word) => !(before_position && is_column_position_word(word)),
            TokenKind::QuotedId(_) => true,
            _ => false,
        };
        let data_type = if has_type {
            Some(self.parse_data_type()?)
        } else {
            None
        };

        let mut options = Vec::new();
        while let Some(option) = self.try_column_option()? {
            options.push(option);
        }

        Ok(ColumnDef {
            name,
            data_type,
            options,
        })
    }

    fn try_column_option(&mut self) -> Result<Option<ColumnOption>> {
        let option = match self.peek() {
            TokenKind::KwNull => {
                self.advance();
                ColumnOption::Null
            }
            TokenKind::KwNot => {
                self.advance();
                self.expect_kw(&TokenKind::KwNull)?;
                ColumnOption::NotNull
            }
            TokenKind::KwDefault => {
                self.advance();
                ColumnOption::Default(self.parse_expr()?)
            }
            TokenKind::KwMaterialized => {
                self.advance();
                ColumnOption::Materialized(self.parse_expr()?)
            }
            TokenKind::KwAlias => {
                self.advance();
                ColumnOption::Alias(self.parse_expr()?)
            }
            TokenKind::KwPrimary => {
                self.advance();
                self.expect_word("KEY")?;
                ColumnOption::PrimaryKey
            }
            TokenKind::KwUnique => {
                self.advance();
                ColumnOption::Unique
            }
            TokenKind::KwCheck => {
                self.advance();
                ColumnOption::Check(self.parse_expr()?)
            }
            TokenKind::KwComment => {
                self.advance();
                ColumnOption::Comment(self.parse_string("comment string")?)
            }
            TokenKind::KwReferences => ColumnOption::References(self.parse_foreign_reference()?),
            _ => return Ok(None),
        };
        Ok(Some(option))
    }

    /// `ENGINE [=] Name[(args)]`
    fn parse_engine(&mut self) -> Result<Engine> {
        self.expect_word("ENGINE")?;
        self.eat(&TokenKind::Eq);
        let name = self.parse_word("engine name")?;
        let args = if self.eat(&TokenKind::LeftParen) {
            let args = if self.check(&TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_comma_sep(Self::parse_expr)?
            };
            self.expect_token(&TokenKind::RightParen, "`)`")?;
            Some(args)
        } else {
            None
        };
        Ok(Engine { name, args })
    }

    fn parse_create_view(&mut self, or_replace: bool, materialized: bool) -> Result<Statement> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_qualified_name()?;
        let cluster = self.parse_on_cluster()?;
        let to = if self.eat_word("TO") {
            Some(self.parse_qualified_name()?)
        } else {
            None
        };
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_identifiers()?
        } else {
            Vec::new()
        };
        self.expect_kw(&TokenKind::KwAs)?;
        let query = Box::new(self.parse_query()?);
        Ok(Statement::CreateView(CreateViewStatement {
            or_replace,
            materialized,
            if_not_exists,
            name,
            cluster,
            to,
            columns,
            query,
        }))
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<Statement> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_identifier()?;
        self.expect_kw(&TokenKind::KwOn)?;
        let table = self.parse_qualified_name()?;
        self.expect_token(&TokenKind::LeftParen, "`(`")?;
        let columns = self.parse_comma_sep(Self::parse_index_column)?;
        self.expect_token(&TokenKind::RightParen, "`)`")?;
        Ok(Statement::CreateIndex(CreateIndexStatement {
            unique,
            if_not_exists,
            name,
            table,
            columns,
        }))
    }

    fn parse_index_column(&mut self) -> Result<IndexColumn> {
        let expr = self.parse_expr()?;
        let direction = self.parse_sort_direction();
        Ok(IndexColumn { expr, direction })
    }

    fn parse_create_database(&mut self) -> Result<Statement> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_identifier()?;
        let cluster = self.parse_on_cluster()?;
        let engine = if self.check_word("ENGINE") {
            Some(self.parse_engine()?)
        } else {
            None
        };
        Ok(Statement::CreateDatabase(CreateDatabaseStatement {
            if_not_exists,
            name,
            cluster,
            engine,
        }))
    }

    // -----------------------------------------------------------------------
    // ALTER TABLE
    // -----------------------------------------------------------------------

    pub(crate) fn parse_alter(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwAlter)?;
        self.expect_kw(&TokenKind::KwTable)?;
        let name = self.parse_qualified_name()?;
        let cluster = self.parse_on_cluster()?;
        let actions = self.parse_comma_sep(Self::parse_alter_action)?;
        Ok(Statement::AlterTable(AlterTableStatement {
            name,
            cluster,
            actions,
        }))
    }

    #[allow(clippy::too_many_lines)]
    fn parse_alter_action(&mut self) -> Result<AlterTableAction> {
        if self.eat_word("ADD") {
            if self.eat_word("COLUMN") {
                let if_not_exists = self.parse_if_not_exists();
                let column = self.parse_column_def(true)?;
                let position = if self.eat_word("FIRST") {
                    Some(ColumnPosition::First)
                } else if self.eat_word("AFTER") {
                    Some(ColumnPosition::After(self.parse_identifier()?))
                } else {
                    None
                };
                return Ok(AlterTableAction::AddColumn {
                    if_not_exists,
                    column,
                    position,
                });
            }
            if self.eat_kw(&TokenKind::KwConstraint) {
                let if_not_exists = self.parse_if_not_exists();
                let name = self.parse_identifier()?;
                self.expect_kw(&TokenKind::KwCheck)?;
                let check = self.parse_expr()?;
                return Ok(AlterTableAction::AddConstraint {
                    if_not_exists,
                    name,
                    check,
                });
            }
            return Err(self.err_expected("COLUMN or CONSTRAINT"));
        }

        if self.eat_kw(&TokenKind::KwDrop) {
            if self.eat_word("COLUMN") {
                let if_exists = self.parse_if_exists();
                let name = self.parse_identifier()?;
                return Ok(AlterTableAction::DropColumn { if_exists, name });
            }
            if self.eat_kw(&TokenKind::KwConstraint) {
                let if_exists = self.parse_if_exists();
                let name = self.parse_identifier()?;
                return Ok(AlterTableAction::DropConstraint { if_exists, name });
            }
            return Err(self.err_expected("COLUMN or CONSTRAINT"));
        }

        if self.eat_word("MODIFY") {
            self.expect_word("COLUMN")?;
            let if_exists = self.parse_if_exists();
            let column = self.parse_column_def(false)?;
            return Ok(AlterTableAction::ModifyColumn { if_exists, column });
        }

        if self.eat_word("RENAME") {
            if self.eat_word("TO") {
                return Ok(AlterTableAction::RenameTable(self.parse_qualified_name()?));
            }
            self.expect_word("COLUMN")?;
            let if_exists = self.parse_if_exists();
            let from = self.parse_identifier()?;
            self.expect_word("TO")?;
            let to = self.parse_identifier()?;
            return Ok(AlterTableAction::RenameColumn {
                if_exists,
                from,
                to,
            });
        }

        if self.eat_kw(&TokenKind::KwComment) {
            self.expect_word("COLUMN")?;
            let if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            let comment = self.parse_string("comment string")?;
            return Ok(AlterTableAction::CommentColumn {
                if_exists,
                name,
                comment,
            });
        }

        if self.eat_kw(&TokenKind::KwDelete) {
            self.expect_kw(&TokenKind::KwWhere)?;
            return Ok(AlterTableAction::Delete(self.parse_expr()?));
        }

        if self.eat_kw(&TokenKind::KwUpdate) {
            let assignments = self.parse_comma_sep(Self::parse_assignment)?;
            self.expect_kw(&TokenKind::KwWhere)?;
            let selection = self.parse_expr()?;
            return Ok(AlterTableAction::Update {
                assignments,
                selection,
            });
        }

        Err(self.err_expected("ALTER action"))
    }

    // -----------------------------------------------------------------------
    // DROP / TRUNCATE / RENAME
    // -----------------------------------------------------------------------

    pub(crate) fn parse_drop(&mut self) -> Result<Statement> {
        self.expect_kw(&TokenKind::KwDrop)?;
        let object = if self.eat_kw(&TokenKind::KwTable) {
            ObjectKind::Table
        } else if self.eat_word("VIEW") {
            ObjectKind::View
        } else if self.eat_word("DATABASE") {
            ObjectKind::Database
        } else if self.eat_word("INDEX") {
            ObjectKind::Index
        } else {
            return Err(self.err_expected("TABLE, VIEW, DATABASE or INDEX"));
        };
        let if_exists = self.parse_if_exists();
        let names = self.parse_comma_sep(Self::parse_qualified_name)?;
        let cluster = self.parse_on_cluster()?;
        Ok(Statement::Drop(DropStatement {
            object,
            if_exists,
            names,
            cluster,
        }))
    }

    /// `TRUNCATE [TABLE] [IF EXISTS] name [ON CLUSTER c]`
    pub(crate) fn parse_truncate(&mut self) -> Result<Statement> {
        self.expect_word("TRUNCATE")?;
        self.eat_kw(&TokenKind::KwTable);
        let if_exists = self.parse_if_exists();
        let name = self.parse_qualified_name()?;
        let cluster = self.parse_on_cluster()?;
        Ok(Statement::Truncate(TruncateStatement {
            if_exists,
            name,
            cluster,
        }))
    }

    /// `RENAME TABLE a TO b, ... [ON CLUSTER c]`
    pub(crate) fn parse_rename(&mut self) -> Result<Statement> {
        self.expect_word("RENAME")?;
        self.expect_kw(&TokenKind::KwTable)?;
        let pairs = self.parse_comma_sep(Self::parse_rename_pair)?;
        let cluster = self.parse_on_cluster()?;
        Ok(Statement::Rename(RenameStatement { pairs, cluster }))
    }

    fn parse_rename_pair(&mut self) -> Result<RenamePair> {
        let from = self.parse_qualified_name()?;
        self.expect_word("TO")?;
        let to = self.parse_qualified_name()?;
        Ok(RenamePair { from, to })
    }
}

#[cfg(test)]
mod tests {
    use chsql_ast::{DataType, DataTypeArg, Expr, QualifiedName, StatementCategory};

    use super::*;
    use crate::error::{ParseError, SyntaxError};

    fn parse_one(sql: &str) -> Statement {
        let mut p = Parser::from_sql(sql).expect("lex ok");
        let mut stmts = p
            .parse_statements()
            .unwrap_or_else(|e| panic!("parse error for {sql}: {e}"));
        assert_eq!(stmts.len(), 1, "expected 1 statement for: {sql}");
        stmts.remove(0)
    }

    fn assert_roundtrip(sql: &str) {
        let first = parse_one(sql);
        let text = first.to_string();
        let second = parse_one(&text);
        assert_eq!(first, second, "tree changed for: {sql}\nformatted: {text}");
        assert_eq!(text, second.to_string());
    }

    fn syntax_err(sql: &str) -> SyntaxError {
        match Parser::from_sql(sql).and_then(|mut p| p.parse_statements()) {
            Err(ParseError::Syntax(e)) => e,
            other => panic!("expected syntax error for {sql}, got {other:?}"),
        }
    }

    fn create_table(sql: &str) -> CreateTableStatement {
        match parse_one(sql) {
            Statement::CreateTable(ct) => ct,
            other => panic!("expected CREATE TABLE, got {other:?}"),
        }
    }

    #[test]
    fn test_create_table_full() {
        let ct = create_table(
            "CREATE TABLE IF NOT EXISTS db.events ON CLUSTER main (\
                id UInt64 NOT NULL, \
                ts DateTime64(3, 'UTC') DEFAULT now64(), \
                tags Array(LowCardinality(String)) COMMENT 'labels', \
                day Date MATERIALIZED toDate(ts), \
                CONSTRAINT positive CHECK id > 0\
             ) ENGINE = ReplicatedMergeTree('/t/{shard}', '{replica}') \
             PARTITION BY toYYYYMM(day) PRIMARY KEY id ORDER BY (id, ts) \
             SETTINGS index_granularity = 8192 COMMENT 'events table'",
        );
        assert!(ct.if_not_exists);
        assert_eq!(ct.name, QualifiedName::qualified("db", "events"));
        assert_eq!(ct.cluster.as_deref(), Some("main"));
        assert_eq!(ct.elements.len(), 5);
        let TableElement::Column(ts) = &ct.elements[1] else {
            panic!("expected column");
        };
        assert_eq!(
            ts.data_type,
            Some(DataType {
                name: "DateTime64".to_owned(),
                args: vec![
                    DataTypeArg::Number("3".to_owned()),
                    DataTypeArg::String("UTC".to_owned())
                ],
            })
        );
        assert!(matches!(
            &ct.elements[4],
            TableElement::Constraint(TableConstraint {
                name: Some(name),
                kind: TableConstraintKind::Check(_),
            }) if name == "positive"
        ));
        let engine = ct.engine.as_ref().expect("engine");
        assert_eq!(engine.name, "ReplicatedMergeTree");
        assert_eq!(engine.args.as_ref().map(Vec::len), Some(2));
        assert!(matches!(ct.order_by, Some(Expr::Tuple(_))));
        assert_eq!(ct.settings.len(), 1);
        assert_eq!(ct.comment.as_deref(), Some("events table"));
        assert_eq!(
            Statement::CreateTable(ct).category(),
            StatementCategory::Ddl
        );
    }

    #[test]
    fn test_create_table_canonical_text() {
        let stmt = parse_one(
            "create table t (a Int32 primary key, b String null unique) \
             engine MergeTree order by a",
        );
        assert_eq!(
            stmt.to_string(),
            "CREATE TABLE t (a Int32 PRIMARY KEY, b String NULL UNIQUE) \
             ENGINE = MergeTree ORDER BY a"
        );
    }

    #[test]
    fn test_create_table_as_select() {
        let ct = create_table("CREATE OR REPLACE TABLE t ENGINE = Memory AS SELECT 1 AS x");
        assert!(ct.or_replace);
        assert!(ct.elements.is_empty());
        assert!(ct.as_select.is_some());
        assert_eq!(ct.engine.as_ref().and_then(|e| e.args.as_ref()), None);
    }

    #[test]
    fn test_create_table_needs_columns_or_query() {
        let err = syntax_err("CREATE TABLE t ENGINE = Memory");
        assert_eq!(err.expected, "column list or AS query");
    }

    #[test]
    fn test_create_table_clause_order_is_fixed() {
        // ORDER BY before ENGINE is not accepted.
        let err = syntax_err("CREATE TABLE t (a UInt8) ORDER BY a ENGINE = Memory");
        assert_eq!(err.expected, "';' or end of input");
    }

    #[test]
    fn test_table_constraints() {
        let ct = create_table(
            "CREATE TEMPORARY TABLE t (a INT, b INT, PRIMARY KEY (a), UNIQUE (b), \
             FOREIGN KEY (b) REFERENCES db.u (id), CHECK (a < b))",
        );
        assert!(ct.temporary);
        let kinds: Vec<&TableConstraintKind> = ct
            .elements
            .iter()
            .filter_map(|e| match e {
                TableElement::Constraint(c) => Some(&c.kind),
                TableElement::Column(_) => None,
            })
            .collect();
        assert_eq!(kinds.len(), 4);
        assert!(matches!(
            kinds[2],
            TableConstraintKind::ForeignKey { reference, .. }
                if reference.table == QualifiedName::qualified("db", "u")
        ));
    }

    #[test]
    fn test_column_without_type() {
        let ct = create_table("CREATE TABLE t (a DEFAULT 1, b ALIAS a + 1)");
        let TableElement::Column(a) = &ct.elements[0] else {
            panic!("expected column");
        };
        assert_eq!(a.data_type, None);
        assert_eq!(a.options, vec![ColumnOption::Default(Expr::number("1"))]);
    }

    #[test]
    fn test_create_view_and_materialized() {
        let stmt = parse_one(
            "CREATE MATERIALIZED VIEW IF NOT EXISTS mv ON CLUSTER c TO db.target (a, b) \
             AS SELECT a, count() AS b FROM src GROUP BY a",
        );
        let Statement::CreateView(view) = &stmt else {
            panic!("expected view");
        };
        assert!(view.materialized);
        assert_eq!(view.to, Some(QualifiedName::qualified("db", "target")));
        assert_eq!(view.columns.len(), 2);
        assert_roundtrip("CREATE OR REPLACE VIEW v AS SELECT 1 UNION ALL SELECT 2");
    }

    #[test]
    fn test_create_index_and_database() {
        assert_roundtrip("CREATE UNIQUE INDEX IF NOT EXISTS idx ON db.t (a DESC, lower(b))");
        let stmt = parse_one("CREATE DATABASE IF NOT EXISTS analytics ON CLUSTER c ENGINE = Atomic");
        let Statement::CreateDatabase(db) = &stmt else {
            panic!("expected database");
        };
        assert_eq!(db.name, "analytics");
        assert_eq!(db.engine.as_ref().map(|e| e.name.as_str()), Some("Atomic"));
        assert_roundtrip("CREATE DATABASE d");
    }

    #[test]
    fn test_create_rejects_bad_combinations() {
        let err = syntax_err("CREATE OR REPLACE INDEX i ON t (a)");
        assert_eq!(err.expected, "TABLE or VIEW");
        let err = syntax_err("CREATE SEQUENCE s");
        assert_eq!(err.expected, "TABLE, VIEW, INDEX or DATABASE");
    }

    #[test]
    fn test_alter_actions() {
        let stmt = parse_one(
            "ALTER TABLE db.t ON CLUSTER c \
             ADD COLUMN IF NOT EXISTS x Nullable(String) DEFAULT NULL AFTER id, \
             ADD COLUMN y FIRST, \
             DROP COLUMN IF EXISTS z, \
             MODIFY COLUMN w UInt64 COMMENT 'count', \
             RENAME COLUMN a TO b, \
             COMMENT COLUMN b 'renamed', \
             ADD CONSTRAINT c1 CHECK b > 0, \
             DROP CONSTRAINT IF EXISTS c2",
        );
        let Statement::AlterTable(alter) = &stmt else {
            panic!("expected ALTER");
        };
        assert_eq!(alter.actions.len(), 8);
        assert!(matches!(
            &alter.actions[0],
            AlterTableAction::AddColumn {
                if_not_exists: true,
                position: Some(ColumnPosition::After(after)),
                ..
            } if after == "id"
        ));
        // `FIRST` is the position, not a type.
        assert!(matches!(
            &alter.actions[1],
            AlterTableAction::AddColumn {
                column: ColumnDef { data_type: None, .. },
                position: Some(ColumnPosition::First),
                ..
            }
        ));
        assert_roundtrip(&stmt.to_string());
    }

    #[test]
    fn test_quoted_position_word_stays_a_type() {
        let stmt = parse_one("ALTER TABLE t ADD COLUMN c \"FIRST\", MODIFY COLUMN d `after`");
        let Statement::AlterTable(alter) = &stmt else {
            panic!("expected ALTER");
        };
        assert!(matches!(
            &alter.actions[0],
            AlterTableAction::AddColumn {
                column: ColumnDef { data_type: Some(ty), .. },
                position: None,
                ..
            } if ty.name == "FIRST"
        ));
        assert_eq!(
            stmt.to_string(),
            "ALTER TABLE t ADD COLUMN c \"FIRST\", MODIFY COLUMN d \"after\""
        );
        assert_roundtrip(&stmt.to_string());
        assert_roundtrip("CREATE TABLE t (a \"first\", b Array(\"AFTER\")) ENGINE = Memory");
    }

    #[test]
    fn test_alter_mutations_and_rename() {
        assert_roundtrip("ALTER TABLE t DELETE WHERE ts < now() - INTERVAL 30 DAY");
        assert_roundtrip("ALTER TABLE t UPDATE a = 1, b = b * 2 WHERE c IN (1, 2)");
        assert_roundtrip("ALTER TABLE t RENAME TO db.t2");
        let err = syntax_err("ALTER TABLE t UPDATE a = 1");
        assert_eq!(err.expected, "WHERE");
        let err = syntax_err("ALTER TABLE t FREEZE");
        assert_eq!(err.expected, "ALTER action");
    }

    #[test]
    fn test_drop_truncate_rename() {
        let stmt = parse_one("DROP TABLE IF EXISTS a, db.b ON CLUSTER c");
        let Statement::Drop(drop) = &stmt else {
            panic!("expected DROP");
        };
        assert_eq!(drop.object, ObjectKind::Table);
        assert_eq!(drop.names.len(), 2);
        assert_roundtrip("DROP VIEW v");
        assert_roundtrip("DROP DATABASE IF EXISTS d");
        assert_roundtrip("DROP INDEX i");

        assert_eq!(
            parse_one("truncate if exists t").to_string(),
            "TRUNCATE TABLE IF EXISTS t"
        );
        let stmt = parse_one("RENAME TABLE a TO b, db.c TO db.d ON CLUSTER x");
        assert_eq!(stmt.category(), StatementCategory::Ddl);
        assert_eq!(
            stmt.to_string(),
            "RENAME TABLE a TO b, db.c TO db.d ON CLUSTER x"
        );
    }

    #[test]
    fn test_contextual_words_stay_identifiers() {
        // ENGINE, KEY and TO are only special where the grammar expects them.
        assert_roundtrip("CREATE TABLE engine (key String, to UInt8) ENGINE = Log");
        assert_roundtrip("SELECT engine, key FROM to");
    }
}

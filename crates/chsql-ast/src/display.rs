//! Canonical SQL rendering via `fmt::Display` for AST nodes.
//!
//! The output is designed to re-parse into an equal tree: keywords are
//! uppercase, identifiers are quoted only when necessary, and parentheses are
//! inserted from the precedence table rather than remembered from the source.
//! Formatting canonical output again yields the same text.

#[allow(clippy::wildcard_imports)]
use crate::*;
use std::fmt;

use crate::keywords::{
    is_column_position_word, is_function_keyword, is_ident_continue, is_ident_start,
    is_plain_identifier,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn comma_list_fn<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    fmt_item: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt_item(item, f)?;
    }
    Ok(())
}

fn write_ident(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_identifier(name) {
        f.write_str(name)
    } else {
        write_quoted(f, name)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "\"{}\"", name.replace('"', "\"\""))
}

fn write_ident_list(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    comma_list_fn(f, names, |name, f| write_ident(f, name))
}

/// Function names: `LEFT`/`RIGHT` stay bare because the parser accepts them
/// as function names when followed by `(`.
fn write_function_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_function_keyword(name) {
        f.write_str(name)
    } else {
        write_ident(f, name)
    }
}

/// Engine and format names accept keywords as well as identifiers, so any
/// single word prints bare.
fn write_word(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let is_word = chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue);
    if is_word {
        f.write_str(name)
    } else {
        write_ident(f, name)
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("''")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}

/// Write `expr`, parenthesized when its precedence is below `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn write_cluster(f: &mut fmt::Formatter<'_>, cluster: Option<&String>) -> fmt::Result {
    if let Some(cluster) = cluster {
        f.write_str(" ON CLUSTER ")?;
        write_ident(f, cluster)?;
    }
    Ok(())
}

/// Render a statement sequence: each statement followed by `;` and a newline.
#[must_use]
pub fn format_sequence(statements: &[Statement]) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for stmt in statements {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{stmt};");
    }
    out
}

// ---------------------------------------------------------------------------
// Names, literals, types
// ---------------------------------------------------------------------------

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(db) = &self.database {
            write_ident(f, db)?;
            f.write_str(".")?;
        }
        write_ident(f, &self.name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{table}.")?;
        }
        write_ident(f, &self.column)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) => f.write_str(text),
            Self::String(s) => write_string(f, s),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("?"),
            Self::Numbered(n) => write!(f, "?{n}"),
            Self::Named(name) => write!(f, ":{name}"),
            Self::Dollar(name) => write!(f, "${name}"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A bare `FIRST` or `AFTER` after an added column is its position.
        if is_column_position_word(&self.name) {
            write_quoted(f, &self.name)?;
        } else {
            write_ident(f, &self.name)?;
        }
        if !self.args.is_empty() {
            f.write_str("(")?;
            comma_list(f, &self.args)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for DataTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(n),
            Self::String(s) => write_string(f, s),
            Self::Type(t) => write!(f, "{t}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Expr {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Column(col) => write!(f, "{col}"),
            Self::Placeholder(p) => write!(f, "{p}"),
            Self::BinaryOp { left, op, right } => {
                let prec = op.precedence();
                write_operand(f, left, prec)?;
                write!(f, " {op} ")?;
                write_operand(f, right, prec + 1)
            }
            Self::UnaryOp { op, expr } => match op {
                UnaryOp::Not => {
                    f.write_str("NOT ")?;
                    write_operand(f, expr, precedence::NOT)
                }
                UnaryOp::Minus | UnaryOp::Plus => {
                    f.write_str(if *op == UnaryOp::Minus { "-" } else { "+" })?;
                    // `--` would start a comment.
                    if matches!(
                        **expr,
                        Self::UnaryOp {
                            op: UnaryOp::Minus | UnaryOp::Plus,
                            ..
                        }
                    ) {
                        write!(f, "({expr})")
                    } else {
                        write_operand(f, expr, precedence::UNARY)
                    }
                }
            },
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => {
                write_operand(f, expr, precedence::COMPARISON)?;
                f.write_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " })?;
                write_operand(f, low, precedence::COMPARISON + 1)?;
                f.write_str(" AND ")?;
                write_operand(f, high, precedence::COMPARISON + 1)
            }
            Self::In { expr, set, negated } => {
                write_operand(f, expr, precedence::COMPARISON)?;
                f.write_str(if *negated { " NOT IN (" } else { " IN (" })?;
                match set {
                    InSet::List(items) => comma_list(f, items)?,
                    InSet::Subquery(query) => write!(f, "{query}")?,
                }
                f.write_str(")")
            }
            Self::Like {
                expr,
                op,
                pattern,
                negated,
            } => {
                write_operand(f, expr, precedence::COMPARISON)?;
                if *negated {
                    f.write_str(" NOT")?;
                }
                f.write_str(match op {
                    LikeOp::Like => " LIKE ",
                    LikeOp::ILike => " ILIKE ",
                })?;
                write_operand(f, pattern, precedence::COMPARISON + 1)
            }
            Self::IsNull { expr, negated } => {
                write_operand(f, expr, precedence::COMPARISON)?;
                f.write_str(if *negated { " IS NOT NULL" } else { " IS NULL" })
            }
            Self::Case {
                operand,
                whens,
                else_expr,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for when in whens {
                    write!(f, " WHEN {} THEN {}", when.condition, when.result)?;
                }
                if let Some(else_expr) = else_expr {
                    write!(f, " ELSE {else_expr}")?;
                }
                f.write_str(" END")
            }
            Self::Cast { expr, data_type } => write!(f, "CAST({expr} AS {data_type})"),
            Self::Exists(query) => write!(f, "EXISTS ({query})"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Function(call) => write!(f, "{call}"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            Self::Array(items) => {
                f.write_str("[")?;
                comma_list(f, items)?;
                f.write_str("]")
            }
            Self::Subscript { expr, index } => {
                write_operand(f, expr, precedence::POSTFIX)?;
                write!(f, "[{index}]")
            }
            Self::Interval { value, unit } => {
                f.write_str("INTERVAL ")?;
                write_operand(f, value, precedence::COMPARISON + 1)?;
                write!(f, " {unit}")
            }
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_function_name(f, &self.name)?;
        f.write_str("(")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        match &self.args {
            FunctionArgs::Star => f.write_str("*")?,
            FunctionArgs::List(args) => comma_list(f, args)?,
        }
        f.write_str(")")?;
        if let Some(over) = &self.over {
            write!(f, " OVER ({over})")?;
        }
        Ok(())
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if !self.partition_by.is_empty() {
            f.write_str("PARTITION BY ")?;
            comma_list(f, &self.partition_by)?;
            sep = " ";
        }
        if !self.order_by.is_empty() {
            write!(f, "{sep}ORDER BY ")?;
            comma_list(f, &self.order_by)?;
            sep = " ";
        }
        if let Some(frame) = &self.frame {
            write!(f, "{sep}{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.units {
            FrameUnits::Rows => "ROWS ",
            FrameUnits::Range => "RANGE ",
        })?;
        match &self.end {
            Some(end) => write!(f, "BETWEEN {} AND {end}", self.start),
            None => write!(f, "{}", self.start),
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(expr) => {
                write_operand(f, expr, precedence::COMPARISON + 1)?;
                f.write_str(" PRECEDING")
            }
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(expr) => {
                write_operand(f, expr, precedence::COMPARISON + 1)?;
                f.write_str(" FOLLOWING")
            }
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

impl fmt::Display for OrderByItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.direction {
            Some(SortDirection::Asc) => f.write_str(" ASC")?,
            Some(SortDirection::Desc) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => f.write_str(" NULLS FIRST")?,
            Some(NullsOrder::Last) => f.write_str(" NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        write!(f, " = {}", self.value)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.column)?;
        write!(f, " = {}", self.value)
    }
}

// ---------------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------------

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit.limit)?;
            if let Some(offset) = &limit.offset {
                write!(f, " OFFSET {offset}")?;
            }
        }
        if !self.settings.is_empty() {
            f.write_str(" SETTINGS ")?;
            comma_list(f, &self.settings)?;
        }
        if let Some(format) = &self.format {
            f.write_str(" FORMAT ")?;
            write_word(f, format)?;
        }
        Ok(())
    }
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        comma_list(f, &self.ctes)
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        write!(f, " AS ({})", self.query)
    }
}

impl fmt::Display for SelectBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(core) => write!(f, "{core}"),
            Self::Nested(query) => write!(f, "({query})"),
            Self::Compound {
                op,
                quantifier,
                left,
                right,
            } => {
                let prec = op.precedence();
                if left.precedence() < prec {
                    write!(f, "({left})")?;
                } else {
                    write!(f, "{left}")?;
                }
                f.write_str(match op {
                    CompoundOp::Union => " UNION",
                    CompoundOp::Intersect => " INTERSECT",
                    CompoundOp::Except => " EXCEPT",
                })?;
                match quantifier {
                    SetQuantifier::None => {}
                    SetQuantifier::All => f.write_str(" ALL")?,
                    SetQuantifier::Distinct => f.write_str(" DISTINCT")?,
                }
                if right.precedence() <= prec {
                    write!(f, " ({right})")
                } else {
                    write!(f, " {right}")
                }
            }
        }
    }
}

impl fmt::Display for SelectCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.projection)?;
        if let Some(from) = &self.from {
            write!(f, " FROM {from}")?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            comma_list(f, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::QualifiedWildcard(name) => write!(f, "{name}.*"),
            Self::Expr { expr, alias } => {
                write!(f, "{expr}")?;
                write_alias(f, alias.as_ref())
            }
        }
    }
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: Option<&String>) -> fmt::Result {
    if let Some(alias) = alias {
        f.write_str(" AS ")?;
        write_ident(f, alias)?;
    }
    Ok(())
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, "{join}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                write_alias(f, alias.as_ref())
            }
            Self::Function { name, args, alias } => {
                write_ident(f, name)?;
                f.write_str("(")?;
                comma_list(f, args)?;
                f.write_str(")")?;
                write_alias(f, alias.as_ref())
            }
            Self::Derived { subquery, alias } => {
                write!(f, "({subquery})")?;
                write_alias(f, alias.as_ref())
            }
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            JoinKind::Comma => ", ",
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::Left => " LEFT JOIN ",
            JoinKind::Right => " RIGHT JOIN ",
            JoinKind::Full => " FULL JOIN ",
            JoinKind::Cross => " CROSS JOIN ",
        })?;
        write!(f, "{}", self.relation)?;
        match &self.constraint {
            Some(JoinConstraint::On(expr)) => write!(f, " ON {expr}"),
            Some(JoinConstraint::Using(columns)) => {
                f.write_str(" USING (")?;
                write_ident_list(f, columns)?;
                f.write_str(")")
            }
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// DML
// ---------------------------------------------------------------------------

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                comma_list_fn(f, rows, |row, f| {
                    f.write_str("(")?;
                    comma_list(f, row)?;
                    f.write_str(")")
                })
            }
            InsertSource::Select(query) => write!(f, " {query}"),
        }
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", self.table)?;
        write_alias(f, self.alias.as_ref())?;
        f.write_str(" SET ")?;
        comma_list(f, &self.assignments)?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        write_cluster(f, self.cluster.as_ref())?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

fn write_if_not_exists(f: &mut fmt::Formatter<'_>, flag: bool) -> fmt::Result {
    if flag {
        f.write_str("IF NOT EXISTS ")?;
    }
    Ok(())
}

fn write_if_exists(f: &mut fmt::Formatter<'_>, flag: bool) -> fmt::Result {
    if flag {
        f.write_str("IF EXISTS ")?;
    }
    Ok(())
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write!(f, "{}", self.name)?;
        write_cluster(f, self.cluster.as_ref())?;
        if !self.elements.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.elements)?;
            f.write_str(")")?;
        }
        if let Some(engine) = &self.engine {
            write!(f, " ENGINE = {engine}")?;
        }
        if let Some(expr) = &self.partition_by {
            write!(f, " PARTITION BY {expr}")?;
        }
        if let Some(expr) = &self.primary_key {
            write!(f, " PRIMARY KEY {expr}")?;
        }
        if let Some(expr) = &self.order_by {
            write!(f, " ORDER BY {expr}")?;
        }
        if !self.settings.is_empty() {
            f.write_str(" SETTINGS ")?;
            comma_list(f, &self.settings)?;
        }
        if let Some(comment) = &self.comment {
            f.write_str(" COMMENT ")?;
            write_string(f, comment)?;
        }
        if let Some(query) = &self.as_select {
            write!(f, " AS {query}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(col) => write!(f, "{col}"),
            Self::Constraint(constraint) => write!(f, "{constraint}"),
        }
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        if let Some(data_type) = &self.data_type {
            write!(f, " {data_type}")?;
        }
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Default(expr) => write!(f, "DEFAULT {expr}"),
            Self::Materialized(expr) => write!(f, "MATERIALIZED {expr}"),
            Self::Alias(expr) => write!(f, "ALIAS {expr}"),
            Self::PrimaryKey => f.write_str("PRIMARY KEY"),
            Self::Unique => f.write_str("UNIQUE"),
            Self::Check(expr) => write!(f, "CHECK ({expr})"),
            Self::Comment(text) => {
                f.write_str("COMMENT ")?;
                write_string(f, text)
            }
            Self::References(reference) => write!(f, "{reference}"),
        }
    }
}

impl fmt::Display for ForeignReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str("CONSTRAINT ")?;
            write_ident(f, name)?;
            f.write_str(" ")?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey(columns) => {
                f.write_str("PRIMARY KEY (")?;
                write_ident_list(f, columns)?;
                f.write_str(")")
            }
            TableConstraintKind::Unique(columns) => {
                f.write_str("UNIQUE (")?;
                write_ident_list(f, columns)?;
                f.write_str(")")
            }
            TableConstraintKind::Check(expr) => write!(f, "CHECK ({expr})"),
            TableConstraintKind::ForeignKey { columns, reference } => {
                f.write_str("FOREIGN KEY (")?;
                write_ident_list(f, columns)?;
                write!(f, ") {reference}")
            }
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_word(f, &self.name)?;
        if let Some(args) = &self.args {
            f.write_str("(")?;
            comma_list(f, args)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        if self.materialized {
            f.write_str("MATERIALIZED ")?;
        }
        f.write_str("VIEW ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write!(f, "{}", self.name)?;
        write_cluster(f, self.cluster.as_ref())?;
        if let Some(to) = &self.to {
            write!(f, " TO {to}")?;
        }
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        write!(f, " AS {}", self.query)
    }
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        f.write_str("INDEX ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write_ident(f, &self.name)?;
        write!(f, " ON {} (", self.table)?;
        comma_list_fn(f, &self.columns, |col, f| {
            write!(f, "{}", col.expr)?;
            match col.direction {
                Some(SortDirection::Asc) => f.write_str(" ASC"),
                Some(SortDirection::Desc) => f.write_str(" DESC"),
                None => Ok(()),
            }
        })?;
        f.write_str(")")
    }
}

impl fmt::Display for CreateDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE DATABASE ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write_ident(f, &self.name)?;
        write_cluster(f, self.cluster.as_ref())?;
        if let Some(engine) = &self.engine {
            write!(f, " ENGINE = {engine}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {}", self.name)?;
        write_cluster(f, self.cluster.as_ref())?;
        f.write_str(" ")?;
        comma_list(f, &self.actions)
    }
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn {
                if_not_exists,
                column,
                position,
            } => {
                f.write_str("ADD COLUMN ")?;
                write_if_not_exists(f, *if_not_exists)?;
                write!(f, "{column}")?;
                match position {
                    Some(ColumnPosition::First) => f.write_str(" FIRST"),
                    Some(ColumnPosition::After(name)) => {
                        f.write_str(" AFTER ")?;
                        write_ident(f, name)
                    }
                    None => Ok(()),
                }
            }
            Self::DropColumn { if_exists, name } => {
                f.write_str("DROP COLUMN ")?;
                write_if_exists(f, *if_exists)?;
                write_ident(f, name)
            }
            Self::ModifyColumn { if_exists, column } => {
                f.write_str("MODIFY COLUMN ")?;
                write_if_exists(f, *if_exists)?;
                write!(f, "{column}")
            }
            Self::RenameColumn {
                if_exists,
                from,
                to,
            } => {
                f.write_str("RENAME COLUMN ")?;
                write_if_exists(f, *if_exists)?;
                write_ident(f, from)?;
                f.write_str(" TO ")?;
                write_ident(f, to)
            }
            Self::CommentColumn {
                if_exists,
                name,
                comment,
            } => {
                f.write_str("COMMENT COLUMN ")?;
                write_if_exists(f, *if_exists)?;
                write_ident(f, name)?;
                f.write_str(" ")?;
                write_string(f, comment)
            }
            Self::AddConstraint {
                if_not_exists,
                name,
                check,
            } => {
                f.write_str("ADD CONSTRAINT ")?;
                write_if_not_exists(f, *if_not_exists)?;
                write_ident(f, name)?;
                write!(f, " CHECK ({check})")
            }
            Self::DropConstraint { if_exists, name } => {
                f.write_str("DROP CONSTRAINT ")?;
                write_if_exists(f, *if_exists)?;
                write_ident(f, name)
            }
            Self::RenameTable(name) => write!(f, "RENAME TO {name}"),
            Self::Delete(selection) => write!(f, "DELETE WHERE {selection}"),
            Self::Update {
                assignments,
                selection,
            } => {
                f.write_str("UPDATE ")?;
                comma_list(f, assignments)?;
                write!(f, " WHERE {selection}")
            }
        }
    }
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.object {
            ObjectKind::Table => "DROP TABLE ",
            ObjectKind::View => "DROP VIEW ",
            ObjectKind::Database => "DROP DATABASE ",
            ObjectKind::Index => "DROP INDEX ",
        })?;
        write_if_exists(f, self.if_exists)?;
        comma_list(f, &self.names)?;
        write_cluster(f, self.cluster.as_ref())
    }
}

impl fmt::Display for TruncateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TRUNCATE TABLE ")?;
        write_if_exists(f, self.if_exists)?;
        write!(f, "{}", self.name)?;
        write_cluster(f, self.cluster.as_ref())
    }
}

impl fmt::Display for RenameStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RENAME TABLE ")?;
        comma_list_fn(f, &self.pairs, |pair, f| {
            write!(f, "{} TO {}", pair.from, pair.to)
        })?;
        write_cluster(f, self.cluster.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Statement
// ---------------------------------------------------------------------------

impl fmt::Display for ShowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Databases => f.write_str("SHOW DATABASES"),
            Self::Tables { from, like } => {
                f.write_str("SHOW TABLES")?;
                if let Some(db) = from {
                    f.write_str(" FROM ")?;
                    write_ident(f, db)?;
                }
                if let Some(pattern) = like {
                    f.write_str(" LIKE ")?;
                    write_string(f, pattern)?;
                }
                Ok(())
            }
            Self::CreateTable(name) => write!(f, "SHOW CREATE TABLE {name}"),
        }
    }
}

impl fmt::Display for OptimizeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OPTIMIZE TABLE {}", self.table)?;
        write_cluster(f, self.cluster.as_ref())?;
        if self.final_merge {
            f.write_str(" FINAL")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::CreateTable(s) => write!(f, "{s}"),
            Self::CreateView(s) => write!(f, "{s}"),
            Self::CreateIndex(s) => write!(f, "{s}"),
            Self::CreateDatabase(s) => write!(f, "{s}"),
            Self::AlterTable(s) => write!(f, "{s}"),
            Self::Drop(s) => write!(f, "{s}"),
            Self::Truncate(s) => write!(f, "{s}"),
            Self::Rename(s) => write!(f, "{s}"),
            Self::Use(db) => {
                f.write_str("USE ")?;
                write_ident(f, db)
            }
            Self::Set(settings) => {
                f.write_str("SET ")?;
                comma_list(f, settings)
            }
            Self::Show(s) => write!(f, "{s}"),
            Self::Describe(name) => write!(f, "DESCRIBE TABLE {name}"),
            Self::Explain(explain) => {
                f.write_str("EXPLAIN ")?;
                if let Some(kind) = explain.kind {
                    write!(f, "{} ", kind.as_str())?;
                }
                write!(f, "{}", explain.statement)
            }
            Self::Optimize(s) => write!(f, "{s}"),
            Self::Begin => f.write_str("BEGIN"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
        }
    }
}

//! SQL abstract syntax tree for chsql.
//!
//! Every statement accepted by `chsql-parser` produces a tree of these
//! nodes. The tree is purely structural: nodes carry no source positions,
//! so two parses of equivalent text compare equal with `==`. Rendering back
//! to canonical SQL lives in [`display`] via `fmt::Display`.
//!
//! Statements are grouped into four categories (see [`StatementCategory`]):
//! DML, DDL, Query and Basic.

mod display;
pub mod keywords;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use display::format_sequence;

// ---------------------------------------------------------------------------
// Precedence table
// ---------------------------------------------------------------------------

/// Operator precedence levels, lowest to highest.
///
/// The parser derives its binding powers from these constants and the
/// formatter uses them to decide where parentheses are required, so the two
/// always agree.
pub mod precedence {
    pub const OR: u8 = 1;
    pub const AND: u8 = 2;
    /// Prefix `NOT`.
    pub const NOT: u8 = 3;
    /// `= != < <= > >=`, `IS [NOT] NULL`, `LIKE`, `ILIKE`, `IN`, `BETWEEN`.
    pub const COMPARISON: u8 = 4;
    /// `||`
    pub const CONCAT: u8 = 5;
    pub const ADDITIVE: u8 = 6;
    pub const MULTIPLICATIVE: u8 = 7;
    /// Prefix `-` and `+`.
    pub const UNARY: u8 = 8;
    /// Subscript `e[i]`.
    pub const POSTFIX: u8 = 9;
    /// Literals, column references, calls and bracketed forms.
    pub const ATOM: u8 = 10;
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Coarse grouping of statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementCategory {
    /// SELECT / INSERT / UPDATE / DELETE.
    Dml,
    /// CREATE / ALTER / DROP / TRUNCATE / RENAME.
    Ddl,
    /// Compound (set-operation) queries and queries with a WITH clause.
    Query,
    /// Session and administrative statements.
    Basic,
}

impl fmt::Display for StatementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dml => "dml",
            Self::Ddl => "ddl",
            Self::Query => "query",
            Self::Basic => "basic",
        })
    }
}

/// A single SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    // DML and queries
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),

    // DDL
    CreateTable(CreateTableStatement),
    CreateView(CreateViewStatement),
    CreateIndex(CreateIndexStatement),
    CreateDatabase(CreateDatabaseStatement),
    AlterTable(AlterTableStatement),
    Drop(DropStatement),
    Truncate(TruncateStatement),
    Rename(RenameStatement),

    // Basic
    Use(String),
    Set(Vec<Setting>),
    Show(ShowStatement),
    Describe(QualifiedName),
    Explain(ExplainStatement),
    Optimize(OptimizeStatement),
    Begin,
    Commit,
    Rollback,
}

impl Statement {
    /// The category this statement belongs to.
    ///
    /// A SELECT counts as a plain DML statement unless it carries a WITH
    /// clause or its body is a set operation or a parenthesized query.
    #[must_use]
    pub const fn category(&self) -> StatementCategory {
        match self {
            Self::Select(select) => {
                if select.with.is_some() || !matches!(select.body, SelectBody::Select(_)) {
                    StatementCategory::Query
                } else {
                    StatementCategory::Dml
                }
            }
            Self::Insert(_) | Self::Update(_) | Self::Delete(_) => StatementCategory::Dml,
            Self::CreateTable(_)
            | Self::CreateView(_)
            | Self::CreateIndex(_)
            | Self::CreateDatabase(_)
            | Self::AlterTable(_)
            | Self::Drop(_)
            | Self::Truncate(_)
            | Self::Rename(_) => StatementCategory::Ddl,
            Self::Use(_)
            | Self::Set(_)
            | Self::Show(_)
            | Self::Describe(_)
            | Self::Explain(_)
            | Self::Optimize(_)
            | Self::Begin
            | Self::Commit
            | Self::Rollback => StatementCategory::Basic,
        }
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// A possibly database-qualified object name: `name` or `db.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub database: Option<String>,
    pub name: String,
}

impl QualifiedName {
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            database: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn qualified(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            name: name.into(),
        }
    }
}

/// A column reference: `col`, `t.col` or `db.t.col`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: Option<QualifiedName>,
    pub column: String,
}

impl ColumnRef {
    #[must_use]
    pub fn bare(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    #[must_use]
    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(QualifiedName::bare(table)),
            column: column.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Literals and types
// ---------------------------------------------------------------------------

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal, kept as written (`42`, `0.5`, `1e-3`, `0xFF`).
    Number(String),
    /// String literal, already unescaped.
    String(String),
    Boolean(bool),
    Null,
}

/// A bind parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    /// `?`
    Anonymous,
    /// `?NNN`
    Numbered(u32),
    /// `:name`
    Named(String),
    /// `$name`
    Dollar(String),
}

/// A column or cast type, e.g. `UInt64`, `Nullable(String)`,
/// `DateTime64(3, 'UTC')`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    pub name: String,
    pub args: Vec<DataTypeArg>,
}

impl DataType {
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// One argument inside a parameterised type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeArg {
    Number(String),
    String(String),
    Type(DataType),
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    /// Canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => precedence::OR,
            Self::And => precedence::AND,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => {
                precedence::COMPARISON
            }
            Self::Concat => precedence::CONCAT,
            Self::Plus | Self::Minus => precedence::ADDITIVE,
            Self::Multiply | Self::Divide | Self::Modulo => precedence::MULTIPLICATIVE,
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
}

impl UnaryOp {
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not => precedence::NOT,
            Self::Minus | Self::Plus => precedence::UNARY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LikeOp {
    Like,
    ILike,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A SQL expression.
///
/// Parentheses written in the source are not represented; the formatter
/// re-derives them from [`Expr::precedence`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    Placeholder(Placeholder),
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    /// `expr [NOT] IN (...)`
    In {
        expr: Box<Expr>,
        set: InSet,
        negated: bool,
    },
    /// `expr [NOT] LIKE|ILIKE pattern`
    Like {
        expr: Box<Expr>,
        op: LikeOp,
        pattern: Box<Expr>,
        negated: bool,
    },
    /// `expr IS [NOT] NULL`
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    Case {
        operand: Option<Box<Expr>>,
        whens: Vec<WhenClause>,
        else_expr: Option<Box<Expr>>,
    },
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
    },
    Exists(Box<SelectStatement>),
    Subquery(Box<SelectStatement>),
    Function(FunctionCall),
    /// `(a, b, ...)` with at least two elements.
    Tuple(Vec<Expr>),
    /// `[a, b, ...]`
    Array(Vec<Expr>),
    /// `expr[index]`
    Subscript {
        expr: Box<Expr>,
        index: Box<Expr>,
    },
    /// `INTERVAL value UNIT`
    Interval {
        value: Box<Expr>,
        unit: String,
    },
}

impl Expr {
    /// Precedence level of the outermost construct of this expression.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::BinaryOp { op, .. } => op.precedence(),
            Self::UnaryOp { op, .. } => op.precedence(),
            Self::Between { .. } | Self::In { .. } | Self::Like { .. } | Self::IsNull { .. } => {
                precedence::COMPARISON
            }
            Self::Subscript { .. } => precedence::POSTFIX,
            Self::Literal(_)
            | Self::Column(_)
            | Self::Placeholder(_)
            | Self::Case { .. }
            | Self::Cast { .. }
            | Self::Exists(_)
            | Self::Subquery(_)
            | Self::Function(_)
            | Self::Tuple(_)
            | Self::Array(_)
            | Self::Interval { .. } => precedence::ATOM,
        }
    }

    /// Shorthand for a numeric literal.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::Literal(Literal::Number(text.into()))
    }

    /// Shorthand for an unqualified column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::bare(name))
    }

    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn unary(op: UnaryOp, expr: Self) -> Self {
        Self::UnaryOp {
            op,
            expr: Box::new(expr),
        }
    }
}

/// Right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InSet {
    List(Vec<Expr>),
    Subquery(Box<SelectStatement>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhenClause {
    pub condition: Expr,
    pub result: Expr,
}

/// A function call, optionally windowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: FunctionArgs,
    pub distinct: bool,
    pub over: Option<WindowSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArgs {
    /// `count(*)`
    Star,
    List(Vec<Expr>),
}

/// `OVER (PARTITION BY ... ORDER BY ... frame)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByItem>,
    pub frame: Option<WindowFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub start: FrameBound,
    /// Present for the `BETWEEN start AND end` form.
    pub end: Option<FrameBound>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameUnits {
    Rows,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

// ---------------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------------

/// A full query: optional CTEs, a body, and trailing clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub body: SelectBody,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<LimitClause>,
    pub settings: Vec<Setting>,
    /// Output format name (`FORMAT JSONEachRow`).
    pub format: Option<String>,
}

impl SelectStatement {
    /// Wrap a body with no trailing clauses.
    #[must_use]
    pub const fn from_body(body: SelectBody) -> Self {
        Self {
            with: None,
            body,
            order_by: Vec::new(),
            limit: None,
            settings: Vec::new(),
            format: None,
        }
    }
}

/// The set-expression tree of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectBody {
    Select(Box<SelectCore>),
    /// `left UNION|INTERSECT|EXCEPT [ALL|DISTINCT] right`
    Compound {
        op: CompoundOp,
        quantifier: SetQuantifier,
        left: Box<SelectBody>,
        right: Box<SelectBody>,
    },
    /// A parenthesized query used as a set operand.
    Nested(Box<SelectStatement>),
}

impl SelectBody {
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Compound { op, .. } => op.precedence(),
            Self::Select(_) | Self::Nested(_) => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundOp {
    Union,
    Intersect,
    Except,
}

impl CompoundOp {
    /// INTERSECT binds tighter than UNION and EXCEPT.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Union | Self::Except => 1,
            Self::Intersect => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetQuantifier {
    None,
    All,
    Distinct,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

/// `name [(columns)] AS (query)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cte {
    pub name: String,
    pub columns: Vec<String>,
    pub query: Box<SelectStatement>,
}

/// A single `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ...` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectCore {
    pub distinct: bool,
    pub projection: Vec<SelectItem>,
    pub from: Option<FromClause>,
    pub selection: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// `t.*` or `db.t.*`
    QualifiedWildcard(QualifiedName),
    Expr { expr: Expr, alias: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FromClause {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

/// A single relation in a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableFactor {
    Table {
        name: QualifiedName,
        alias: Option<String>,
    },
    /// Table function such as `numbers(10)`.
    Function {
        name: String,
        args: Vec<Expr>,
        alias: Option<String>,
    },
    Derived {
        subquery: Box<SelectStatement>,
        alias: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub relation: TableFactor,
    pub constraint: Option<JoinConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    /// `a, b`
    Comma,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByItem {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
    pub nulls: Option<NullsOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullsOrder {
    First,
    Last,
}

/// `LIMIT n [OFFSET m]`. The `LIMIT m, n` form is normalized into this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimitClause {
    pub limit: Expr,
    pub offset: Option<Expr>,
}

/// `name = value` in SETTINGS and SET.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub value: Expr,
}

// ---------------------------------------------------------------------------
// INSERT / UPDATE / DELETE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsertStatement {
    pub table: QualifiedName,
    pub columns: Vec<String>,
    pub source: InsertSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Select(Box<SelectStatement>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub table: QualifiedName,
    pub alias: Option<String>,
    pub assignments: Vec<Assignment>,
    pub selection: Option<Expr>,
}

/// `column = value`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub table: QualifiedName,
    pub cluster: Option<String>,
    pub selection: Option<Expr>,
}

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

/// `CREATE TABLE`.
///
/// Table-level clauses are kept in the fixed order ENGINE, PARTITION BY,
/// PRIMARY KEY, ORDER BY, SETTINGS, COMMENT, AS.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateTableStatement {
    pub or_replace: bool,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub cluster: Option<String>,
    /// Columns and constraints in source order.
    pub elements: Vec<TableElement>,
    pub engine: Option<Engine>,
    pub partition_by: Option<Expr>,
    pub primary_key: Option<Expr>,
    pub order_by: Option<Expr>,
    pub settings: Vec<Setting>,
    pub comment: Option<String>,
    pub as_select: Option<Box<SelectStatement>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

/// `name [type] option*`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: Option<DataType>,
    pub options: Vec<ColumnOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnOption {
    Null,
    NotNull,
    Default(Expr),
    Materialized(Expr),
    Alias(Expr),
    PrimaryKey,
    Unique,
    Check(Expr),
    Comment(String),
    References(ForeignReference),
}

/// `REFERENCES table [(columns)]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignReference {
    pub table: QualifiedName,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableConstraint {
    pub name: Option<String>,
    pub kind: TableConstraintKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableConstraintKind {
    PrimaryKey(Vec<String>),
    Unique(Vec<String>),
    Check(Expr),
    ForeignKey {
        columns: Vec<String>,
        reference: ForeignReference,
    },
}

/// `ENGINE = Name[(args)]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    /// `None` when written without parentheses.
    pub args: Option<Vec<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateViewStatement {
    pub or_replace: bool,
    pub materialized: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub cluster: Option<String>,
    /// Target table of a materialized view (`TO db.t`).
    pub to: Option<QualifiedName>,
    pub columns: Vec<String>,
    pub query: Box<SelectStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateIndexStatement {
    pub unique: bool,
    pub if_not_exists: bool,
    pub name: String,
    pub table: QualifiedName,
    pub columns: Vec<IndexColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexColumn {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateDatabaseStatement {
    pub if_not_exists: bool,
    pub name: String,
    pub cluster: Option<String>,
    pub engine: Option<Engine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlterTableStatement {
    pub name: QualifiedName,
    pub cluster: Option<String>,
    pub actions: Vec<AlterTableAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlterTableAction {
    AddColumn {
        if_not_exists: bool,
        column: ColumnDef,
        position: Option<ColumnPosition>,
    },
    DropColumn {
        if_exists: bool,
        name: String,
    },
    ModifyColumn {
        if_exists: bool,
        column: ColumnDef,
    },
    RenameColumn {
        if_exists: bool,
        from: String,
        to: String,
    },
    CommentColumn {
        if_exists: bool,
        name: String,
        comment: String,
    },
    AddConstraint {
        if_not_exists: bool,
        name: String,
        check: Expr,
    },
    DropConstraint {
        if_exists: bool,
        name: String,
    },
    RenameTable(QualifiedName),
    /// Mutation: `DELETE WHERE expr`.
    Delete(Expr),
    /// Mutation: `UPDATE col = expr, ... WHERE expr`.
    Update {
        assignments: Vec<Assignment>,
        selection: Expr,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnPosition {
    First,
    After(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Table,
    View,
    Database,
    Index,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropStatement {
    pub object: ObjectKind,
    pub if_exists: bool,
    pub names: Vec<QualifiedName>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TruncateStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenameStatement {
    pub pairs: Vec<RenamePair>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenamePair {
    pub from: QualifiedName,
    pub to: QualifiedName,
}

// ---------------------------------------------------------------------------
// Basic statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShowStatement {
    Databases,
    Tables {
        from: Option<String>,
        like: Option<String>,
    },
    CreateTable(QualifiedName),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainStatement {
    pub kind: Option<ExplainKind>,
    pub statement: Box<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplainKind {
    Ast,
    Syntax,
    Plan,
    Pipeline,
}

impl ExplainKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ast => "AST",
            Self::Syntax => "SYNTAX",
            Self::Plan => "PLAN",
            Self::Pipeline => "PIPELINE",
        }
    }
}

/// `OPTIMIZE TABLE name [ON CLUSTER c] [FINAL]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptimizeStatement {
    pub table: QualifiedName,
    pub cluster: Option<String>,
    pub final_merge: bool,
}

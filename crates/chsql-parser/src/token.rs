// Token types.
//
// Every token carries its kind, the raw source text it was scanned from and
// the position of its first character. Reserved words get their own variants
// so the parser can match them directly; contextual words (ENGINE, SHOW,
// PARTITION, ...) stay identifiers and are recognised by spelling.

use crate::error::Position;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text, including quotes for literals.
    pub text: String,
    pub position: Position,
}

impl Token {
    /// Human-readable description used in syntax errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Eof => "end of input".to_owned(),
            TokenKind::Number(_) => format!("number {}", self.text),
            TokenKind::String(_) => format!("string {}", self.text),
            TokenKind::Id(_) | TokenKind::QuotedId(_) => format!("identifier `{}`", self.text),
            TokenKind::Question
            | TokenKind::QuestionNum(_)
            | TokenKind::ColonParam(_)
            | TokenKind::DollarParam(_) => format!("parameter {}", self.text),
            kind if kind.is_keyword() => format!("keyword {}", self.text.to_ascii_uppercase()),
            _ => format!("`{}`", self.text),
        }
    }
}

/// Token discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // === Literals ===
    /// Numeric literal, raw text: `42`, `1.5e3`, `0xFF`, `.5`.
    Number(String),
    /// String literal with escapes resolved.
    String(String),

    // === Identifiers ===
    Id(String),
    /// `"name"` or `` `name` ``, unescaped.
    QuotedId(String),

    // === Bind parameters ===
    Question,
    QuestionNum(u32),
    ColonParam(String),
    DollarParam(String),

    // === Operators ===
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,   // `=`
    EqEq, // `==`
    Ne,   // `!=`
    LtGt, // `<>`
    Lt,
    Le,
    Gt,
    Ge,
    Concat, // `||`

    // === Punctuation ===
    Dot,
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    // === Keywords ===
    KwAlias,
    KwAll,
    KwAlter,
    KwAnd,
    KwAs,
    KwAsc,
    KwBetween,
    KwBy,
    KwCase,
    KwCast,
    KwCheck,
    KwComment,
    KwConstraint,
    KwCreate,
    KwCross,
    KwCurrent,
    KwDefault,
    KwDelete,
    KwDesc,
    KwDistinct,
    KwDrop,
    KwElse,
    KwEnd,
    KwExcept,
    KwExists,
    KwFalse,
    KwForeign,
    KwFormat,
    KwFrom,
    KwFull,
    KwGroup,
    KwHaving,
    KwIlike,
    KwIn,
    KwInner,
    KwInsert,
    KwIntersect,
    KwInterval,
    KwInto,
    KwIs,
    KwJoin,
    KwLeft,
    KwLike,
    KwLimit,
    KwMaterialized,
    KwNot,
    KwNull,
    KwOn,
    KwOr,
    KwOrder,
    KwOuter,
    KwPrimary,
    KwRecursive,
    KwReferences,
    KwRight,
    KwSelect,
    KwSet,
    KwSettings,
    KwTable,
    KwThen,
    KwTrue,
    KwUnbounded,
    KwUnion,
    KwUnique,
    KwUpdate,
    KwUsing,
    KwValues,
    KwWhen,
    KwWhere,
    KwWith,

    // === Special ===
    Eof,
}

impl TokenKind {
    /// Look up a reserved keyword, ignoring ASCII case.
    #[must_use]
    pub fn lookup_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ALIAS" => Some(Self::KwAlias),
            "ALL" => Some(Self::KwAll),
            "ALTER" => Some(Self::KwAlter),
            "AND" => Some(Self::KwAnd),
            "AS" => Some(Self::KwAs),
            "ASC" => Some(Self::KwAsc),
            "BETWEEN" => Some(Self::KwBetween),
            "BY" => Some(Self::KwBy),
            "CASE" => Some(Self::KwCase),
            "CAST" => Some(Self::KwCast),
            "CHECK" => Some(Self::KwCheck),
            "COMMENT" => Some(Self::KwComment),
            "CONSTRAINT" => Some(Self::KwConstraint),
            "CREATE" => Some(Self::KwCreate),
            "CROSS" => Some(Self::KwCross),
            "CURRENT" => Some(Self::KwCurrent),
            "DEFAULT" => Some(Self::KwDefault),
            "DELETE" => Some(Self::KwDelete),
            "DESC" => Some(Self::KwDesc),
            "DISTINCT" => Some(Self::KwDistinct),
            "DROP" => Some(Self::KwDrop),
            "ELSE" => Some(Self::KwElse),
            "END" => Some(Self::KwEnd),
            "EXCEPT" => Some(Self::KwExcept),
            "EXISTS" => Some(Self::KwExists),
            "FALSE" => Some(Self::KwFalse),
            "FOREIGN" => Some(Self::KwForeign),
            "FORMAT" => Some(Self::KwFormat),
            "FROM" => Some(Self::KwFrom),
            "FULL" => Some(Self::KwFull),
            "GROUP" => Some(Self::KwGroup),
            "HAVING" => Some(Self::KwHaving),
            "ILIKE" => Some(Self::KwIlike),
            "IN" => Some(Self::KwIn),
            "INNER" => Some(Self::KwInner),
            "INSERT" => Some(Self::KwInsert),
            "INTERSECT" => Some(Self::KwIntersect),
            "INTERVAL" => Some(Self::KwInterval),
            "INTO" => Some(Self::KwInto),
            "IS" => Some(Self::KwIs),
            "JOIN" => Some(Self::KwJoin),
            "LEFT" => Some(Self::KwLeft),
            "LIKE" => Some(Self::KwLike),
            "LIMIT" => Some(Self::KwLimit),
            "MATERIALIZED" => Some(Self::KwMaterialized),
            "NOT" => Some(Self::KwNot),
            "NULL" => Some(Self::KwNull),
            "ON" => Some(Self::KwOn),
            "OR" => Some(Self::KwOr),
            "ORDER" => Some(Self::KwOrder),
            "OUTER" => Some(Self::KwOuter),
            "PRIMARY" => Some(Self::KwPrimary),
            "RECURSIVE" => Some(Self::KwRecursive),
            "REFERENCES" => Some(Self::KwReferences),
            "RIGHT" => Some(Self::KwRight),
            "SELECT" => Some(Self::KwSelect),
            "SET" => Some(Self::KwSet),
            "SETTINGS" => Some(Self::KwSettings),
            "TABLE" => Some(Self::KwTable),
            "THEN" => Some(Self::KwThen),
            "TRUE" => Some(Self::KwTrue),
            "UNBOUNDED" => Some(Self::KwUnbounded),
            "UNION" => Some(Self::KwUnion),
            "UNIQUE" => Some(Self::KwUnique),
            "UPDATE" => Some(Self::KwUpdate),
            "USING" => Some(Self::KwUsing),
            "VALUES" => Some(Self::KwValues),
            "WHEN" => Some(Self::KwWhen),
            "WHERE" => Some(Self::KwWhere),
            "WITH" => Some(Self::KwWith),
            _ => None,
        }
    }

    /// Canonical uppercase spelling of a keyword token, `None` otherwise.
    #[must_use]
    pub const fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            Self::KwAlias => "ALIAS",
            Self::KwAll => "ALL",
            Self::KwAlter => "ALTER",
            Self::KwAnd => "AND",
            Self::KwAs => "AS",
            Self::KwAsc => "ASC",
            Self::KwBetween => "BETWEEN",
            Self::KwBy => "BY",
            Self::KwCase => "CASE",
            Self::KwCast => "CAST",
            Self::KwCheck => "CHECK",
            Self::KwComment => "COMMENT",
            Self::KwConstraint => "CONSTRAINT",
            Self::KwCreate => "CREATE",
            Self::KwCross => "CROSS",
            Self::KwCurrent => "CURRENT",
            Self::KwDefault => "DEFAULT",
            Self::KwDelete => "DELETE",
            Self::KwDesc => "DESC",
            Self::KwDistinct => "DISTINCT",
            Self::KwDrop => "DROP",
            Self::KwElse => "ELSE",
            Self::KwEnd => "END",
            Self::KwExcept => "EXCEPT",
            Self::KwExists => "EXISTS",
            Self::KwFalse => "FALSE",
            Self::KwForeign => "FOREIGN",
            Self::KwFormat => "FORMAT",
            Self::KwFrom => "FROM",
            Self::KwFull => "FULL",
            Self::KwGroup => "GROUP",
            Self::KwHaving => "HAVING",
            Self::KwIlike => "ILIKE",
            Self::KwIn => "IN",
            Self::KwInner => "INNER",
            Self::KwInsert => "INSERT",
            Self::KwIntersect => "INTERSECT",
            Self::KwInterval => "INTERVAL",
            Self::KwInto => "INTO",
            Self::KwIs => "IS",
            Self::KwJoin => "JOIN",
            Self::KwLeft => "LEFT",
            Self::KwLike => "LIKE",
            Self::KwLimit => "LIMIT",
            Self::KwMaterialized => "MATERIALIZED",
            Self::KwNot => "NOT",
            Self::KwNull => "NULL",
            Self::KwOn => "ON",
            Self::KwOr => "OR",
            Self::KwOrder => "ORDER",
            Self::KwOuter => "OUTER",
            Self::KwPrimary => "PRIMARY",
            Self::KwRecursive => "RECURSIVE",
            Self::KwReferences => "REFERENCES",
            Self::KwRight => "RIGHT",
            Self::KwSelect => "SELECT",
            Self::KwSet => "SET",
            Self::KwSettings => "SETTINGS",
            Self::KwTable => "TABLE",
            Self::KwThen => "THEN",
            Self::KwTrue => "TRUE",
            Self::KwUnbounded => "UNBOUNDED",
            Self::KwUnion => "UNION",
            Self::KwUnique => "UNIQUE",
            Self::KwUpdate => "UPDATE",
            Self::KwUsing => "USING",
            Self::KwValues => "VALUES",
            Self::KwWhen => "WHEN",
            Self::KwWhere => "WHERE",
            Self::KwWith => "WITH",
            _ => return None,
        };
        Some(text)
    }

    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        self.keyword_text().is_some()
    }
}

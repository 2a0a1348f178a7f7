//! Reserved words and identifier character classes.
//!
//! The lexer turns every word in [`KEYWORDS`] into a dedicated keyword token,
//! so an identifier spelled like one of them must be quoted when printed.
//! Both sides consult this module to stay in sync.

/// Reserved keywords, uppercase and sorted.
pub const KEYWORDS: &[&str] = &[
    "ALIAS",
    "ALL",
    "ALTER",
    "AND",
    "AS",
    "ASC",
    "BETWEEN",
    "BY",
    "CASE",
    "CAST",
    "CHECK",
    "COMMENT",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "CURRENT",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DROP",
    "ELSE",
    "END",
    "EXCEPT",
    "EXISTS",
    "FALSE",
    "FOREIGN",
    "FORMAT",
    "FROM",
    "FULL",
    "GROUP",
    "HAVING",
    "ILIKE",
    "IN",
    "INNER",
    "INSERT",
    "INTERSECT",
    "INTERVAL",
    "INTO",
    "IS",
    "JOIN",
    "LEFT",
    "LIKE",
    "LIMIT",
    "MATERIALIZED",
    "NOT",
    "NULL",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "PRIMARY",
    "RECURSIVE",
    "REFERENCES",
    "RIGHT",
    "SELECT",
    "SET",
    "SETTINGS",
    "TABLE",
    "THEN",
    "TRUE",
    "UNBOUNDED",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USING",
    "VALUES",
    "WHEN",
    "WHERE",
    "WITH",
];

/// Keywords that may also name a function when directly followed by `(`.
pub const FUNCTION_KEYWORDS: &[&str] = &["LEFT", "RIGHT"];

/// Unreserved words that close a column definition under
/// `ALTER TABLE ... ADD COLUMN`, where they place the new column.
pub const COLUMN_POSITION_WORDS: &[&str] = &["AFTER", "FIRST"];

fn cmp_ignore_ascii_case(keyword: &str, word: &str) -> std::cmp::Ordering {
    let lhs = keyword.bytes();
    let rhs = word.bytes().map(|b| b.to_ascii_uppercase());
    lhs.cmp(rhs)
}

/// Whether `word` is a reserved keyword, ignoring ASCII case.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS
        .binary_search_by(|kw| cmp_ignore_ascii_case(kw, word))
        .is_ok()
}

/// Whether `word` is a keyword usable as a function name.
#[must_use]
pub fn is_function_keyword(word: &str) -> bool {
    FUNCTION_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}

/// Whether `word` is `FIRST` or `AFTER`, ignoring ASCII case.
#[must_use]
pub fn is_column_position_word(word: &str) -> bool {
    COLUMN_POSITION_WORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}

#[must_use]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

#[must_use]
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Whether `name` can be written without quotes: it matches
/// `[A-Za-z_][A-Za-z0-9_]*` and is not a keyword.
///
/// The lexer also reads non-ASCII letters in bare words, but such names
/// always print quoted.
#[must_use]
pub fn is_plain_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b == b'_' || b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b == b'_' || b.is_ascii_alphanumeric()) && !is_keyword(name)
}

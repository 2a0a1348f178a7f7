//! Integration tests for the public parse/format surface.
//!
//! Fixture documents under `testdata/` cover each statement category; every
//! statement must parse, report its category, and survive a format/parse
//! round trip unchanged.

use chsql::ast::{Expr, SelectBody, Statement, StatementCategory};
use chsql::{
    DEFAULT_MAX_DEPTH, LexErrorKind, ParseError, ParserConfig, Position, TokenKind, canonicalize,
    format_sequence, parse_expr, parse_statements, parse_statements_with,
};

const DML: &str = include_str!("testdata/dml.sql");
const DDL: &str = include_str!("testdata/ddl.sql");
const QUERY: &str = include_str!("testdata/query.sql");
const BASIC: &str = include_str!("testdata/basic.sql");

fn parse_ok(sql: &str) -> Vec<Statement> {
    parse_statements(sql).unwrap_or_else(|e| panic!("parse error: {e}\n{sql}"))
}

fn assert_roundtrip(stmt: &Statement) {
    let text = stmt.to_string();
    let reparsed = parse_ok(&text);
    assert_eq!(reparsed.len(), 1, "formatted text split: {text}");
    assert_eq!(&reparsed[0], stmt, "tree changed after formatting: {text}");
    assert_eq!(reparsed[0].to_string(), text, "format is not a fixed point");
}

fn check_fixture(source: &str, expected_count: usize, category: StatementCategory) {
    let stmts = parse_ok(source);
    assert_eq!(stmts.len(), expected_count);
    for stmt in &stmts {
        assert_eq!(stmt.category(), category, "wrong category for: {stmt}");
        assert_roundtrip(stmt);
    }
    let document = format_sequence(&stmts);
    assert_eq!(parse_ok(&document), stmts);
}

fn syntax_position(sql: &str) -> (Position, String, TokenKind) {
    match parse_statements(sql) {
        Err(ParseError::Syntax(e)) => (e.position, e.expected, e.found.kind),
        other => panic!("expected syntax error for {sql:?}, got {other:?}"),
    }
}

// ===========================================================================
// Fixtures
// ===========================================================================

#[test]
fn dml_fixture_roundtrips() {
    check_fixture(DML, 15, StatementCategory::Dml);
}

#[test]
fn ddl_fixture_roundtrips() {
    check_fixture(DDL, 19, StatementCategory::Ddl);
}

#[test]
fn query_fixture_roundtrips() {
    check_fixture(QUERY, 6, StatementCategory::Query);
}

#[test]
fn basic_fixture_roundtrips() {
    check_fixture(BASIC, 13, StatementCategory::Basic);
}

#[test]
fn canonical_text_samples() {
    let cases = [
        ("select a from t where b <> 1", "SELECT a FROM t WHERE b != 1"),
        ("SELECT a == b", "SELECT a = b"),
        ("SELECT ALL x FROM t", "SELECT x FROM t"),
        ("SELECT * FROM a LEFT OUTER JOIN b ON a.k = b.k", "SELECT * FROM a LEFT JOIN b ON a.k = b.k"),
        ("SELECT * FROM a JOIN b USING (k)", "SELECT * FROM a INNER JOIN b USING (k)"),
        ("SELECT 1 LIMIT 5, 10", "SELECT 1 LIMIT 10 OFFSET 5"),
        ("SELECT (a + b) * c, a + (b * c)", "SELECT (a + b) * c, a + b * c"),
        ("SELECT a - (b - c)", "SELECT a - (b - c)"),
        ("SELECT now() + interval 1 day", "SELECT now() + INTERVAL 1 DAY"),
        ("desc t", "DESCRIBE TABLE t"),
        ("SELECT 'a\\b', 'it''s'", "SELECT 'a\\\\b', 'it''s'"),
    ];
    for (input, expected) in cases {
        let stmts = parse_ok(input);
        assert_eq!(stmts[0].to_string(), expected, "input: {input}");
    }
}

// ===========================================================================
// Sequences and empty input
// ===========================================================================

#[test]
fn empty_sources_yield_no_statements() {
    for sql in ["", "   \n\t", "-- only a comment", "/* block */", ";", ";;  ;"] {
        assert!(parse_ok(sql).is_empty(), "expected no statements for {sql:?}");
    }
}

#[test]
fn statement_count_is_preserved() {
    let stmts = parse_ok("SELECT 1; SELECT 2;");
    assert_eq!(stmts.len(), 2);
    let stmts = parse_ok("SELECT 1;; USE db ;\n SHOW DATABASES");
    assert_eq!(stmts.len(), 3);
    assert_eq!(stmts[1], Statement::Use("db".to_owned()));
}

#[test]
fn canonicalize_is_idempotent() {
    let once = canonicalize(DDL).expect("canonicalize");
    assert_eq!(canonicalize(&once).expect("canonicalize again"), once);
    assert_eq!(once.lines().count(), 19);
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn select_star_from_reports_eof() {
    let (position, expected, found) = syntax_position("SELECT * FROM");
    assert_eq!(position, Position::new(1, 14, 13));
    assert_eq!(expected, "table name, table function or subquery");
    assert_eq!(found, TokenKind::Eof);
}

#[test]
fn error_positions_track_lines_and_columns() {
    let (position, expected, _) = syntax_position("SELECT 1;\nSELECT a FROM t WHERE");
    assert_eq!(position, Position::new(2, 22, 31));
    assert_eq!(expected, "expression");

    // Columns count characters, offsets count bytes.
    let (position, _, found) = syntax_position("SELECT 'héllo' 42");
    assert_eq!(position, Position::new(1, 16, 16));
    assert_eq!(found, TokenKind::Number("42".to_owned()));
}

#[test]
fn error_message_describes_found_token() {
    let err = parse_statements("SELECT a FROM FROM").expect_err("syntax error");
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 15: expected table name, table function or subquery, \
         found keyword FROM"
    );
}

#[test]
fn lex_errors_surface_before_parsing() {
    let err = parse_statements("SELECT 1 FROM; SELECT 'unterminated").expect_err("lex error");
    let ParseError::Lex(lex) = &err else {
        panic!("expected lex error, got {err:?}");
    };
    assert_eq!(lex.kind, LexErrorKind::UnterminatedString);
    assert_eq!(lex.position.offset, 22);
}

#[test]
fn first_error_aborts_the_whole_parse() {
    let err = parse_statements("SELECT 1; DROP SEQUENCE s; SELECT 2").expect_err("syntax error");
    assert_eq!(err.position().offset, 15);
}

// ===========================================================================
// Expression entry point
// ===========================================================================

#[test]
fn parse_expr_entry_point() {
    let expr = parse_expr("a + 1 > 2 AND b").expect("parse");
    assert!(matches!(expr, Expr::BinaryOp { .. }));
    assert_eq!(expr.to_string(), "a + 1 > 2 AND b");
    assert!(parse_expr("a b").is_err());
}

// ===========================================================================
// Serialization
// ===========================================================================

#[test]
fn statements_serialize_to_json_and_back() {
    for source in [DML, DDL, QUERY, BASIC] {
        for stmt in parse_ok(source) {
            let json = serde_json::to_string(&stmt).expect("serialize");
            let back: Statement = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, stmt);
        }
    }
}

#[test]
fn parser_config_loads_from_json() {
    let config: ParserConfig = serde_json::from_str(r#"{"max_depth": 3}"#).expect("config");
    let err = parse_statements_with("SELECT ((1))", &config).expect_err("too deep");
    assert!(matches!(err, ParseError::RecursionLimit { limit: 3, .. }));
}

// ===========================================================================
// Recursion limit
// ===========================================================================

#[test]
fn deep_nesting_hits_the_default_limit() {
    // Run on a roomy stack so the limit, not the thread, decides the outcome.
    let handle = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            let depth = DEFAULT_MAX_DEPTH * 4;
            let sql = format!("SELECT {}1{}", "(".repeat(depth), ")".repeat(depth));
            let err = parse_statements(&sql).expect_err("too deep");
            assert!(matches!(
                err,
                ParseError::RecursionLimit { limit, .. } if limit == DEFAULT_MAX_DEPTH
            ));

            let nested_queries = format!(
                "SELECT * FROM {}t{}",
                "(SELECT * FROM ".repeat(depth),
                ")".repeat(depth)
            );
            let err = parse_statements(&nested_queries).expect_err("too deep");
            assert!(matches!(err, ParseError::RecursionLimit { .. }));

            let shallow = format!("SELECT {}1{}", "(".repeat(32), ")".repeat(32));
            let stmts = parse_statements(&shallow).expect("within the limit");
            assert_eq!(stmts[0].to_string(), "SELECT 1");
        })
        .expect("spawn parser thread");
    handle.join().expect("parser thread panicked");
}

#[test]
fn long_chains_count_against_the_depth_limit() {
    let terms = 10_000;
    let chains = [
        format!("SELECT 1{}", " + 1".repeat(terms)),
        format!("SELECT * FROM t WHERE a{}", " AND a".repeat(terms)),
        format!("SELECT a{} FROM t", "[1]".repeat(terms)),
        format!("SELECT 1{}", " UNION ALL SELECT 1".repeat(terms)),
    ];
    for sql in &chains {
        let err = parse_statements(sql).expect_err("chain too long");
        assert!(
            matches!(err, ParseError::RecursionLimit { limit, .. } if limit == DEFAULT_MAX_DEPTH),
            "{err:?}"
        );
    }

    // Chains inside the limit parse and format on an ordinary test thread.
    for sql in [
        format!("SELECT 1{}", " + 1".repeat(64)),
        format!("SELECT * FROM t WHERE a{}", " OR a = 1".repeat(64)),
        format!("SELECT 1{}", " UNION ALL SELECT 1".repeat(64)),
    ] {
        let stmts = parse_ok(&sql);
        assert_eq!(stmts[0].to_string(), sql);
        assert_roundtrip(&stmts[0]);
    }
}

#[test]
fn nested_query_operands_stay_nested() {
    let stmts = parse_ok("((SELECT 1)) UNION ALL SELECT 2");
    let Statement::Select(select) = &stmts[0] else {
        panic!("expected select");
    };
    assert!(matches!(select.body, SelectBody::Compound { .. }));
    assert_roundtrip(&stmts[0]);
}

// ===========================================================================
// Thread safety
// ===========================================================================

#[test]
fn ast_and_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Statement>();
    assert_send_sync::<Expr>();
    assert_send_sync::<ParseError>();
    assert_send_sync::<ParserConfig>();
}

// ===========================================================================
// Property: canonical output is a fixed point
// ===========================================================================

mod proptest_canonical {
    use chsql::{canonicalize, parse_statements};
    use proptest::prelude::*;

    /// Unreserved words the parser matches by spelling in some positions.
    const CONTEXTUAL_WORDS: &[&str] = &[
        "first", "after", "to", "engine", "final", "view", "index", "database", "key",
        "tables", "partition", "column",
    ];

    fn arb_name() -> impl Strategy<Value = String> {
        prop_oneof![
            prop_oneof![
                "[a-z_][a-z0-9_]{0,6}",
                Just("select".to_owned()),
                Just("my col".to_owned()),
            ]
            .prop_map(|name| format!("\"{name}\"")),
            prop::sample::select(CONTEXTUAL_WORDS).prop_map(|word| word.to_owned()),
        ]
    }

    fn arb_type() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("String".to_owned()),
            Just("Nullable(UInt64)".to_owned()),
            prop::sample::select(CONTEXTUAL_WORDS).prop_map(|word| format!("\"{word}\"")),
            Just("Array(\"AFTER\")".to_owned()),
        ]
    }

    const POSITIONS: &[&str] = &["", " FIRST", " AFTER id", " AFTER \"first\""];

    fn arb_position() -> impl Strategy<Value = &'static str> {
        prop::sample::select(POSITIONS)
    }

    fn arb_value() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u32..1000).prop_map(|n| n.to_string()),
            "[a-z' ]{0,6}".prop_map(|s| format!("'{}'", s.replace('\'', "''"))),
            Just("NULL".to_owned()),
            Just("-(-1)".to_owned()),
        ]
    }

    fn arb_document() -> impl Strategy<Value = String> {
        let parts = (arb_name(), arb_name(), arb_value(), arb_type(), arb_position());
        let stmt = parts.prop_flat_map(|(t, c, v, ty, pos)| {
            prop_oneof![
                Just(format!("INSERT INTO {t} ({c}) VALUES ({v})")),
                Just(format!("UPDATE {t} SET {c} = {v} WHERE {c} IS NOT NULL")),
                Just(format!("ALTER TABLE {t} ADD COLUMN {c} String DEFAULT {v} FIRST")),
                Just(format!("ALTER TABLE {t} ADD COLUMN {c} {ty}{pos}")),
                Just(format!("ALTER TABLE {t} MODIFY COLUMN {c} {ty} DEFAULT {v}")),
                Just(format!("CREATE TABLE {t} ({c} Nullable(String)) ENGINE = Memory")),
                Just(format!("CREATE TABLE {t} ({c} {ty}, id {ty}) ENGINE = Memory")),
                Just(format!("SELECT {c} AS {t} FROM {t} UNION ALL SELECT {v}")),
                Just(format!(
                    "SELECT {c} FROM {t} WHERE {c} = {v}{}",
                    format!(" OR {c} = {v}").repeat(20)
                )),
                Just(format!("SET {c} = {v}")),
            ]
        });
        prop::collection::vec(stmt, 0..4).prop_map(|stmts| stmts.join(";\n"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn canonical_document_is_a_fixed_point(sql in arb_document()) {
            let once = canonicalize(&sql).expect("generated SQL parses");
            let twice = canonicalize(&once).expect("canonical SQL parses");
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn canonical_document_keeps_the_tree(sql in arb_document()) {
            let before = parse_statements(&sql).expect("generated SQL parses");
            let after = parse_statements(&canonicalize(&sql).expect("canonicalize"))
                .expect("canonical SQL parses");
            prop_assert_eq!(before, after);
        }
    }
}

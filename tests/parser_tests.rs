// tests/parser_tests.rs

use searchql::ast::Node;
use searchql::error::{ParseError, ParseErrorKind, Position};
use searchql::lexer::Lexer;
use searchql::parser::{MAX_NESTING, Parser};

fn parse(input: &str) -> Node {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer).unwrap();
    parser.parse().unwrap()
}

fn parse_err(input: &str) -> ParseError {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer).unwrap();
    parser.parse().unwrap_err()
}

fn t(word: &str) -> Node {
    Node::term(word)
}

fn not(inner: Node) -> Node {
    Node::exclusion(inner)
}

// ============================================================================
// Simple tests
// ============================================================================

#[test]
fn test_single_word() {
    assert_eq!(parse("harry"), t("harry"));
}

#[test]
fn test_adjacent_words_are_or() {
    assert_eq!(parse("harry potter"), Node::Or(vec![t("harry"), t("potter")]));
    assert_eq!(
        parse("  a   b c "),
        Node::Or(vec![t("a"), t("b"), t("c")])
    );
}

#[test]
fn test_phrase_is_not_or() {
    assert_eq!(parse("\"harry potter\""), Node::phrase(["harry", "potter"]));
    assert_ne!(parse("\"harry potter\""), parse("harry potter"));
}

#[test]
fn test_phrase_words_split_on_whitespace() {
    assert_eq!(parse("\"  harry \t potter \""), Node::phrase(["harry", "potter"]));
}

// ============================================================================
// Exclusion and requirement
// ============================================================================

#[test]
fn test_exclusion_is_conjunctive() {
    assert_eq!(
        parse("harry potter -150064"),
        Node::And(vec![
            Node::Or(vec![t("harry"), t("potter")]),
            not(t("150064"))
        ])
    );
}

#[test]
fn test_exclusion_position_is_kept() {
    assert_eq!(
        parse("-film harry potter"),
        Node::And(vec![not(t("film")), Node::Or(vec![t("harry"), t("potter")])])
    );
    assert_eq!(
        parse("harry -film potter"),
        Node::And(vec![Node::Or(vec![t("harry"), t("potter")]), not(t("film"))])
    );
}

#[test]
fn test_grouped_exclusion_is_conjunctive() {
    assert_eq!(
        parse("harry (-150064)"),
        Node::And(vec![t("harry"), not(t("150064"))])
    );
    assert_eq!(parse("harry (-150064)"), parse("harry -150064"));
    assert_eq!(
        parse("harry potter title:(-film)"),
        Node::And(vec![
            Node::Or(vec![t("harry"), t("potter")]),
            Node::field("title", not(t("film")))
        ])
    );
}

#[test]
fn test_lone_exclusion() {
    assert_eq!(parse("-film"), not(t("film")));
    assert_eq!(parse("-\"half blood\""), not(Node::phrase(["half", "blood"])));
}

#[test]
fn test_require_raises_to_conjunction() {
    assert_eq!(parse("+harry potter"), Node::And(vec![t("harry"), t("potter")]));
    assert_eq!(
        parse("+harry +potter ron hermione"),
        Node::And(vec![
            t("harry"),
            t("potter"),
            Node::Or(vec![t("ron"), t("hermione")])
        ])
    );
}

// ============================================================================
// Keywords and precedence
// ============================================================================

#[test]
fn test_explicit_and() {
    assert_eq!(parse("harry AND potter"), Node::And(vec![t("harry"), t("potter")]));
    assert_eq!(parse("a and b AND c"), Node::And(vec![t("a"), t("b"), t("c")]));
}

#[test]
fn test_and_binds_tighter_than_adjacency() {
    assert_eq!(
        parse("a b AND c"),
        Node::Or(vec![t("a"), Node::And(vec![t("b"), t("c")])])
    );
}

#[test]
fn test_or_is_loosest() {
    assert_eq!(
        parse("a OR b c"),
        Node::Or(vec![t("a"), Node::Or(vec![t("b"), t("c")])])
    );
    assert_eq!(
        parse("a -x OR b"),
        Node::Or(vec![Node::And(vec![t("a"), not(t("x"))]), t("b")])
    );
}

#[test]
fn test_and_with_exclusion() {
    assert_eq!(
        parse("harry AND -film"),
        Node::And(vec![t("harry"), not(t("film"))])
    );
}

#[test]
fn test_require_inside_and_is_redundant() {
    assert_eq!(parse("+a AND b"), Node::And(vec![t("a"), t("b")]));
}

// ============================================================================
// Groups and fields
// ============================================================================

#[test]
fn test_group_overrides_precedence() {
    assert_eq!(
        parse("(harry OR ron) -film"),
        Node::And(vec![Node::Or(vec![t("harry"), t("ron")]), not(t("film"))])
    );
    assert_eq!(
        parse("(a b) AND c"),
        Node::And(vec![Node::Or(vec![t("a"), t("b")]), t("c")])
    );
}

#[test]
fn test_redundant_group_collapses() {
    assert_eq!(parse("((harry))"), t("harry"));
}

#[test]
fn test_field_scopes() {
    assert_eq!(parse("title:harry"), Node::field("title", t("harry")));
    assert_eq!(
        parse("title:\"harry potter\""),
        Node::field("title", Node::phrase(["harry", "potter"]))
    );
    assert_eq!(
        parse("title:(harry OR ron)"),
        Node::field("title", Node::Or(vec![t("harry"), t("ron")]))
    );
}

#[test]
fn test_field_binds_to_one_operand() {
    assert_eq!(
        parse("title:harry potter"),
        Node::Or(vec![Node::field("title", t("harry")), t("potter")])
    );
}

#[test]
fn test_excluded_field() {
    assert_eq!(parse("-body:film"), not(Node::field("body", t("film"))));
}

#[test]
fn test_nested_fields_are_kept() {
    assert_eq!(
        parse("title:body:harry"),
        Node::field("title", Node::field("body", t("harry")))
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_query() {
    let err = parse_err("   ");
    assert_eq!(err.kind, ParseErrorKind::EmptyQuery);
    assert_eq!(err.position, Position(3));
}

#[test]
fn test_lone_exclude() {
    let err = parse_err("-");
    assert_eq!(err.kind, ParseErrorKind::MissingOperand("'-'".into()));
    assert_eq!(err.position, Position(0));
}

#[test]
fn test_detached_prefix() {
    let err = parse_err("harry - film");
    assert_eq!(err.kind, ParseErrorKind::MissingOperand("'-'".into()));
    assert_eq!(err.position, Position(6));

    let err = parse_err("+ harry");
    assert_eq!(err.kind, ParseErrorKind::MissingOperand("'+'".into()));
}

#[test]
fn test_detached_field() {
    let err = parse_err("title: harry");
    assert_eq!(err.kind, ParseErrorKind::MissingOperand("field 'title:'".into()));
    assert_eq!(err.position, Position(0));
}

#[test]
fn test_dangling_keywords() {
    assert_eq!(parse_err("harry AND").kind, ParseErrorKind::MissingOperand("AND".into()));
    assert_eq!(parse_err("harry OR").kind, ParseErrorKind::MissingOperand("OR".into()));
    assert!(matches!(parse_err("AND harry").kind, ParseErrorKind::UnexpectedToken(_)));
}

#[test]
fn test_empty_group() {
    let err = parse_err("harry ()");
    assert_eq!(err.kind, ParseErrorKind::EmptyGroup);
    assert_eq!(err.position, Position(6));
}

#[test]
fn test_unclosed_group() {
    let err = parse_err("(harry potter");
    assert_eq!(err.kind, ParseErrorKind::UnclosedGroup);
    assert_eq!(err.position, Position(0));

    assert_eq!(parse_err("harry (").kind, ParseErrorKind::UnclosedGroup);
}

#[test]
fn test_stray_close() {
    let err = parse_err("harry)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken("')'".into()));
    assert_eq!(err.position, Position(5));
}

#[test]
fn test_double_exclusion() {
    assert_eq!(parse_err("--film").kind, ParseErrorKind::DoubleExclusion);
    assert_eq!(parse_err("-(-film)").kind, ParseErrorKind::DoubleExclusion);
}

#[test]
fn test_empty_phrase() {
    let err = parse_err("harry \"  \"");
    assert_eq!(err.kind, ParseErrorKind::EmptyPhrase);
    assert_eq!(err.position, Position(6));
}

#[test]
fn test_error_carries_query() {
    let err = parse_err("harry ()");
    assert_eq!(err.query, "harry ()");
    assert_eq!(
        err.to_string(),
        "empty group at offset 6 in query \"harry ()\""
    );
}

#[test]
fn test_nesting_at_limit() {
    let query = format!("{}x{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
    assert_eq!(parse(&query), t("x"));
}

#[test]
fn test_nesting_too_deep() {
    let query = format!("{}x{}", "(".repeat(200_000), ")".repeat(200_000));
    let err = parse_err(&query);
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
    assert_eq!(err.position, Position(MAX_NESTING));

    let query = format!("{}x", "a:".repeat(MAX_NESTING + 1));
    let err = parse_err(&query);
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
    assert_eq!(err.position, Position(2 * MAX_NESTING));
}

#[test]
fn test_lex_errors_surface_from_new() {
    let err = Parser::new(Lexer::new("\"unterminated")).err().unwrap();
    assert_eq!(err.position, Position(0));
}

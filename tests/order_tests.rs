// tests/order_tests.rs

use searchql::error::{ParseErrorKind, Position};
use searchql::order::{OrderDirective, OrderSpec, RemainderPolicy, SortDirection, parse_order};
use searchql::store::{MemoryStore, SearchOptions};
use searchql::{Filter, compile};
use serde_json::{Value, json};

fn directive(param: &str) -> OrderDirective {
    parse_order(param).unwrap().unwrap()
}

fn nids(items: &[Value]) -> Vec<i64> {
    items.iter().map(|doc| doc["nid"].as_i64().unwrap()).collect()
}

fn everything() -> Filter {
    Filter::And(vec![])
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_match_directive() {
    assert_eq!(directive("match(2001,1001)").keys(), ["2001", "1001"]);
}

#[test]
fn test_whitespace_and_case() {
    assert_eq!(directive("  MATCH ( 2001 ,  1001 )  ").keys(), ["2001", "1001"]);
}

#[test]
fn test_duplicates_dropped() {
    assert_eq!(directive("match(3,1,3,2,1)").keys(), ["3", "1", "2"]);
}

#[test]
fn test_identifier_characters() {
    assert_eq!(
        directive("match(node-7, a_b, v1.2)").keys(),
        ["node-7", "a_b", "v1.2"]
    );
}

#[test]
fn test_not_a_directive() {
    for param in ["", "asc", "desc", "title", "matches(1)", "nid,match(1)"] {
        assert_eq!(parse_order(param).unwrap(), None, "param: {:?}", param);
    }
}

#[test]
fn test_malformed_directives() {
    let cases = [
        ("match(1,2", "missing ')'", 9),
        ("match(1) desc", "unexpected text after ')'", 9),
        ("match()", "empty identifier list", 6),
        ("match(1,,2)", "empty identifier", 8),
        ("match(1, 'two')", "invalid identifier \"'two'\"", 9),
        ("match(1 2)", "invalid identifier \"1 2\"", 6),
    ];

    for (param, reason, offset) in cases {
        let err = parse_order(param).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MalformedOrder(reason.to_string()),
            "param: {:?}",
            param
        );
        assert_eq!(err.position, Position(offset), "param: {:?}", param);
        assert_eq!(err.query, param);
    }
}

#[test]
fn test_order_spec() {
    assert_eq!(
        OrderSpec::parse("desc").unwrap(),
        OrderSpec::Direction(SortDirection::Desc)
    );
    let spec = OrderSpec::parse("match(9)").unwrap();
    assert_eq!(spec.directive().map(OrderDirective::keys), Some(&["9".to_string()][..]));
    assert_eq!(spec.direction(), SortDirection::Asc);
}

// ============================================================================
// Execution
// ============================================================================

#[test]
fn test_listed_identifiers_come_first() {
    let store = MemoryStore::new(
        [1000, 1001, 2000, 2001]
            .into_iter()
            .map(|nid| json!({ "nid": nid }))
            .collect(),
    );
    let options = SearchOptions {
        order: Some(directive("match(2001,1001)")),
        ..Default::default()
    };

    let result = store.execute(&everything(), &options);
    assert_eq!(result.hits, 4);
    assert_eq!(nids(&result.items)[..2], [2001, 1001]);

    // Remaining identifiers keep a stable order.
    let again = store.execute(&everything(), &options);
    assert_eq!(nids(&result.items), nids(&again.items));
    assert_eq!(nids(&result.items), vec![2001, 1001, 1000, 2000]);
}

#[test]
fn test_remainder_by_key() {
    let store = MemoryStore::new(
        [2000, 1000, 2001, 1001]
            .into_iter()
            .map(|nid| json!({ "nid": nid }))
            .collect(),
    )
    .with_remainder(RemainderPolicy::ByKey);
    let options = SearchOptions {
        order: Some(directive("match(2001)")),
        ..Default::default()
    };
    let result = store.execute(&everything(), &options);
    assert_eq!(nids(&result.items), vec![2001, 1000, 1001, 2000]);
}

#[test]
fn test_unmatched_identifiers_are_ignored() {
    let store = MemoryStore::new(vec![
        json!({"nid": 1, "fields": {"title": {"value": "harry"}}}),
        json!({"nid": 2, "fields": {"title": {"value": "ron"}}}),
        json!({"nid": 3, "fields": {"title": {"value": "harry"}}}),
    ]);
    let filter = searchql::lower(
        &compile("harry").unwrap(),
        &mut searchql::DocumentFilterWalker::new(&searchql::Schema::default()),
    )
    .unwrap();
    let options = SearchOptions {
        order: Some(directive("match(2, 3)")),
        ..Default::default()
    };
    let result = store.execute(&filter, &options);
    assert_eq!(result.hits, 2);
    assert_eq!(nids(&result.items), vec![3, 1]);
}

#[test]
fn test_string_keys() {
    let store = MemoryStore::new(vec![
        json!({"uuid": "a"}),
        json!({"uuid": "b"}),
        json!({"uuid": "c"}),
    ])
    .with_key_field("uuid");
    let options = SearchOptions {
        order: Some(directive("match(c)")),
        ..Default::default()
    };
    let result = store.execute(&everything(), &options);
    let keys: Vec<&str> = result.items.iter().map(|d| d["uuid"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

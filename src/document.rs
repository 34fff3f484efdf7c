//! Helpers for reading stored JSON documents.
//!
//! Documents are plain `serde_json::Value`s. Fields are addressed with dotted
//! paths such as `fields.title.value`; arrays met along a path fan out, so a path
//! can yield several values.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Values found at `path` in `doc`.
///
/// # Examples
///
/// ```
/// use searchql::document::lookup;
/// use serde_json::json;
///
/// let doc = json!({"fields": {"tags": [{"value": "a"}, {"value": "b"}]}});
/// assert_eq!(lookup(&doc, "fields.tags.value"), vec![&json!("a"), &json!("b")]);
/// ```
pub fn lookup<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let mut out = Vec::new();
    collect(doc, &segments, &mut out);
    out
}

fn collect<'a>(value: &'a Value, segments: &[&str], out: &mut Vec<&'a Value>) {
    match (segments.split_first(), value) {
        (None, Value::Array(items)) => out.extend(items.iter()),
        (None, _) => out.push(value),
        (Some((head, rest)), Value::Object(map)) => {
            if let Some(next) = map.get(*head) {
                collect(next, rest, out);
            }
        }
        (Some(_), Value::Array(items)) => {
            for item in items {
                collect(item, segments, out);
            }
        }
        (Some(_), _) => {}
    }
}

/// Splits text into lowercase alphanumeric words.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `haystack` contains `needle` as a contiguous run.
pub fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Characters that count as part of a word at a token boundary.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `text` contains `token`, case-insensitively, where every edge of
/// `token` that is a word character sits on a word boundary.
///
/// `c++` is found in `C++ Primer` but not in `C Programming`; `?` is found in
/// any text holding a question mark.
pub fn contains_token(text: &str, token: &str) -> bool {
    let text = text.to_lowercase();
    let token = token.to_lowercase();
    let (Some(first), Some(last)) = (token.chars().next(), token.chars().next_back()) else {
        return false;
    };

    text.char_indices().any(|(start, _)| {
        if !text[start..].starts_with(&token) {
            return false;
        }
        let before = text[..start].chars().next_back();
        let after = text[start + token.len()..].chars().next();
        (!is_word_char(first) || !before.is_some_and(is_word_char))
            && (!is_word_char(last) || !after.is_some_and(is_word_char))
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Whether a stored scalar matches the given query words.
///
/// Strings match when their words contain the query words in order. Query words
/// holding punctuation (`c++`, `half-blood`, `?`) are matched as raw text with
/// [`contains_token`] instead, whitespace runs counting as one space. Numbers and
/// booleans only match a single query word denoting the same value.
pub fn scalar_matches(value: &Value, query_words: &[String]) -> bool {
    match value {
        Value::String(s) => {
            if query_words.iter().all(|w| w.chars().all(char::is_alphanumeric)) {
                let needle: Vec<String> = query_words.iter().flat_map(|w| words(w)).collect();
                contains_run(&words(s), &needle)
            } else {
                let text = s.split_whitespace().collect::<Vec<_>>().join(" ");
                contains_token(&text, &query_words.join(" "))
            }
        }
        Value::Number(n) => match query_words {
            [word] => match (parse_decimal(&n.to_string()), parse_decimal(word)) {
                (Some(stored), Some(wanted)) => stored == wanted,
                _ => false,
            },
            _ => false,
        },
        Value::Bool(b) => match query_words {
            [word] => word.eq_ignore_ascii_case(if *b { "true" } else { "false" }),
            _ => false,
        },
        _ => false,
    }
}

/// Total order over JSON values used for sorting and key comparison.
///
/// Values of different kinds order as null < bool < number < string < array <
/// object; arrays and objects compare equal among themselves.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let rank = |v: &Value| -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    };

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            match (parse_decimal(&x.to_string()), parse_decimal(&y.to_string())) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => {
                    let x = x.as_f64().unwrap_or(0.0);
                    let y = y.as_f64().unwrap_or(0.0);
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Renders an identifier value as text (`1001` and `"1001"` both give `1001`).
pub fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lookup_follows_nested_objects() {
        let doc = json!({"fields": {"title": {"value": "Harry Potter"}}, "nid": 1000});
        assert_eq!(lookup(&doc, "fields.title.value"), vec![&json!("Harry Potter")]);
        assert_eq!(lookup(&doc, "nid"), vec![&json!(1000)]);
        assert!(lookup(&doc, "fields.lead.value").is_empty());
    }

    #[test]
    fn words_are_case_folded_and_split_on_punctuation() {
        assert_eq!(words("Harry Potter, and the Half-Blood"), strings(&[
            "harry", "potter", "and", "the", "half", "blood"
        ]));
    }

    #[test]
    fn run_matching_is_contiguous() {
        let hay = strings(&["harry", "potter", "and", "ron"]);
        assert!(contains_run(&hay, &strings(&["potter", "and"])));
        assert!(!contains_run(&hay, &strings(&["harry", "ron"])));
        assert!(!contains_run(&hay, &[]));
    }

    #[test]
    fn numbers_match_by_value() {
        assert!(scalar_matches(&json!(150064), &strings(&["150064"])));
        assert!(scalar_matches(&json!(1.5), &strings(&["1.50"])));
        assert!(!scalar_matches(&json!(150064), &strings(&["15006"])));
        assert!(scalar_matches(&json!(true), &strings(&["TRUE"])));
    }

    #[test]
    fn values_order_by_kind_then_value() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!(null), &json!(0)), Ordering::Less);
        assert_eq!(compare_values(&json!(5), &json!("5")), Ordering::Less);
    }

    #[test]
    fn punctuated_tokens_keep_their_edges() {
        assert!(contains_token("C++ Primer", "c++"));
        assert!(!contains_token("The C Programming Language", "c++"));
        assert!(!contains_token("Cc++", "c++"));
        assert!(contains_token("cheese?", "?"));
        assert!(!contains_token("anything", ""));
    }

    #[test]
    fn punctuated_query_words_match_raw_text() {
        assert!(scalar_matches(&json!("The Half-Blood Prince"), &strings(&["half-blood"])));
        assert!(scalar_matches(&json!("C++  Primer"), &strings(&["c++", "primer"])));
        assert!(!scalar_matches(&json!("C Primer"), &strings(&["c++"])));
    }
}

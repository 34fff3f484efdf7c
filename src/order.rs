//! The `order` request parameter.
//!
//! Besides the plain `asc`/`desc` directions, `order` accepts an explicit
//! directive listing the identifiers that must come first:
//!
//! ```text
//! order=match(2001,1001)
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ParseError, ParseErrorKind, Position};

static MATCH_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*match\s*\(").expect("valid directive pattern"));

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid identifier pattern"));

/// Caller-supplied ordering: identifiers listed here lead the result set, in
/// this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDirective {
    ordered_keys: Vec<String>,
}

impl OrderDirective {
    /// Builds a directive, dropping repeated keys (the first occurrence wins).
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered_keys: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !ordered_keys.contains(&key) {
                ordered_keys.push(key);
            }
        }
        OrderDirective { ordered_keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.ordered_keys
    }

    /// Rank of `key` in the directive, if listed.
    pub fn rank(&self, key: &str) -> Option<usize> {
        self.ordered_keys.iter().position(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.ordered_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_keys.is_empty()
    }
}

/// Where matches not named by an [`OrderDirective`] go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Keep the store's otherwise-defined order (sort field, else insertion)
    #[default]
    Natural,
    /// Ascending by identifier
    ByKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc`/`desc` in any case; anything else is ascending.
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Parsed `order` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSpec {
    Direction(SortDirection),
    Match(OrderDirective),
}

impl OrderSpec {
    pub fn parse(param: &str) -> Result<Self, ParseError> {
        Ok(match parse_order(param)? {
            Some(directive) => OrderSpec::Match(directive),
            None => OrderSpec::Direction(SortDirection::parse(param)),
        })
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            OrderSpec::Direction(direction) => *direction,
            OrderSpec::Match(_) => SortDirection::Asc,
        }
    }

    pub fn directive(&self) -> Option<&OrderDirective> {
        match self {
            OrderSpec::Match(directive) => Some(directive),
            OrderSpec::Direction(_) => None,
        }
    }
}

fn char_offset(text: &str, byte: usize) -> Position {
    Position(text[..byte].chars().count())
}

/// Parses a `match(id, …)` directive.
///
/// Returns `Ok(None)` when `param` is not a directive at all (for example `asc`).
///
/// # Examples
///
/// ```
/// use searchql::order::parse_order;
///
/// let directive = parse_order("match(2001, 1001, 2001)").unwrap().unwrap();
/// assert_eq!(directive.keys(), ["2001", "1001"]);
/// assert!(parse_order("desc").unwrap().is_none());
/// ```
pub fn parse_order(param: &str) -> Result<Option<OrderDirective>, ParseError> {
    let Some(open) = MATCH_OPEN.find(param) else {
        return Ok(None);
    };

    let malformed = |reason: String, byte: usize| {
        ParseError::new(
            ParseErrorKind::MalformedOrder(reason),
            char_offset(param, byte),
            param,
        )
    };

    let body_start = open.end();
    let Some(close) = param[body_start..].find(')').map(|i| body_start + i) else {
        return Err(malformed("missing ')'".into(), param.len()));
    };

    let trailing = &param[close + 1..];
    if let Some(extra) = trailing.find(|c: char| !c.is_whitespace()) {
        return Err(malformed(
            "unexpected text after ')'".into(),
            close + 1 + extra,
        ));
    }

    let body = &param[body_start..close];
    if body.trim().is_empty() {
        return Err(malformed("empty identifier list".into(), body_start));
    }

    let mut keys = Vec::new();
    let mut item_start = body_start;
    for item in body.split(',') {
        let key = item.trim();
        let key_start = item_start + item.find(|c: char| !c.is_whitespace()).unwrap_or(0);

        if key.is_empty() {
            return Err(malformed("empty identifier".into(), key_start));
        }
        if !IDENTIFIER.is_match(key) {
            return Err(malformed(format!("invalid identifier {:?}", key), key_start));
        }
        keys.push(key);
        item_start += item.len() + 1;
    }

    let directive = OrderDirective::new(keys);
    debug!(order = param, keys = ?directive.keys(), "parsed order directive");
    Ok(Some(directive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_keep_first_position() {
        let directive = OrderDirective::new(["b", "a", "b", "c", "a"]);
        assert_eq!(directive.keys(), ["b", "a", "c"]);
        assert_eq!(directive.rank("c"), Some(2));
        assert_eq!(directive.rank("z"), None);
    }

    #[test]
    fn test_direction_fallback() {
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
    }

    #[test]
    fn test_offsets_are_characters() {
        let err = parse_order("match(ø,)").unwrap_err();
        assert_eq!(err.position, Position(6));

        let err = parse_order("match(1, ,2)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedOrder("empty identifier".into()));
    }
}

//! In-memory execution of compiled filters.
//!
//! [`MemoryStore`] is the reference execution collaborator: it filters, orders
//! and pages a set of JSON documents the way the content search endpoint does.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::backend::Filter;
use crate::document::{compare_values, key_text, lookup};
use crate::order::{OrderDirective, RemainderPolicy, SortDirection};

/// Sort field and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Ordering and paging of one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub order: Option<OrderDirective>,
    pub sort: Option<SortSpec>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            order: None,
            sort: None,
            skip: 0,
            limit: 10,
        }
    }
}

/// One page of matches plus the number of matches overall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub items: Vec<Value>,
    pub hits: usize,
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    documents: Vec<Value>,
    key_field: String,
    remainder: RemainderPolicy,
    max_limit: usize,
}

impl MemoryStore {
    pub fn new(documents: Vec<Value>) -> Self {
        MemoryStore {
            documents,
            key_field: "nid".to_string(),
            remainder: RemainderPolicy::default(),
            max_limit: 100,
        }
    }

    /// Field holding the identifier that order directives refer to.
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    pub fn with_remainder(mut self, policy: RemainderPolicy) -> Self {
        self.remainder = policy;
        self
    }

    /// Upper bound applied to every requested page size.
    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn insert(&mut self, document: Value) {
        self.documents.push(document);
    }

    fn key_of<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        lookup(document, &self.key_field).into_iter().next()
    }

    /// Runs `filter` and returns the requested page.
    pub fn execute(&self, filter: &Filter, options: &SearchOptions) -> SearchResult {
        let mut matches: Vec<&Value> = self
            .documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .collect();
        let hits = matches.len();

        if let Some(sort) = &options.sort {
            sort_by_field(&mut matches, sort);
        }
        if let Some(directive) = &options.order {
            self.apply_directive(&mut matches, directive);
        }

        let limit = options.limit.min(self.max_limit);
        let items: Vec<Value> = matches
            .into_iter()
            .skip(options.skip)
            .take(limit)
            .cloned()
            .collect();

        debug!(hits, returned = items.len(), skip = options.skip, limit, "executed filter");
        SearchResult { items, hits }
    }

    /// Moves the directive's documents to the front, in directive order. The
    /// rest follow according to the remainder policy. Both passes are stable.
    fn apply_directive(&self, matches: &mut [&Value], directive: &OrderDirective) {
        let rank = |doc: &Value| -> Option<usize> {
            self.key_of(doc)
                .and_then(key_text)
                .and_then(|key| directive.rank(&key))
        };

        matches.sort_by(|a, b| match (rank(*a), rank(*b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match self.remainder {
                RemainderPolicy::Natural => Ordering::Equal,
                RemainderPolicy::ByKey => match (self.key_of(*a), self.key_of(*b)) {
                    (Some(x), Some(y)) => compare_values(x, y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                },
            },
        });
    }
}

/// Stable sort; documents without the field go last in either direction.
fn sort_by_field(matches: &mut [&Value], sort: &SortSpec) {
    matches.sort_by(|a, b| {
        let a_val = lookup(a, &sort.field).into_iter().next();
        let b_val = lookup(b, &sort.field).into_iter().next();

        match (a_val, b_val) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ordering = compare_values(x, y);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nids(result: &SearchResult) -> Vec<i64> {
        result
            .items
            .iter()
            .map(|doc| doc["nid"].as_i64().unwrap())
            .collect()
    }

    fn everything() -> Filter {
        Filter::And(vec![])
    }

    #[test]
    fn test_sort_stable_with_missing_last() {
        let store = MemoryStore::new(vec![
            json!({"nid": 1, "rank": 3}),
            json!({"nid": 2}),
            json!({"nid": 3, "rank": 1}),
            json!({"nid": 4, "rank": 3}),
        ]);
        let options = SearchOptions {
            sort: Some(SortSpec::desc("rank")),
            ..Default::default()
        };
        assert_eq!(nids(&store.execute(&everything(), &options)), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_paging_after_ordering() {
        let store = MemoryStore::new((1..=5).map(|n| json!({"nid": n})).collect());
        let options = SearchOptions {
            order: Some(OrderDirective::new(["5"])),
            skip: 1,
            limit: 2,
            ..Default::default()
        };
        let result = store.execute(&everything(), &options);
        assert_eq!(result.hits, 5);
        assert_eq!(nids(&result), vec![1, 2]);
    }

    #[test]
    fn test_limit_is_capped() {
        let store = MemoryStore::new((1..=5).map(|n| json!({"nid": n})).collect()).with_max_limit(3);
        let options = SearchOptions {
            limit: 999,
            ..Default::default()
        };
        assert_eq!(store.execute(&everything(), &options).items.len(), 3);
    }
}

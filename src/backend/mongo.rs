//! MongoDB filter documents.
//!
//! Words become case-insensitive, word-bounded `$regex` clauses; exclusions
//! become `$nor`. A word is only bounded on an edge that is a word character,
//! so `c++` becomes `\bc\+\+`.

use serde_json::{Map, Value, json};

use super::Schema;
use crate::document::is_word_char;
use crate::error::TranslationError;
use crate::walker::{Scope, TreeWalker};

/// Lowers queries into MongoDB filter documents.
pub struct MongoWalker<'s> {
    schema: &'s Schema,
}

impl<'s> MongoWalker<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        MongoWalker { schema }
    }

    fn regex_clause(&self, scope: Scope<'_>, pattern: String) -> Value {
        let mut clauses: Vec<Value> = self
            .schema
            .fields_for(scope)
            .into_iter()
            .map(|field| {
                let mut clause = Map::new();
                clause.insert(field, json!({"$regex": pattern, "$options": "i"}));
                Value::Object(clause)
            })
            .collect();

        match clauses.len() {
            // No field to search matches nothing, as with `Filter`
            0 => json!({ "$expr": false }),
            1 => clauses.swap_remove(0),
            _ => json!({ "$or": clauses }),
        }
    }
}

/// Case-insensitive pattern for `words` separated by whitespace.
fn word_pattern<S: AsRef<str>>(words: &[S]) -> String {
    let body = words
        .iter()
        .map(|w| regex::escape(w.as_ref()))
        .collect::<Vec<_>>()
        .join(r"\s+");
    let first = words.first().and_then(|w| w.as_ref().chars().next());
    let last = words.last().and_then(|w| w.as_ref().chars().next_back());

    let mut pattern = String::new();
    if first.is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&body);
    if last.is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

impl TreeWalker for MongoWalker<'_> {
    type Predicate = Value;

    fn visit_field_scoped(&mut self, field: &str) -> Result<String, TranslationError> {
        self.schema.resolve(field)
    }

    fn visit_term(&mut self, scope: Scope<'_>, word: &str) -> Value {
        self.regex_clause(scope, word_pattern(&[word]))
    }

    fn visit_phrase(&mut self, scope: Scope<'_>, words: &[String]) -> Value {
        self.regex_clause(scope, word_pattern(words))
    }

    fn visit_exclusion(&mut self, inner: Value) -> Value {
        json!({ "$nor": [inner] })
    }

    fn visit_and(&mut self, children: Vec<Value>) -> Value {
        json!({ "$and": children })
    }

    fn visit_or(&mut self, children: Vec<Value>) -> Value {
        json!({ "$or": children })
    }
}

//! In-process document filter.
//!
//! [`DocumentFilterWalker`] lowers a query into a [`Filter`], which is evaluated
//! directly against JSON documents by [`Filter::matches`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Schema;
use crate::document::{lookup, scalar_matches};
use crate::error::TranslationError;
use crate::walker::{Scope, TreeWalker};

/// Composite predicate over JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Filter {
    /// Any of `fields` contains (or, for scalars, equals) `word`
    Contains { fields: Vec<String>, word: String },

    /// Any of `fields` contains `words` as an exact ordered run
    Sequence { fields: Vec<String>, words: Vec<String> },

    Not(Box<Filter>),

    And(Vec<Filter>),

    Or(Vec<Filter>),
}

impl Filter {
    /// Checks if a document matches the filter
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::Contains { fields, word } => {
                Self::any_field(document, fields, std::slice::from_ref(word))
            }
            Filter::Sequence { fields, words } => Self::any_field(document, fields, words),
            Filter::Not(inner) => !inner.matches(document),
            Filter::And(children) => children.iter().all(|c| c.matches(document)),
            Filter::Or(children) => children.iter().any(|c| c.matches(document)),
        }
    }

    fn any_field(document: &Value, fields: &[String], words: &[String]) -> bool {
        fields.iter().any(|field| {
            lookup(document, field)
                .into_iter()
                .any(|value| scalar_matches(value, words))
        })
    }
}

/// Lowers queries into [`Filter`]s.
pub struct DocumentFilterWalker<'s> {
    schema: &'s Schema,
}

impl<'s> DocumentFilterWalker<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        DocumentFilterWalker { schema }
    }
}

impl TreeWalker for DocumentFilterWalker<'_> {
    type Predicate = Filter;

    fn visit_field_scoped(&mut self, field: &str) -> Result<String, TranslationError> {
        self.schema.resolve(field)
    }

    fn visit_term(&mut self, scope: Scope<'_>, word: &str) -> Filter {
        Filter::Contains {
            fields: self.schema.fields_for(scope),
            word: word.to_string(),
        }
    }

    fn visit_phrase(&mut self, scope: Scope<'_>, words: &[String]) -> Filter {
        Filter::Sequence {
            fields: self.schema.fields_for(scope),
            words: words.to_vec(),
        }
    }

    fn visit_exclusion(&mut self, inner: Filter) -> Filter {
        Filter::Not(Box::new(inner))
    }

    fn visit_and(&mut self, children: Vec<Filter>) -> Filter {
        Filter::And(children)
    }

    fn visit_or(&mut self, children: Vec<Filter>) -> Filter {
        Filter::Or(children)
    }
}

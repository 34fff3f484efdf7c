//! Storage backends for compiled queries.
//!
//! Each backend is a [`TreeWalker`](crate::walker::TreeWalker):
//!
//! - [`filter`] lowers into [`Filter`], evaluated in process against JSON documents
//! - [`mongo`] lowers into a MongoDB filter document

pub mod filter;
pub mod mongo;

use std::collections::BTreeMap;

use crate::error::TranslationError;
use crate::walker::Scope;

pub use filter::{DocumentFilterWalker, Filter};
pub use mongo::MongoWalker;

/// Field layout of the searched documents, shared by all backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    default_fields: Vec<String>,
    aliases: BTreeMap<String, String>,
    strict: bool,
}

impl Schema {
    /// Searches unscoped words in `default_fields`. With none, unscoped words
    /// match nothing.
    pub fn new<I, S>(default_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema {
            default_fields: default_fields.into_iter().map(Into::into).collect(),
            aliases: BTreeMap::new(),
            strict: false,
        }
    }

    /// Maps the query-level field `name` to the document path `path`.
    pub fn with_alias(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), path.into());
        self
    }

    /// Rejects fields that are neither aliases nor known document paths.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn default_fields(&self) -> &[String] {
        &self.default_fields
    }

    /// Resolves a query-level field name to a document path.
    pub fn resolve(&self, field: &str) -> Result<String, TranslationError> {
        if let Some(path) = self.aliases.get(field) {
            return Ok(path.clone());
        }

        let known = self.default_fields.iter().any(|f| f == field)
            || self.aliases.values().any(|path| path == field);
        if self.strict && !known {
            return Err(TranslationError::UnknownField {
                field: field.to_string(),
            });
        }
        Ok(field.to_string())
    }

    /// Document paths a leaf in `scope` applies to.
    pub fn fields_for(&self, scope: Scope<'_>) -> Vec<String> {
        match scope {
            Scope::Default => self.default_fields.clone(),
            Scope::Field(field) => vec![field.to_string()],
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::new(["fields.title.value", "fields.body.value"])
            .with_alias("title", "fields.title.value")
            .with_alias("body", "fields.body.value")
    }
}

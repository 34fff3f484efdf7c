//! Search configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! default_fields = ["fields.title.value", "fields.body.value"]
//! strict_fields = false
//! key_field = "nid"
//! default_limit = 10
//! max_limit = 100
//! remainder = "natural"
//!
//! [field_aliases]
//! title = "fields.title.value"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::Schema;
use crate::error::ConfigError;
use crate::order::RemainderPolicy;
use crate::store::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Document paths searched by unscoped words and phrases
    pub default_fields: Vec<String>,

    /// Query-level field names mapped to document paths
    pub field_aliases: BTreeMap<String, String>,

    /// Reject `field:` scopes that are neither aliases nor known paths
    pub strict_fields: bool,

    /// Identifier field used by `match(...)` order directives
    pub key_field: String,

    /// Page size when the request gives none
    pub default_limit: usize,

    /// Upper bound on any requested page size
    pub max_limit: usize,

    /// Placement of matches not named by an order directive
    pub remainder: RemainderPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_fields: vec!["fields.title.value".into(), "fields.body.value".into()],
            field_aliases: BTreeMap::from([
                ("title".to_string(), "fields.title.value".to_string()),
                ("body".to_string(), "fields.body.value".to_string()),
            ]),
            strict_fields: false,
            key_field: "nid".into(),
            default_limit: 10,
            max_limit: 100,
            remainder: RemainderPolicy::Natural,
        }
    }
}

impl SearchConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: SearchConfig = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_fields.is_empty() {
            return Err(ConfigError::Invalid(
                "default_fields must name at least one field".into(),
            ));
        }
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("max_limit must be at least 1".into()));
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "default_limit ({}) exceeds max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }

    pub fn schema(&self) -> Schema {
        self.field_aliases
            .iter()
            .fold(Schema::new(self.default_fields.iter().cloned()), |schema, (name, path)| {
                schema.with_alias(name.clone(), path.clone())
            })
            .strict(self.strict_fields)
    }

    /// A store over `documents` using this key field, remainder policy and limit.
    pub fn store(&self, documents: Vec<serde_json::Value>) -> MemoryStore {
        MemoryStore::new(documents)
            .with_key_field(self.key_field.clone())
            .with_remainder(self.remainder)
            .with_max_limit(self.max_limit)
    }
}

//! CLI support for searchql
//!
//! Provides programmatic access to the `searchql` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod docs;
mod search;

pub use check::{Backend, CheckOptions, CheckResult, execute_check, execute_order};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use search::{SearchCommand, execute_search};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Query error: {0}")]
    Query(#[from] crate::Error),

    #[error("Config error: {0}")]
    Config(#[from] crate::ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe a JSON array of documents to stdin.")]
    NoInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown category: '{0}'\nRun 'searchql docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}

/// Serializes `value` as compact or pretty JSON.
pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

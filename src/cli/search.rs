//! Run queries against a JSON array of documents

use serde_json::Value;

use super::CliError;
use crate::{Compiler, SearchConfig, SearchRequest, SearchResult};

/// Options for the search command
#[derive(Debug, Clone, Default)]
pub struct SearchCommand {
    pub query: String,
    /// JSON array of documents
    pub input: Option<String>,
    pub order: Option<String>,
    pub sort: Option<String>,
    pub skip: usize,
    pub limit: Option<usize>,
}

/// Execute a search over the documents in `command.input`
pub fn execute_search(
    config: &SearchConfig,
    command: &SearchCommand,
) -> Result<SearchResult, CliError> {
    let json_str = command.input.as_ref().ok_or(CliError::NoInput)?;

    let documents = match serde_json::from_str::<Value>(json_str)? {
        Value::Array(documents) => documents,
        other => {
            return Err(CliError::InvalidInput(format!(
                "expected a JSON array of documents, got {}",
                kind_of(&other)
            )));
        }
    };

    let compiler = Compiler::new(config);
    let store = config.store(documents);
    let request = SearchRequest {
        query: &command.query,
        order: command.order.as_deref(),
        sort: command.sort.as_deref(),
        skip: command.skip,
        limit: command.limit,
    };
    Ok(compiler.search(&store, &request)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

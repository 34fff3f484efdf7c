//! Compile queries and show what each backend receives

use serde::Serialize;
use serde_json::Value;

use super::CliError;
use crate::{Compiler, DocumentFilterWalker, MongoWalker, OrderDirective, lower, parse_order, render};

/// Backend a query is lowered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// In-process document filter
    #[default]
    Filter,
    /// MongoDB filter document
    Mongo,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The search query to compile
    pub query: String,
    pub backend: Backend,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Canonical rendering of the syntax tree
    pub tree: String,
    /// The lowered predicate, as JSON
    pub predicate: Value,
}

/// Compile a query and lower it for the selected backend
pub fn execute_check(compiler: &Compiler, options: &CheckOptions) -> Result<CheckResult, CliError> {
    let node = compiler.compile(&options.query)?;

    let predicate = match options.backend {
        Backend::Filter => {
            let mut walker = DocumentFilterWalker::new(compiler.schema());
            let filter = lower(&node, &mut walker).map_err(crate::Error::from)?;
            serde_json::to_value(filter)?
        }
        Backend::Mongo => {
            let mut walker = MongoWalker::new(compiler.schema());
            lower(&node, &mut walker).map_err(crate::Error::from)?
        }
    };

    Ok(CheckResult {
        tree: render(&node),
        predicate,
    })
}

/// Parse an `order` parameter; `None` means it carries no `match(...)` directive
pub fn execute_order(param: &str) -> Result<Option<OrderDirective>, CliError> {
    Ok(parse_order(param)?)
}

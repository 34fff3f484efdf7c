//! Query compilation entry points.
//!
//! [`compile`] turns query text into a [`Node`]; [`Compiler`] adds a schema so the
//! tree can be lowered into either backend and run against a [`MemoryStore`].

use serde_json::Value;
use tracing::debug;

use crate::ast::Node;
use crate::backend::filter::{DocumentFilterWalker, Filter};
use crate::backend::mongo::MongoWalker;
use crate::backend::Schema;
use crate::config::SearchConfig;
use crate::error::{Error, ParseError};
use crate::lexer::Lexer;
use crate::order::OrderSpec;
use crate::parser::Parser;
use crate::store::{MemoryStore, SearchOptions, SearchResult, SortSpec};
use crate::walker::lower;

/// Compiles query text into a syntax tree.
///
/// # Examples
///
/// ```
/// use searchql::compile;
///
/// let tree = compile("harry potter -150064").unwrap();
/// assert_eq!(tree.to_string(), "and(or(harry, potter), not(150064))");
/// ```
pub fn compile(query: &str) -> Result<Node, Error> {
    let mut parser = Parser::new(Lexer::new(query))?;
    let node = parser.parse()?;
    debug!(query, tree = %node, "compiled query");
    Ok(node)
}

/// Paging and ordering of a [`Compiler::search`] call, in request form.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    /// Raw `order` parameter: `asc`, `desc` or `match(id, ...)`
    pub order: Option<&'a str>,
    /// Field to sort by before the order directive is applied
    pub sort: Option<&'a str>,
    pub skip: usize,
    pub limit: Option<usize>,
}

/// Compiles queries against a fixed schema.
///
/// Holds no per-query state, so one instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    schema: Schema,
    default_limit: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(&SearchConfig::default())
    }
}

impl Compiler {
    pub fn new(config: &SearchConfig) -> Self {
        Compiler {
            schema: config.schema(),
            default_limit: config.default_limit,
        }
    }

    pub fn with_schema(schema: Schema) -> Self {
        Compiler {
            schema,
            default_limit: SearchConfig::default().default_limit,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn compile(&self, query: &str) -> Result<Node, Error> {
        compile(query)
    }

    /// Compiles `query` into an in-process [`Filter`].
    pub fn to_filter(&self, query: &str) -> Result<Filter, Error> {
        let node = self.compile(query)?;
        let filter = lower(&node, &mut DocumentFilterWalker::new(&self.schema))?;
        Ok(filter)
    }

    /// Compiles `query` into a MongoDB filter document.
    pub fn to_mongo(&self, query: &str) -> Result<Value, Error> {
        let node = self.compile(query)?;
        let filter = lower(&node, &mut MongoWalker::new(&self.schema))?;
        debug!(query, filter = %filter, "lowered query for mongo");
        Ok(filter)
    }

    /// Builds the store options for a request. Only the `order` parameter can
    /// fail here.
    pub fn options(&self, request: &SearchRequest<'_>) -> Result<SearchOptions, ParseError> {
        let spec = request.order.map(OrderSpec::parse).transpose()?;

        let sort = request.sort.map(|field| SortSpec {
            field: field.to_string(),
            direction: spec.as_ref().map(OrderSpec::direction).unwrap_or_default(),
        });

        Ok(SearchOptions {
            order: spec.as_ref().and_then(OrderSpec::directive).cloned(),
            sort,
            skip: request.skip,
            limit: request.limit.unwrap_or(self.default_limit),
        })
    }

    /// Compiles, lowers and executes a request against `store`.
    pub fn search(
        &self,
        store: &MemoryStore,
        request: &SearchRequest<'_>,
    ) -> Result<SearchResult, Error> {
        let filter = self.to_filter(request.query)?;
        let options = self.options(request)?;
        Ok(store.execute(&filter, &options))
    }
}

pub mod ast;
pub mod backend;
pub mod compiler;
pub mod config;
pub mod document;
pub mod error;
pub mod lexer;
pub mod order;
pub mod output;
pub mod parser;
pub mod store;
pub mod walker;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Node, Spanned, Token};
pub use backend::{DocumentFilterWalker, Filter, MongoWalker, Schema};
pub use compiler::{Compiler, SearchRequest, compile};
pub use config::SearchConfig;
pub use error::{
    ConfigError, Error, LexError, LexErrorKind, ParseError, ParseErrorKind, Position,
    TranslationError,
};
pub use lexer::Lexer;
pub use order::{OrderDirective, OrderSpec, RemainderPolicy, SortDirection, parse_order};
pub use output::render;
pub use parser::Parser;
pub use store::{MemoryStore, SearchOptions, SearchResult, SortSpec};
pub use walker::{Scope, TreeWalker, lower};

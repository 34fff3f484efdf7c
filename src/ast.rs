//! # Search Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the syntax tree of the search query
//! language accepted by the content search endpoint.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[node]** - The compiled, backend-agnostic query tree
//!
//! The tree never refers to a storage backend. Backends consume it through the
//! [`TreeWalker`](crate::walker::TreeWalker) trait.
//!
//! ## Quick Start
//!
//! ```text
//! harry potter -150064
//! ```
//!
//! Finds documents mentioning either `harry` or `potter`, but not `150064`.
//!
//! ## Syntax
//!
//! | Query                  | Meaning                                   |
//! |------------------------|-------------------------------------------|
//! | `harry`                | default fields contain the word           |
//! | `harry potter`         | either word (adjacency is OR)             |
//! | `"harry potter"`       | the exact phrase, in order                |
//! | `-150064`              | must not contain the word                 |
//! | `+harry potter`        | must contain `harry`                      |
//! | `harry AND potter`     | both words                                |
//! | `harry OR potter`      | either word                               |
//! | `title:harry`          | restrict to the `title` field             |
//! | `(harry OR ron) -film` | grouping                                  |
//!
//! ## Precedence
//!
//! From loosest to tightest: `OR`, adjacency, `AND`, prefixes (`-`, `+`),
//! field scope and groups.
//!
//! ```text
//! a b AND c     =>  or(a, and(b, c))
//! a OR b c      =>  or(a, or(b, c))
//! ```
pub mod node;
pub mod tokens;

pub use node::Node;
pub use tokens::{Spanned, Token};

//! Error types for the query compiler.
//!
//! Lexing and parsing failures carry the original query text and the character
//! offset of the failure so that callers can log them and hand them back to
//! clients unchanged. Lowering failures are backend dependent and only carry the
//! offending field name.

use std::fmt;

use thiserror::Error;

/// Character offset into the original query (or order parameter) string.
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub usize);

impl Position {
    pub fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What went wrong while splitting a query into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated phrase")]
    UnterminatedPhrase,

    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Error raised by the [`Lexer`](crate::lexer::Lexer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {position} in query {query:?}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
    pub query: String,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position, query: impl Into<String>) -> Self {
        LexError {
            kind,
            position,
            query: query.into(),
        }
    }
}

/// What went wrong while building the syntax tree or reading an order directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected {0}")]
    UnexpectedToken(String),

    /// A `-`, `+`, field prefix or keyword with nothing to apply to.
    #[error("missing operand after {0}")]
    MissingOperand(String),

    #[error("empty group")]
    EmptyGroup,

    #[error("unclosed group")]
    UnclosedGroup,

    #[error("exclusion of an exclusion")]
    DoubleExclusion,

    #[error("empty phrase")]
    EmptyPhrase,

    #[error("empty query")]
    EmptyQuery,

    /// Groups and field scopes nested deeper than the parser allows.
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("malformed order directive: {0}")]
    MalformedOrder(String),
}

/// Error raised by the [`Parser`](crate::parser::Parser) and by
/// [`parse_order`](crate::order::parse_order).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {position} in query {query:?}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub query: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position, query: impl Into<String>) -> Self {
        ParseError {
            kind,
            position,
            query: query.into(),
        }
    }
}

/// Error raised while lowering a syntax tree into a backend predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("unknown field {field:?}")]
    UnknownField { field: String },
}

/// Error raised while loading or validating a [`SearchConfig`](crate::config::SearchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Any failure of the compile-then-lower pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl Error {
    /// Offset of the failure in the query, when the failure has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex(e) => Some(e.position),
            Error::Parse(e) => Some(e.position),
            Error::Translation(_) => None,
        }
    }
}

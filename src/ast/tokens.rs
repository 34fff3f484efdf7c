use std::fmt;

use crate::error::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare word
    ///
    /// # Examples
    /// ```text
    /// harry
    /// 150064
    /// foo-bar
    /// ```
    Word(String),

    /// Quoted text, kept verbatim (inner whitespace included)
    ///
    /// # Examples
    /// ```text
    /// "harry potter"
    /// ```
    Phrase(String),

    /// Exclusion prefix, bound to the operand that immediately follows
    ///
    /// # Examples
    /// ```text
    /// -150064
    /// -"half blood"
    /// ```
    Exclude,

    /// Requirement prefix, bound to the operand that immediately follows
    ///
    /// # Examples
    /// ```text
    /// +harry
    /// ```
    Require,

    /// Field scope for the operand that follows; the colon is consumed
    ///
    /// # Examples
    /// ```text
    /// title:harry
    /// type:"os"
    /// ```
    Field(String),

    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// `AND` keyword (any letter case)
    And,

    /// `OR` keyword (any letter case)
    Or,

    /// End of input
    Eof,
}

impl Token {
    /// Whether the token can start a primary operand.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Word(_) | Token::Phrase(_) | Token::Field(_) | Token::LParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "word {:?}", w),
            Token::Phrase(p) => write!(f, "phrase {:?}", p),
            Token::Exclude => write!(f, "'-'"),
            Token::Require => write!(f, "'+'"),
            Token::Field(name) => write!(f, "field '{}:'", name),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::Eof => write!(f, "end of query"),
        }
    }
}

/// A token together with the offset of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}

impl Spanned {
    pub fn new(token: Token, position: Position) -> Self {
        Spanned { token, position }
    }
}

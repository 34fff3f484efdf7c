use tracing::trace;

use crate::ast::{Spanned, Token};
use crate::error::{LexError, LexErrorKind, Position};

pub struct Lexer {
    source: String,
    input: Vec<char>,
    position: usize,
}

fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !ch.is_control() && !matches!(ch, '"' | '(' | ')')
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            source: input.to_string(),
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// The query being tokenized, as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, kind: LexErrorKind, at: usize) -> LexError {
        LexError::new(kind, Position(at), self.source.clone())
    }

    /// Reads a bare word. A colon ending a non-empty word turns it into a field
    /// name; `AND`/`OR` in any case become keywords.
    fn read_word(&mut self) -> Token {
        let mut result = String::new();

        while let Some(ch) = self.current_char() {
            if ch == ':' && !result.is_empty() {
                self.advance(); // Consume ':'
                return Token::Field(result);
            }
            if !is_word_char(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }

        if result.eq_ignore_ascii_case("and") {
            Token::And
        } else if result.eq_ignore_ascii_case("or") {
            Token::Or
        } else {
            Token::Word(result)
        }
    }

    fn read_phrase(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some(escaped) => {
                            result.push(escaped);
                            self.advance();
                        }
                        None => break,
                    }
                }
                c if c.is_control() && !c.is_whitespace() => {
                    return Err(self.error(LexErrorKind::InvalidCharacter(c), self.position));
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.error(LexErrorKind::UnterminatedPhrase, start))
    }

    /// Next token with the offset of its first character.
    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some('-') => {
                self.advance();
                Token::Exclude
            }
            Some('+') => {
                self.advance();
                Token::Require
            }
            Some('"') => Token::Phrase(self.read_phrase()?),
            Some(ch) if ch.is_control() => {
                return Err(self.error(LexErrorKind::InvalidCharacter(ch), start));
            }
            Some(_) => self.read_word(),
        };

        trace!(offset = start, token = %token, "lexed token");
        Ok(Spanned::new(token, Position(start)))
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_spanned().map(|spanned| spanned.token)
    }

    /// Tokenizes the whole input. The last element is always [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_spanned()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and OR And or");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_mixed_query() {
    let mut lexer = Lexer::new("title:(harry -\"half blood\") +potter");
    assert_eq!(lexer.next_token().unwrap(), Token::Field("title".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Word("harry".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Exclude);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Phrase("half blood".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Require);
    assert_eq!(lexer.next_token().unwrap(), Token::Word("potter".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

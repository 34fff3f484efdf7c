use std::mem;

use crate::{
    ast::{Node, Spanned, Token},
    error::{LexError, ParseError, ParseErrorKind, Position},
    lexer::Lexer,
};

/// How an operand takes part in its adjacency sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occur {
    /// Unprefixed; joins the sequence's OR group
    Should,
    /// `+` prefixed
    Must,
    /// `-` prefixed
    MustNot,
}

/// Deepest allowed nesting of groups and field scopes.
pub const MAX_NESTING: usize = 128;

pub struct Parser {
    source: String,
    tokens: Vec<Spanned>,
    index: usize,
    end: Spanned,
    depth: usize,
}

impl Parser {
    /// Tokenizes the whole query up front, so a parse never starts on input the
    /// lexer would reject.
    pub fn new(lexer: Lexer) -> Result<Self, LexError> {
        let source = lexer.source().to_string();
        let end = Spanned::new(Token::Eof, Position(source.chars().count()));
        let tokens = lexer.tokenize()?;
        Ok(Parser {
            source,
            tokens,
            index: 0,
            end,
            depth: 0,
        })
    }

    fn current(&self) -> &Spanned {
        self.tokens.get(self.index).unwrap_or(&self.end)
    }

    fn advance(&mut self) -> Spanned {
        match self.tokens.get_mut(self.index) {
            Some(spanned) if spanned.token != Token::Eof => {
                self.index += 1;
                Spanned::new(mem::replace(&mut spanned.token, Token::Eof), spanned.position)
            }
            _ => self.end.clone(),
        }
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current().token) == mem::discriminant(token)
    }

    fn error(&self, kind: ParseErrorKind, position: Position) -> ParseError {
        ParseError::new(kind, position, self.source.clone())
    }

    fn unexpected(&self) -> ParseError {
        let current = self.current();
        self.error(
            ParseErrorKind::UnexpectedToken(current.token.to_string()),
            current.position,
        )
    }

    fn starts_item(&self) -> bool {
        let token = &self.current().token;
        token.starts_operand() || matches!(token, Token::Exclude | Token::Require)
    }

    /// A prefix (`-`, `+`, `field:`) must be glued to the operand that follows.
    fn expect_bound(&self, prefix: Position, width: usize, label: &str) -> Result<(), ParseError> {
        let next = self.current();
        if !next.token.starts_operand() || next.position.0 != prefix.0 + width {
            return Err(self.error(ParseErrorKind::MissingOperand(label.to_string()), prefix));
        }
        Ok(())
    }

    /// Enters a group or field scope opened at `at`.
    fn descend(&mut self, at: Position) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error(ParseErrorKind::NestingTooDeep(MAX_NESTING), at));
        }
        Ok(())
    }

    /// Parse primary operands: words, phrases, field scopes and groups
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let Spanned { token, position } = self.advance();

        match token {
            Token::Word(word) => Ok(Node::Term(word)),

            Token::Phrase(text) => {
                let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
                if words.is_empty() {
                    return Err(self.error(ParseErrorKind::EmptyPhrase, position));
                }
                Ok(Node::Phrase(words))
            }

            Token::Field(name) => {
                let label = format!("field '{}:'", name);
                self.expect_bound(position, name.chars().count() + 1, &label)?;
                self.descend(position)?;
                let inner = self.parse_primary()?;
                self.depth -= 1;
                Ok(Node::field(name, inner))
            }

            Token::LParen => {
                if self.check(&Token::RParen) {
                    return Err(self.error(ParseErrorKind::EmptyGroup, position));
                }
                if self.check(&Token::Eof) {
                    return Err(self.error(ParseErrorKind::UnclosedGroup, position));
                }
                self.descend(position)?;
                let inner = self.parse_or()?;
                if self.check(&Token::RParen) {
                    self.advance();
                    self.depth -= 1;
                    Ok(inner)
                } else if self.check(&Token::Eof) {
                    Err(self.error(ParseErrorKind::UnclosedGroup, position))
                } else {
                    Err(self.unexpected())
                }
            }

            token => Err(self.error(
                ParseErrorKind::UnexpectedToken(token.to_string()),
                position,
            )),
        }
    }

    /// Parse an operand with its optional `-`/`+` prefix
    fn parse_unary(&mut self) -> Result<(Occur, Node), ParseError> {
        if self.check(&Token::Exclude) {
            let marker = self.advance().position;
            let next = self.current();
            if next.token == Token::Exclude && next.position.0 == marker.0 + 1 {
                return Err(self.error(ParseErrorKind::DoubleExclusion, marker));
            }
            self.expect_bound(marker, 1, "'-'")?;
            let operand = self.parse_primary()?;
            if operand.is_exclusion() {
                return Err(self.error(ParseErrorKind::DoubleExclusion, marker));
            }
            Ok((Occur::MustNot, Node::exclusion(operand)))
        } else if self.check(&Token::Require) {
            let marker = self.advance().position;
            self.expect_bound(marker, 1, "'+'")?;
            Ok((Occur::Must, self.parse_primary()?))
        } else {
            Ok((Occur::Should, self.parse_primary()?))
        }
    }

    /// Parse operands joined by explicit `AND`
    fn parse_conjunction(&mut self) -> Result<(Occur, Node), ParseError> {
        let first = self.parse_unary()?;
        if !self.check(&Token::And) {
            return Ok(first);
        }

        let mut children = vec![first.1];
        while self.check(&Token::And) {
            let keyword = self.advance().position;
            if !self.starts_item() {
                return Err(self.error(ParseErrorKind::MissingOperand("AND".into()), keyword));
            }
            children.push(self.parse_unary()?.1);
        }
        Ok((Occur::Should, Node::And(children)))
    }

    /// Parse adjacent operands.
    ///
    /// Unprefixed operands form one OR group; `+` and `-` operands are joined to
    /// that group by AND, keeping the order in which each first appeared. A group
    /// or field scope that only excludes, like `(-x)`, counts as `-`.
    fn parse_sequence(&mut self) -> Result<Node, ParseError> {
        if !self.starts_item() {
            return Err(self.unexpected());
        }

        // Slot in `conjuncts` reserved for the OR group, once one is seen.
        let mut group_slot: Option<usize> = None;
        let mut optional = Vec::new();
        let mut conjuncts: Vec<Option<Node>> = Vec::new();

        while self.starts_item() {
            let (occur, node) = self.parse_conjunction()?;
            match occur {
                Occur::Should if is_negation(&node) => conjuncts.push(Some(node)),
                Occur::Should => {
                    if group_slot.is_none() {
                        group_slot = Some(conjuncts.len());
                        conjuncts.push(None);
                    }
                    optional.push(node);
                }
                Occur::Must | Occur::MustNot => conjuncts.push(Some(node)),
            }
        }

        if let Some(slot) = group_slot {
            conjuncts[slot] = Some(join(optional, Node::Or));
        }
        Ok(join(conjuncts.into_iter().flatten().collect(), Node::And))
    }

    /// Parse sequences joined by explicit `OR`
    fn parse_or(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.parse_sequence()?];

        while self.check(&Token::Or) {
            let keyword = self.advance().position;
            if !self.starts_item() {
                return Err(self.error(ParseErrorKind::MissingOperand("OR".into()), keyword));
            }
            children.push(self.parse_sequence()?);
        }
        Ok(join(children, Node::Or))
    }

    /// Parse a complete query. Nothing is returned unless the whole input is
    /// consumed.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        if self.check(&Token::Eof) {
            return Err(self.error(ParseErrorKind::EmptyQuery, self.current().position));
        }

        let node = self.parse_or()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected());
        }
        Ok(node)
    }
}

/// Whether `node` is an exclusion, possibly under field scopes.
fn is_negation(node: &Node) -> bool {
    match node {
        Node::Exclusion(_) => true,
        Node::FieldScoped { inner, .. } => is_negation(inner),
        _ => false,
    }
}

/// Builds a combinator over `children`, collapsing a single child.
/// `children` is never empty here.
fn join(mut children: Vec<Node>, build: fn(Vec<Node>) -> Node) -> Node {
    if children.len() == 1 {
        children.swap_remove(0)
    } else {
        build(children)
    }
}

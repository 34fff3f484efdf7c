/// Compiled search query.
///
/// A `Node` is an owned tree: every child belongs to exactly one parent and the
/// tree is never mutated after the parser returns it. Equality is structural
/// and order sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A single bare word
    ///
    /// # Example
    /// ```text
    /// harry
    /// ```
    Term(String),

    /// Quoted words, matched as an exact ordered sequence
    ///
    /// # Example
    /// ```text
    /// "harry potter"   // Phrase(["harry", "potter"])
    /// ```
    Phrase(Vec<String>),

    /// Restricts the inner query to one field
    ///
    /// # Example
    /// ```text
    /// title:harry
    /// ```
    FieldScoped { field: String, inner: Box<Node> },

    /// Documents that do NOT match the inner query.
    ///
    /// The inner node is never itself an `Exclusion`.
    Exclusion(Box<Node>),

    /// All children must match (at least two children)
    And(Vec<Node>),

    /// Any child may match (at least two children)
    Or(Vec<Node>),
}

impl Node {
    pub fn term(word: impl Into<String>) -> Self {
        Node::Term(word.into())
    }

    pub fn phrase<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Phrase(words.into_iter().map(Into::into).collect())
    }

    pub fn field(field: impl Into<String>, inner: Node) -> Self {
        Node::FieldScoped {
            field: field.into(),
            inner: Box::new(inner),
        }
    }

    pub fn exclusion(inner: Node) -> Self {
        Node::Exclusion(Box::new(inner))
    }

    /// Conjunction of `children`; a single child is returned unchanged.
    ///
    /// Returns `None` for an empty list.
    pub fn and(mut children: Vec<Node>) -> Option<Self> {
        match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(Node::And(children)),
        }
    }

    /// Disjunction of `children`; a single child is returned unchanged.
    ///
    /// Returns `None` for an empty list.
    pub fn or(mut children: Vec<Node>) -> Option<Self> {
        match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(Node::Or(children)),
        }
    }

    /// Direct children, in order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Term(_) | Node::Phrase(_) => Vec::new(),
            Node::FieldScoped { inner, .. } | Node::Exclusion(inner) => vec![inner.as_ref()],
            Node::And(children) | Node::Or(children) => children.iter().collect(),
        }
    }

    pub fn is_exclusion(&self) -> bool {
        matches!(self, Node::Exclusion(_))
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// Every word mentioned by the query, in reading order.
    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_words(&mut out);
        out
    }

    fn collect_words<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Term(w) => out.push(w),
            Node::Phrase(ws) => out.extend(ws.iter().map(String::as_str)),
            _ => {
                for child in self.children() {
                    child.collect_words(out);
                }
            }
        }
    }
}

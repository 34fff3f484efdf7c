//! Canonical text rendering of compiled queries.
//!
//! The rendering is an s-expression over the tree, stable across runs, and is
//! what the compiler logs and what the CLI prints:
//!
//! ```
//! use searchql::{compile, output::render};
//!
//! let tree = compile("title:\"harry potter\" -film").unwrap();
//! assert_eq!(render(&tree), r#"and(title:"harry potter", not(film))"#);
//! ```

use std::fmt::{self, Write};

use crate::ast::Node;

pub struct TreePrinter<'w, W: Write> {
    out: &'w mut W,
}

impl<'w, W: Write> TreePrinter<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        TreePrinter { out }
    }

    pub fn print(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Term(word) => self.out.write_str(word),
            Node::Phrase(words) => {
                self.out.write_char('"')?;
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        self.out.write_char(' ')?;
                    }
                    self.escape(word)?;
                }
                self.out.write_char('"')
            }
            Node::FieldScoped { field, inner } => {
                write!(self.out, "{}:", field)?;
                self.print(inner)
            }
            Node::Exclusion(inner) => self.call("not", std::slice::from_ref(inner.as_ref())),
            Node::And(children) => self.call("and", children),
            Node::Or(children) => self.call("or", children),
        }
    }

    fn call(&mut self, name: &str, children: &[Node]) -> fmt::Result {
        write!(self.out, "{}(", name)?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.print(child)?;
        }
        self.out.write_char(')')
    }

    fn escape(&mut self, word: &str) -> fmt::Result {
        for c in word.chars() {
            if matches!(c, '"' | '\\') {
                self.out.write_char('\\')?;
            }
            self.out.write_char(c)?;
        }
        Ok(())
    }
}

/// Renders `node` as canonical text.
pub fn render(node: &Node) -> String {
    node.to_string()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TreePrinter::new(f).print(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let tree = Node::And(vec![
            Node::Or(vec![Node::term("harry"), Node::term("potter")]),
            Node::exclusion(Node::term("150064")),
        ]);
        assert_eq!(render(&tree), "and(or(harry, potter), not(150064))");
    }

    #[test]
    fn test_render_phrase_escapes_quotes() {
        let tree = Node::field("title", Node::phrase(["say", "\"hi\""]));
        assert_eq!(render(&tree), r#"title:"say \"hi\"""#);
    }
}

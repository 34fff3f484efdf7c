//! Lowering of syntax trees into backend predicates.
//!
//! A backend implements [`TreeWalker`] once; [`lower`] drives the traversal and
//! guarantees that the produced predicate mirrors the tree node for node: every
//! `And`/`Or`/`Exclusion` becomes exactly one backend combinator over the lowered
//! children, in child order.

use crate::ast::Node;
use crate::error::TranslationError;

/// Which fields a leaf applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// The backend's default search fields
    Default,
    /// A single field, as resolved by [`TreeWalker::visit_field_scoped`]
    Field(&'a str),
}

/// Visitor lowering a [`Node`] into a backend predicate.
pub trait TreeWalker {
    type Predicate;

    /// Resolves the field named by a `field:` scope to the backend's own field
    /// name. Backends without a schema pass the name through.
    fn visit_field_scoped(&mut self, field: &str) -> Result<String, TranslationError> {
        Ok(field.to_string())
    }

    fn visit_term(&mut self, scope: Scope<'_>, word: &str) -> Self::Predicate;

    fn visit_phrase(&mut self, scope: Scope<'_>, words: &[String]) -> Self::Predicate;

    fn visit_exclusion(&mut self, inner: Self::Predicate) -> Self::Predicate;

    fn visit_and(&mut self, children: Vec<Self::Predicate>) -> Self::Predicate;

    fn visit_or(&mut self, children: Vec<Self::Predicate>) -> Self::Predicate;
}

/// Lowers `node` into one predicate of the walker's backend.
pub fn lower<W: TreeWalker + ?Sized>(
    node: &Node,
    walker: &mut W,
) -> Result<W::Predicate, TranslationError> {
    lower_scoped(node, Scope::Default, walker)
}

fn lower_scoped<W: TreeWalker + ?Sized>(
    node: &Node,
    scope: Scope<'_>,
    walker: &mut W,
) -> Result<W::Predicate, TranslationError> {
    match node {
        Node::Term(word) => Ok(walker.visit_term(scope, word)),
        Node::Phrase(words) => Ok(walker.visit_phrase(scope, words)),
        Node::FieldScoped { field, inner } => {
            let resolved = walker.visit_field_scoped(field)?;
            lower_scoped(inner, Scope::Field(&resolved), walker)
        }
        Node::Exclusion(inner) => {
            let inner = lower_scoped(inner, scope, walker)?;
            Ok(walker.visit_exclusion(inner))
        }
        Node::And(children) => {
            let lowered = lower_all(children, scope, walker)?;
            Ok(walker.visit_and(lowered))
        }
        Node::Or(children) => {
            let lowered = lower_all(children, scope, walker)?;
            Ok(walker.visit_or(lowered))
        }
    }
}

fn lower_all<W: TreeWalker + ?Sized>(
    children: &[Node],
    scope: Scope<'_>,
    walker: &mut W,
) -> Result<Vec<W::Predicate>, TranslationError> {
    children
        .iter()
        .map(|child| lower_scoped(child, scope, walker))
        .collect()
}

//! Clause location and nesting-depth queries.
//!
//! Pure queries over a [`ParseNode`] tree: where the clauses are, and how
//! deeply each dependent clause is buried under other dependent clauses.

use crate::tree::{NodeKind, ParseNode};

/// All independent clauses under the sentence root, document order.
///
/// Searches the full subtree rather than only the root's children, so
/// grammars that nest independent clauses under coordination nodes still
/// resolve. Returns an empty vector when the sentence has none.
pub fn find_independent_clauses(sentence: &ParseNode) -> Vec<&ParseNode> {
    sentence.descendants_of_kind(NodeKind::IndependentClause)
}

/// All dependent clauses anywhere below `node`, document order.
pub fn find_dependent_clauses(node: &ParseNode) -> Vec<&ParseNode> {
    node.descendants_of_kind(NodeKind::DependentClause)
}

/// Nesting depth of a dependent clause: the number of its ancestors
/// (excluding itself) that are also dependent clauses.
///
/// A top-level dependent clause has depth 0. Returns `None` when `node`
/// does not belong to `tree`.
pub fn clause_depth(tree: &ParseNode, node: &ParseNode) -> Option<usize> {
    let ancestors = tree.ancestors_of(node)?;
    Some(
        ancestors
            .iter()
            .filter(|a| a.kind == NodeKind::DependentClause)
            .count(),
    )
}

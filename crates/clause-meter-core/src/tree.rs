//! Classified parse-tree model and queries.
//!
//! Trees are produced by an external parser and arrive as data — typically
//! deserialized from JSON. This module only reads them: kind-filtered
//! descendant queries, ancestor chains, and terminal text extraction.
//!
//! # Example tree
//!
//! ```json
//! {
//!   "kind": "sentence",
//!   "children": [
//!     {
//!       "kind": "independent_clause",
//!       "children": [
//!         { "kind": "terminal", "text": "The_DT" },
//!         { "kind": "terminal", "text": "cat_NN" },
//!         { "kind": "terminal", "text": "sat_VBD" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ScoreError, ScoreResult};

/// Syntactic category of a parse-tree node.
///
/// Compared by value; the serialized snake_case labels match the grammar's
/// rule names but the label text is never used for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a parsed sentence.
    Sentence,
    /// A clause that can stand alone as a complete sentence.
    IndependentClause,
    /// A subordinate clause; may nest inside other dependent clauses.
    DependentClause,
    /// Noun phrase.
    NounPhrase,
    /// Verb phrase.
    VerbPhrase,
    /// Adjective phrase.
    AdjectivePhrase,
    /// Adverbial phrase.
    AdverbialPhrase,
    /// Leaf node carrying one tagged token.
    Terminal,
}

impl NodeKind {
    /// Returns the serialized snake_case label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::IndependentClause => "independent_clause",
            Self::DependentClause => "dependent_clause",
            Self::NounPhrase => "noun_phrase",
            Self::VerbPhrase => "verb_phrase",
            Self::AdjectivePhrase => "adjective_phrase",
            Self::AdverbialPhrase => "adverbial_phrase",
            Self::Terminal => "terminal",
        }
    }

    /// Whether this kind is a clause (independent or dependent).
    pub const fn is_clause(&self) -> bool {
        matches!(self, Self::IndependentClause | Self::DependentClause)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a classified parse tree.
///
/// Terminals carry `text` (a `word_TAG` token) and no children; every other
/// kind carries children and no text. [`ParseNode::validate`] enforces this
/// shape along with the clause-nesting invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParseNode {
    /// Syntactic category of this node.
    pub kind: NodeKind,
    /// Ordered child nodes; empty for terminals.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParseNode>,
    /// Tagged token (`word_TAG`); present only on terminals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ParseNode {
    /// Create an internal node.
    pub const fn internal(kind: NodeKind, children: Vec<Self>) -> Self {
        Self {
            kind,
            children,
            text: None,
        }
    }

    /// Create a terminal node from a tagged token.
    pub fn terminal<S: Into<String>>(tagged: S) -> Self {
        Self {
            kind: NodeKind::Terminal,
            children: Vec::new(),
            text: Some(tagged.into()),
        }
    }

    /// Whether this node is a terminal.
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal)
    }

    /// Validate the tree rooted at this node.
    ///
    /// Checks, in order:
    /// - the root is a `sentence`
    /// - terminals carry text and no children
    /// - non-terminals carry children semantics (no text)
    /// - an independent clause is never nested inside another clause
    #[tracing::instrument(skip_all)]
    pub fn validate(&self) -> ScoreResult<()> {
        if self.kind != NodeKind::Sentence {
            return Err(ScoreError::InvalidTree(format!(
                "root must be a sentence, found {}",
                self.kind
            )));
        }
        self.validate_node(false)
    }

    fn validate_node(&self, inside_clause: bool) -> ScoreResult<()> {
        match self.kind {
            NodeKind::Terminal => {
                if self.text.is_none() {
                    return Err(ScoreError::InvalidTree(
                        "terminal node without text".to_string(),
                    ));
                }
                if !self.children.is_empty() {
                    return Err(ScoreError::InvalidTree(
                        "terminal node with children".to_string(),
                    ));
                }
            }
            kind => {
                if self.text.is_some() {
                    return Err(ScoreError::InvalidTree(format!(
                        "{kind} node with terminal text"
                    )));
                }
                if kind == NodeKind::IndependentClause && inside_clause {
                    return Err(ScoreError::InvalidTree(
                        "independent clause nested inside a clause".to_string(),
                    ));
                }
            }
        }

        let nested = inside_clause || self.kind.is_clause();
        for child in &self.children {
            child.validate_node(nested)?;
        }
        Ok(())
    }

    /// All descendants of the given kind, in document (pre-order) order.
    ///
    /// The node itself is excluded. Returns an empty vector when nothing
    /// matches.
    pub fn descendants_of_kind(&self, kind: NodeKind) -> Vec<&Self> {
        let mut found = Vec::new();
        for child in &self.children {
            child.collect_kind(kind, &mut found);
        }
        found
    }

    fn collect_kind<'a>(&'a self, kind: NodeKind, found: &mut Vec<&'a Self>) {
        if self.kind == kind {
            found.push(self);
        }
        for child in &self.children {
            child.collect_kind(kind, found);
        }
    }

    /// Ancestors of `node` within this tree, ordered parent to root.
    ///
    /// Nodes are matched by identity, not equality, so structurally equal
    /// siblings resolve to their own chains. Returns `None` when `node` is
    /// not part of this tree.
    pub fn ancestors_of<'a>(&'a self, node: &Self) -> Option<Vec<&'a Self>> {
        let mut path: Vec<&Self> = Vec::new();
        if self.find_path(node, &mut path) {
            path.reverse();
            Some(path)
        } else {
            None
        }
    }

    fn find_path<'a>(&'a self, target: &Self, path: &mut Vec<&'a Self>) -> bool {
        if std::ptr::eq(self, target) {
            return true;
        }
        path.push(self);
        for child in &self.children {
            if child.find_path(target, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Tagged tokens of every terminal under this node, left to right.
    ///
    /// Depth-first traversal with no kind filtering: terminals inside
    /// dependent clauses are included.
    pub fn tagged_words(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.collect_terminals(&mut words);
        words
    }

    fn collect_terminals<'a>(&'a self, words: &mut Vec<&'a str>) {
        if let Some(ref text) = self.text {
            words.push(text.as_str());
        }
        for child in &self.children {
            child.collect_terminals(words);
        }
    }

    /// Tagged terminal text of this subtree, space-joined.
    pub fn tagged_text(&self) -> String {
        self.tagged_words().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tagged: &str) -> ParseNode {
        ParseNode::terminal(tagged)
    }

    fn sample_sentence() -> ParseNode {
        // "The cat sat" as a single independent clause
        ParseNode::internal(
            NodeKind::Sentence,
            vec![ParseNode::internal(
                NodeKind::IndependentClause,
                vec![
                    ParseNode::internal(NodeKind::NounPhrase, vec![leaf("The_DT"), leaf("cat_NN")]),
                    ParseNode::internal(NodeKind::VerbPhrase, vec![leaf("sat_VBD")]),
                ],
            )],
        )
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "kind": "sentence",
            "children": [
                {
                    "kind": "independent_clause",
                    "children": [
                        { "kind": "terminal", "text": "The_DT" },
                        { "kind": "terminal", "text": "cat_NN" },
                        { "kind": "terminal", "text": "sat_VBD" }
                    ]
                }
            ]
        }"#;
        let tree: ParseNode = serde_json::from_str(json).unwrap();
        assert_eq!(tree.kind, NodeKind::Sentence);
        assert_eq!(tree.tagged_words(), vec!["The_DT", "cat_NN", "sat_VBD"]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn tagged_words_preserve_order() {
        let tree = sample_sentence();
        assert_eq!(tree.tagged_words(), vec!["The_DT", "cat_NN", "sat_VBD"]);
        assert_eq!(tree.tagged_text(), "The_DT cat_NN sat_VBD");
    }

    #[test]
    fn descendants_in_document_order() {
        let tree = ParseNode::internal(
            NodeKind::Sentence,
            vec![
                ParseNode::internal(NodeKind::IndependentClause, vec![leaf("I_PRP")]),
                ParseNode::internal(NodeKind::IndependentClause, vec![leaf("he_PRP")]),
            ],
        );
        let clauses = tree.descendants_of_kind(NodeKind::IndependentClause);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].tagged_text(), "I_PRP");
        assert_eq!(clauses[1].tagged_text(), "he_PRP");
    }

    #[test]
    fn descendants_searches_full_subtree() {
        // Dependent clauses buried under intermediate phrase nodes
        let tree = ParseNode::internal(
            NodeKind::Sentence,
            vec![ParseNode::internal(
                NodeKind::VerbPhrase,
                vec![ParseNode::internal(
                    NodeKind::DependentClause,
                    vec![ParseNode::internal(
                        NodeKind::DependentClause,
                        vec![leaf("deep_RB")],
                    )],
                )],
            )],
        );
        assert_eq!(tree.descendants_of_kind(NodeKind::DependentClause).len(), 2);
    }

    #[test]
    fn no_match_returns_empty() {
        let tree = sample_sentence();
        assert!(tree.descendants_of_kind(NodeKind::DependentClause).is_empty());
    }

    #[test]
    fn ancestors_run_parent_to_root() {
        let tree = sample_sentence();
        let noun_phrases = tree.descendants_of_kind(NodeKind::NounPhrase);
        let ancestors = tree.ancestors_of(noun_phrases[0]).unwrap();
        assert_eq!(ancestors.len(), 2);
        assert_eq!(ancestors[0].kind, NodeKind::IndependentClause);
        assert_eq!(ancestors[1].kind, NodeKind::Sentence);
    }

    #[test]
    fn ancestors_of_foreign_node_is_none() {
        let tree = sample_sentence();
        let other = leaf("stray_NN");
        assert!(tree.ancestors_of(&other).is_none());
    }

    #[test]
    fn ancestors_distinguish_equal_siblings() {
        let tree = ParseNode::internal(
            NodeKind::Sentence,
            vec![
                ParseNode::internal(NodeKind::IndependentClause, vec![leaf("go_VB")]),
                ParseNode::internal(NodeKind::IndependentClause, vec![leaf("go_VB")]),
            ],
        );
        let clauses = tree.descendants_of_kind(NodeKind::IndependentClause);
        // Both clauses are structurally equal; identity matching must still
        // resolve each to a one-element chain.
        for clause in clauses {
            let ancestors = tree.ancestors_of(clause).unwrap();
            assert_eq!(ancestors.len(), 1);
            assert_eq!(ancestors[0].kind, NodeKind::Sentence);
        }
    }

    #[test]
    fn validate_rejects_non_sentence_root() {
        let tree = ParseNode::internal(NodeKind::IndependentClause, vec![leaf("hi_UH")]);
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("root must be a sentence"));
    }

    #[test]
    fn validate_rejects_bare_terminal() {
        let tree = ParseNode::internal(
            NodeKind::Sentence,
            vec![ParseNode {
                kind: NodeKind::Terminal,
                children: Vec::new(),
                text: None,
            }],
        );
        assert!(tree.validate().is_err());
    }

    #[test]
    fn validate_rejects_nested_independent_clause() {
        let tree = ParseNode::internal(
            NodeKind::Sentence,
            vec![ParseNode::internal(
                NodeKind::DependentClause,
                vec![ParseNode::internal(
                    NodeKind::IndependentClause,
                    vec![leaf("no_DT")],
                )],
            )],
        );
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("independent clause nested"));
    }

    #[test]
    fn serializes_terminal_without_children_field() {
        let json = serde_json::to_string(&ParseNode::terminal("cat_NN")).unwrap();
        assert!(!json.contains("children"));
        assert!(json.contains("\"kind\":\"terminal\""));
    }
}

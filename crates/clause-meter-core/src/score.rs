//! Sentence scoring: lexical baseline plus clause-structure penalty.
//!
//! The adjusted score starts from the per-clause Flesch baseline and
//! subtracts a structural penalty built from dependent-clause counts and
//! factorial-weighted nesting depths, so syntactic complexity lowers the
//! score beyond what word statistics capture.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clauses::{clause_depth, find_dependent_clauses, find_independent_clauses};
use crate::error::{ScoreError, ScoreResult};
use crate::flesch::LexicalFormula;
use crate::tags::strip_tags;
use crate::tree::ParseNode;

/// Penalty points per dependent clause inside an independent clause.
///
/// Encodes the readability theory that each subordinate clause costs a
/// fixed amount of reading effort, on top of its depth weighting.
pub const DEPENDENT_CLAUSE_WEIGHT: f64 = 4.0;

/// Penalty credit per independent clause beyond the first.
///
/// Several short coordinated clauses read easier than one long clause, so
/// each extra independent clause refunds exactly this much penalty.
pub const EXTRA_CLAUSE_CREDIT: f64 = 1.0;

/// Per-clause scoring detail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClauseScore {
    /// Detagged clause text.
    pub text: String,
    /// Baseline lexical score of the clause.
    pub flesch_score: f64,
    /// Structural penalty from dependent clauses and nesting.
    pub structural_penalty: f64,
    /// Number of dependent clauses inside this clause.
    pub dependent_clauses: usize,
    /// Nesting depth of each dependent clause, document order.
    pub nesting_depths: Vec<usize>,
}

/// Result of scoring one sentence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Lexical score of the whole sentence, ignoring clause structure.
    pub raw_flesch_score: f64,
    /// Structure-penalized readability score.
    pub adjusted_reading_score: f64,
    /// Number of independent clauses found.
    pub independent_clauses: usize,
    /// Number of dependent clauses found anywhere in the sentence.
    pub dependent_clauses: usize,
    /// Deepest dependent-clause nesting in the sentence.
    pub max_nesting_depth: usize,
    /// Per-clause breakdown, one entry per independent clause.
    pub clauses: Vec<ClauseScore>,
    /// Minimum acceptable adjusted score (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Whether the adjusted score falls below the minimum.
    pub below_min: bool,
}

/// Score a sentence tree.
///
/// # Arguments
///
/// * `tree` — The classified parse tree; root kind must be `sentence`.
/// * `formula` — The lexical formula applied to word sequences.
/// * `strip_raw_tags` — If `true`, strip tags before computing the raw
///   whole-sentence score. The default behavior (`false`) feeds the raw
///   score tagged tokens while per-clause scores are always stripped; the
///   asymmetry is inherited deliberately and this flag opts into the
///   uniform treatment.
/// * `min_score` — Optional quality-gate threshold for the adjusted score.
///
/// A sentence with no independent clauses falls back to
/// `adjusted_reading_score = raw_flesch_score` rather than erroring.
#[tracing::instrument(skip_all, fields(strip_raw_tags))]
pub fn score_sentence(
    tree: &ParseNode,
    formula: &dyn LexicalFormula,
    strip_raw_tags: bool,
    min_score: Option<f64>,
) -> ScoreResult<ReadabilityReport> {
    tree.validate()?;

    let tagged = tree.tagged_text();
    let raw_words: Vec<String> = if strip_raw_tags {
        strip_tags(&tagged)
    } else {
        tagged.split_whitespace().map(ToString::to_string).collect()
    };
    let raw_flesch_score = formula.score(&raw_words);

    let all_dependents = find_dependent_clauses(tree);
    let mut max_nesting_depth = 0usize;
    for dependent in &all_dependents {
        let depth = clause_depth(tree, dependent).ok_or_else(|| {
            ScoreError::InvalidTree("dependent clause not reachable from root".to_string())
        })?;
        max_nesting_depth = max_nesting_depth.max(depth);
    }

    let independent = find_independent_clauses(tree);
    if independent.is_empty() {
        tracing::debug!("no independent clauses; falling back to raw score");
        return Ok(ReadabilityReport {
            raw_flesch_score,
            adjusted_reading_score: raw_flesch_score,
            independent_clauses: 0,
            dependent_clauses: all_dependents.len(),
            max_nesting_depth,
            clauses: Vec::new(),
            min_score,
            below_min: min_score.is_some_and(|min| raw_flesch_score < min),
        });
    }

    let mut clauses = Vec::with_capacity(independent.len());
    for clause in &independent {
        let words = strip_tags(&clause.tagged_text());
        let flesch_score = formula.score(&words);
        let (structural_penalty, nesting_depths) = structural_penalty(tree, clause)?;

        clauses.push(ClauseScore {
            text: words.join(" "),
            flesch_score,
            structural_penalty,
            dependent_clauses: nesting_depths.len(),
            nesting_depths,
        });
    }

    let penalty_avg = mean(clauses.iter().map(|c| c.structural_penalty));
    let flesch_avg = mean(clauses.iter().map(|c| c.flesch_score));

    let extra_clauses = (independent.len() - 1) as f64;
    let coordination_penalty = extra_clauses.mul_add(-EXTRA_CLAUSE_CREDIT, penalty_avg);
    let adjusted_reading_score = flesch_avg - coordination_penalty;

    Ok(ReadabilityReport {
        raw_flesch_score,
        adjusted_reading_score,
        independent_clauses: independent.len(),
        dependent_clauses: all_dependents.len(),
        max_nesting_depth,
        clauses,
        min_score,
        below_min: min_score.is_some_and(|min| adjusted_reading_score < min),
    })
}

/// Structural penalty of one independent clause:
/// `dependent count * DEPENDENT_CLAUSE_WEIGHT + Σ (depth + 1)!` over its
/// dependent clauses. Also returns the per-clause depths.
fn structural_penalty(tree: &ParseNode, clause: &ParseNode) -> ScoreResult<(f64, Vec<usize>)> {
    let dependents = find_dependent_clauses(clause);
    let mut depths = Vec::with_capacity(dependents.len());
    let mut depth_penalty: u64 = 0;

    for dependent in &dependents {
        let depth = clause_depth(tree, dependent).ok_or_else(|| {
            ScoreError::InvalidTree("dependent clause not reachable from root".to_string())
        })?;
        depths.push(depth);

        let weight = depth_weight(depth)?;
        depth_penalty = depth_penalty
            .checked_add(weight)
            .ok_or(ScoreError::PenaltyOverflow { depth })?;
    }

    let penalty = (dependents.len() as f64).mul_add(DEPENDENT_CLAUSE_WEIGHT, depth_penalty as f64);
    Ok((penalty, depths))
}

/// Factorial depth weight: `(depth + 1)!` in checked arithmetic.
fn depth_weight(depth: usize) -> ScoreResult<u64> {
    let n = depth as u64 + 1;
    factorial(n).ok_or(ScoreError::PenaltyOverflow { depth })
}

/// `n!` for n ≥ 0, or `None` on overflow. `factorial(0) = factorial(1) = 1`.
fn factorial(n: u64) -> Option<u64> {
    (2..=n).try_fold(1u64, u64::checked_mul)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flesch::FleschReadingEase;
    use crate::tree::NodeKind;

    /// Stub formula: score = word count. Makes the aggregation arithmetic
    /// exact in assertions.
    struct WordCount;

    impl LexicalFormula for WordCount {
        fn score(&self, words: &[String]) -> f64 {
            words.len() as f64
        }
    }

    fn leaf(tagged: &str) -> ParseNode {
        ParseNode::terminal(tagged)
    }

    fn clause(kind: NodeKind, children: Vec<ParseNode>) -> ParseNode {
        ParseNode::internal(kind, children)
    }

    fn sentence(children: Vec<ParseNode>) -> ParseNode {
        ParseNode::internal(NodeKind::Sentence, children)
    }

    /// "I left because she called, but he stayed."
    fn coordinated_sentence() -> ParseNode {
        sentence(vec![
            clause(
                NodeKind::IndependentClause,
                vec![
                    leaf("I_PRP"),
                    leaf("left_VBD"),
                    clause(
                        NodeKind::DependentClause,
                        vec![leaf("because_IN"), leaf("she_PRP"), leaf("called_VBD")],
                    ),
                ],
            ),
            leaf("but_CC"),
            clause(
                NodeKind::IndependentClause,
                vec![leaf("he_PRP"), leaf("stayed_VBD")],
            ),
        ])
    }

    /// One independent clause holding a chain of `depth + 1` nested
    /// dependent clauses.
    fn nested_chain(levels: usize) -> ParseNode {
        let mut node = clause(NodeKind::DependentClause, vec![leaf("deep_JJ")]);
        for _ in 0..levels {
            node = clause(NodeKind::DependentClause, vec![leaf("that_IN"), node]);
        }
        sentence(vec![clause(
            NodeKind::IndependentClause,
            vec![leaf("It_PRP"), leaf("holds_VBZ"), node],
        )])
    }

    #[test]
    fn single_plain_clause_scores_its_lexical_score() {
        let tree = sentence(vec![clause(
            NodeKind::IndependentClause,
            vec![leaf("The_DT"), leaf("cat_NN"), leaf("sat_VBD")],
        )]);
        let report = score_sentence(&tree, &WordCount, false, None).unwrap();
        // No dependents, no coordination: adjusted = clause lexical score
        assert_eq!(report.adjusted_reading_score, 3.0);
        assert_eq!(report.independent_clauses, 1);
        assert_eq!(report.dependent_clauses, 0);
        assert_eq!(report.clauses[0].structural_penalty, 0.0);
    }

    #[test]
    fn no_independent_clauses_falls_back_to_raw() {
        let tree = sentence(vec![clause(
            NodeKind::NounPhrase,
            vec![leaf("Morning_NN"), leaf("rain_NN")],
        )]);
        let report = score_sentence(&tree, &WordCount, false, None).unwrap();
        assert_eq!(report.independent_clauses, 0);
        assert_eq!(report.adjusted_reading_score, report.raw_flesch_score);
        assert!(report.clauses.is_empty());
    }

    #[test]
    fn end_to_end_coordinated_sentence() {
        let tree = coordinated_sentence();
        let report = score_sentence(&tree, &WordCount, false, None).unwrap();

        // Clause 1: 1 dependent * 4 + 1! = 5; clause 2: 0.
        assert_eq!(report.clauses[0].structural_penalty, 5.0);
        assert_eq!(report.clauses[1].structural_penalty, 0.0);

        // Lexical: 5 words and 2 words -> avg 3.5.
        // Penalty avg 2.5, minus 1 coordination credit -> 1.5.
        assert!((report.adjusted_reading_score - 2.0).abs() < 1e-9);
        assert_eq!(report.independent_clauses, 2);
        assert_eq!(report.dependent_clauses, 1);
        assert_eq!(report.max_nesting_depth, 0);
    }

    #[test]
    fn extra_clause_credit_is_one_point_each() {
        // Two-word clauses with no dependents: penalty avg is 0, so each
        // extra independent clause raises the adjusted score by exactly 1.
        let make = |n: usize| {
            let clauses = (0..n)
                .map(|_| {
                    clause(
                        NodeKind::IndependentClause,
                        vec![leaf("he_PRP"), leaf("ran_VBD")],
                    )
                })
                .collect();
            sentence(clauses)
        };

        let scores: Vec<f64> = (1..=3)
            .map(|n| {
                score_sentence(&make(n), &WordCount, false, None)
                    .unwrap()
                    .adjusted_reading_score
            })
            .collect();

        assert!((scores[0] - 2.0).abs() < 1e-9);
        assert!((scores[1] - 3.0).abs() < 1e-9);
        assert!((scores[2] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn deeper_nesting_never_decreases_penalty() {
        let mut previous = -1.0;
        for levels in 0..5 {
            let tree = nested_chain(levels);
            let report = score_sentence(&tree, &WordCount, false, None).unwrap();
            let penalty = report.clauses[0].structural_penalty;
            assert!(
                penalty > previous,
                "penalty {penalty} at {levels} levels did not increase"
            );
            previous = penalty;
        }
    }

    #[test]
    fn nesting_depths_are_recorded() {
        let tree = nested_chain(2);
        let report = score_sentence(&tree, &WordCount, false, None).unwrap();
        assert_eq!(report.clauses[0].nesting_depths, vec![0, 1, 2]);
        assert_eq!(report.max_nesting_depth, 2);
        // 3 dependents * 4 + (1! + 2! + 3!) = 12 + 9 = 21
        assert_eq!(report.clauses[0].structural_penalty, 21.0);
    }

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
    }

    #[test]
    fn depth_weight_is_strictly_increasing() {
        for depth in 0..10 {
            assert!(depth_weight(depth + 1).unwrap() > depth_weight(depth).unwrap());
        }
    }

    #[test]
    fn extreme_nesting_reports_overflow() {
        // Depth 20 needs 21!, which exceeds u64.
        let tree = nested_chain(20);
        let err = score_sentence(&tree, &WordCount, false, None).unwrap_err();
        assert!(matches!(err, ScoreError::PenaltyOverflow { depth: 20 }));
    }

    #[test]
    fn invalid_tree_is_rejected() {
        let tree = clause(NodeKind::IndependentClause, vec![leaf("no_DT")]);
        assert!(matches!(
            score_sentence(&tree, &WordCount, false, None),
            Err(ScoreError::InvalidTree(_))
        ));
    }

    #[test]
    fn raw_score_keeps_tags_by_default() {
        let tree = coordinated_sentence();
        let tagged = score_sentence(&tree, &FleschReadingEase, false, None).unwrap();
        let stripped = score_sentence(&tree, &FleschReadingEase, true, None).unwrap();
        // "because_IN" estimates more syllables than "because", so the
        // default raw score differs from the uniformly stripped one.
        assert_ne!(tagged.raw_flesch_score, stripped.raw_flesch_score);
        // The adjusted score always strips per-clause and is unaffected.
        assert_eq!(
            tagged.adjusted_reading_score,
            stripped.adjusted_reading_score
        );
    }

    #[test]
    fn min_score_gate() {
        let tree = coordinated_sentence();
        let report = score_sentence(&tree, &WordCount, false, Some(50.0)).unwrap();
        assert!(report.below_min);
        let report = score_sentence(&tree, &WordCount, false, Some(1.0)).unwrap();
        assert!(!report.below_min);
    }

    #[test]
    fn report_serializes_to_json() {
        let tree = coordinated_sentence();
        let report = score_sentence(&tree, &WordCount, false, None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["independent_clauses"], 2);
        assert!(json["clauses"].as_array().unwrap().len() == 2);
        // min_score omitted when unset
        assert!(json.get("min_score").is_none());
    }
}

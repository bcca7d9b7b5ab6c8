//! Baseline lexical readability formula.
//!
//! The scoring core treats the lexical formula as an injected collaborator
//! ([`LexicalFormula`]), so tests can substitute stubs and callers can bring
//! their own metric. [`FleschReadingEase`] is the bundled default.

/// A word-level readability formula.
///
/// Implementations must be deterministic pure functions of the word list.
/// An empty or one-word list is a valid input: implementations return a
/// defined value rather than panicking.
pub trait LexicalFormula {
    /// Score a sequence of bare words.
    fn score(&self, words: &[String]) -> f64;
}

/// Flesch Reading Ease over a single sentence.
///
/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`,
/// with the sentence count pinned to 1 since inputs are individual clauses
/// or sentences. Higher = easier; typical English prose lands between 0
/// and 100, though the formula is unbounded on both ends.
///
/// Syllables are estimated with a vowel-group heuristic (see
/// [`estimate_syllables`]); no dictionary is consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleschReadingEase;

impl LexicalFormula for FleschReadingEase {
    /// Score a word list. Returns 0.0 for an empty list (documented
    /// sentinel; fragment clauses are valid inputs).
    fn score(&self, words: &[String]) -> f64 {
        if words.is_empty() {
            return 0.0;
        }

        let word_count = words.len() as f64;
        let syllables: usize = words.iter().map(|w| syllables_in_token(w)).sum();
        let syllables_per_word = syllables as f64 / word_count;

        (-1.015f64).mul_add(word_count, 206.835) - 84.6 * syllables_per_word
    }
}

/// Count syllables in a token, ignoring surrounding punctuation.
///
/// Pure punctuation tokens count as zero syllables.
fn syllables_in_token(token: &str) -> usize {
    let cleaned = token.trim_matches(|c: char| !c.is_alphabetic());
    if cleaned.is_empty() {
        0
    } else {
        estimate_syllables(cleaned)
    }
}

/// Estimate syllables in a word by counting vowel groups.
///
/// Adjustments: a trailing silent `e` drops one syllable (except after
/// `l`, so "table" keeps its final beat), and the result is floored at 1
/// for any word containing letters.
pub fn estimate_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut syllables = 0usize;
    let mut previous_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if syllables > 1 && word.ends_with('e') && !word.ends_with("le") {
        syllables -= 1;
    }

    syllables.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn estimates_common_words() {
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("hello"), 2);
        assert_eq!(estimate_syllables("because"), 2);
        assert_eq!(estimate_syllables("table"), 2);
        assert_eq!(estimate_syllables("readability"), 5);
    }

    #[test]
    fn single_letter_is_one_syllable() {
        assert_eq!(estimate_syllables("a"), 1);
        assert_eq!(estimate_syllables("I"), 1);
    }

    #[test]
    fn empty_word_list_scores_zero() {
        assert_eq!(FleschReadingEase.score(&[]), 0.0);
    }

    #[test]
    fn one_word_does_not_panic() {
        let score = FleschReadingEase.score(&words(&["cat"]));
        assert!(score.is_finite());
    }

    #[test]
    fn short_simple_sentence_scores_high() {
        let score = FleschReadingEase.score(&words(&["The", "cat", "sat"]));
        // 3 words, 3 syllables: 206.835 - 3.045 - 84.6 = 119.19
        assert!((score - 119.19).abs() < 1e-9);
    }

    #[test]
    fn polysyllabic_words_score_lower() {
        let simple = FleschReadingEase.score(&words(&["the", "cat", "sat"]));
        let complex = FleschReadingEase.score(&words(&[
            "organizational",
            "restructuring",
            "necessitated",
        ]));
        assert!(complex < simple);
    }

    #[test]
    fn punctuation_tokens_add_no_syllables() {
        let with_comma = FleschReadingEase.score(&words(&["he", "stayed", ","]));
        let without = FleschReadingEase.score(&words(&["he", "stayed"]));
        // The comma still counts as a word but contributes no syllables,
        // so the two scores differ only through the word count.
        assert!(with_comma.is_finite());
        assert!(without.is_finite());
        assert_ne!(with_comma, without);
    }

    #[test]
    fn deterministic() {
        let w = words(&["I", "left", "because", "she", "called"]);
        assert_eq!(FleschReadingEase.score(&w), FleschReadingEase.score(&w));
    }
}

//! Part-of-speech tag stripping.
//!
//! Terminals carry tokens in `word_TAG` form (e.g. `cat_NN`). Lexical
//! scoring needs bare words, so the tag suffix is removed first.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a tag suffix: underscore followed by one or more letters.
static TAG_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[a-zA-Z]+").expect("valid regex"));

/// Strip tag suffixes from a whitespace-separated tagged string.
///
/// For each non-empty token, keeps the prefix before the *first* tag
/// suffix match. Tokens that become empty after stripping are dropped;
/// tokens with no recognizable suffix pass through unchanged. Word order
/// is preserved.
pub fn strip_tags(tagged: &str) -> Vec<String> {
    tagged
        .split_whitespace()
        .filter_map(|token| {
            let word = strip_tag(token);
            if word.is_empty() {
                None
            } else {
                Some(word.to_string())
            }
        })
        .collect()
}

/// Strip the tag suffix from a single token.
///
/// Returns the prefix before the first `_TAG` match, or the whole token
/// when no suffix is present.
pub fn strip_tag(token: &str) -> &str {
    TAG_SUFFIX
        .find(token)
        .map_or(token, |m| &token[..m.start()])
}

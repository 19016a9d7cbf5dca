use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Word characters are ASCII only: accented letters split tokens like any punctuation.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z_]+").expect("valid regex"));

/// Lowercase the text and split it on runs of non-word characters.
///
/// Empty tokens are dropped; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct tokens of `text`.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

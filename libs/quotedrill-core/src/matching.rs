//! Answer matching for hidden-word inputs.
//!
//! Answers are compared word-by-word: exact match after trim + lowercase,
//! then an approximate pass based on normalized Levenshtein similarity.

use crate::types::WordResult;

/// Minimum normalized similarity for a fuzzy match. Accepts a
/// single-character typo in a four-letter word; rejects substantially
/// different words.
pub const FUZZY_THRESHOLD: f64 = 0.7;

/// Inputs of normalized length at or below this never match fuzzily.
const MIN_FUZZY_LEN: usize = 3;

/// Outcome of comparing one typed word to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    /// Whether the input is accepted at all.
    pub matched: bool,
    /// Whether acceptance was approximate rather than exact.
    pub fuzzy: bool,
}

impl WordMatch {
    const NONE: Self = Self { matched: false, fuzzy: false };
    const EXACT: Self = Self { matched: true, fuzzy: false };
    const FUZZY: Self = Self { matched: true, fuzzy: true };
}

/// Compare a typed word to the target word.
pub fn match_word(input: &str, target: &str) -> WordMatch {
    if input.is_empty() || target.is_empty() {
        return WordMatch::NONE;
    }

    let input = input.trim().to_lowercase();
    let target = target.trim().to_lowercase();

    // Very short inputs match too permissively under similarity scoring,
    // so they are held to exact equality.
    if input.chars().count() < MIN_FUZZY_LEN {
        if input == target {
            return WordMatch::EXACT;
        }
        return WordMatch::NONE;
    }

    if input == target {
        return WordMatch::EXACT;
    }

    if normalized_similarity(&input, &target) >= FUZZY_THRESHOLD {
        return WordMatch::FUZZY;
    }

    WordMatch::NONE
}

/// Score typed inputs against the hidden words, aligned by index.
///
/// Output length equals `targets` length; a missing input counts as empty
/// (and therefore incorrect).
pub fn check_inputs(inputs: &[String], targets: &[&str]) -> Vec<WordResult> {
    targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            let input = inputs.get(index).map(String::as_str).unwrap_or("");
            let result = match_word(input, target);

            WordResult {
                word: target.to_string(),
                input: input.to_string(),
                correct: result.matched && !result.fuzzy,
                fuzzy_match: result.matched && result.fuzzy,
                incorrect: !result.matched,
            }
        })
        .collect()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity (0.0 to 1.0) based on Levenshtein distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

//! Redaction planning: deciding which words of a quote are hidden.

use rand::Rng;

use crate::normalize::normalize;
use crate::types::{Chapter, Quote, RedactionType, RuntimeQuote, SessionSettings, VisibleWord};

/// Build the session-scoped view of a quote: normalized text, word tokens,
/// and a visibility mask drawn under the session's redaction policy.
///
/// The mask is fixed for the lifetime of the RuntimeQuote; a revisited
/// quote gets a fresh build only if the caller asks for one.
pub fn build_runtime_quote<R: Rng>(
    quote: &Quote,
    chapter: &Chapter,
    settings: &SessionSettings,
    rng: &mut R,
) -> RuntimeQuote {
    let normalized_text = normalize(&quote.text);
    let words: Vec<&str> = normalized_text.split_whitespace().collect();
    let total_words = words.len();

    let visible_words = match settings.redaction_type {
        RedactionType::Full => words
            .iter()
            .map(|w| VisibleWord { word: w.to_string(), visible: false })
            .collect(),
        RedactionType::Random => {
            let min_visible = (total_words / 10).max(2);
            let max_visible = total_words.saturating_sub(2).max(min_visible);
            let num_visible = rng.gen_range(min_visible..=max_visible);
            mask_with_visible(&words, num_visible, rng)
        }
        RedactionType::Percentage => {
            let num_visible =
                (total_words * settings.percentage as usize / 100).max(1);
            mask_with_visible(&words, num_visible, rng)
        }
    };

    RuntimeQuote {
        id: quote.id.clone(),
        text: quote.text.clone(),
        created_at: quote.created_at,
        chapter_id: chapter.id.clone(),
        chapter_name: chapter.name.clone(),
        normalized_text,
        visible_words,
        total_words,
        is_revision: false,
    }
}

/// Tag `num_visible` distinct positions (chosen uniformly without
/// replacement) as visible, preserving word order.
fn mask_with_visible<R: Rng>(
    words: &[&str],
    num_visible: usize,
    rng: &mut R,
) -> Vec<VisibleWord> {
    if words.is_empty() {
        return Vec::new();
    }

    let num_visible = num_visible.min(words.len());
    let visible: std::collections::HashSet<usize> =
        rand::seq::index::sample(rng, words.len(), num_visible)
            .into_iter()
            .collect();

    words
        .iter()
        .enumerate()
        .map(|(i, w)| VisibleWord {
            word: w.to_string(),
            visible: visible.contains(&i),
        })
        .collect()
}

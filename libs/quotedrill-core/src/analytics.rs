//! Accuracy and coverage rollups over persisted attempt records.
//!
//! Statistics are produced at three granularities (text, chapter, quote),
//! each split into all / with-hints / without-hints. A level with no
//! attempts reports `None` rather than zeros so renderers can show
//! "no data yet".

use serde::{Deserialize, Serialize};

use crate::types::{AttemptRecord, Text};

/// Aggregated counters for a set of attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptStats {
    /// Number of attempts aggregated.
    pub attempts: usize,
    /// Percent of attempted words answered exactly, one decimal.
    pub accuracy: f64,
    /// Percent of total words that were attempted, one decimal.
    pub coverage: f64,
    pub total_words: usize,
    pub total_attempted: usize,
    pub total_correct: usize,
}

/// One granularity level split by hint usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBreakdown {
    pub all: Option<AttemptStats>,
    pub with_hints: Option<AttemptStats>,
    pub without_hints: Option<AttemptStats>,
}

/// Per-chapter rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAnalytics {
    pub chapter_id: String,
    pub chapter_name: String,
    #[serde(flatten)]
    pub stats: StatsBreakdown,
}

/// Per-quote rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAnalytics {
    pub quote_id: String,
    pub chapter_id: String,
    pub chapter_name: String,
    pub quote_text: String,
    #[serde(flatten)]
    pub stats: StatsBreakdown,
}

/// Full analytics tree for one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalytics {
    pub text_id: String,
    pub text_name: String,
    pub overall: StatsBreakdown,
    pub chapters: Vec<ChapterAnalytics>,
    pub quotes: Vec<QuoteAnalytics>,
}

/// Aggregate all attempts for one text into its analytics tree.
///
/// Returns `None` when the text id is unknown. Every chapter and quote of
/// the text appears in the output even with zero attempts.
pub fn text_analytics(
    text_id: &str,
    texts: &[Text],
    attempts: &[AttemptRecord],
) -> Option<TextAnalytics> {
    let text = texts.iter().find(|t| t.id == text_id)?;

    let text_attempts: Vec<&AttemptRecord> =
        attempts.iter().filter(|a| a.text_id == text_id).collect();

    let chapters = text
        .chapters
        .iter()
        .map(|chapter| {
            let chapter_attempts: Vec<&AttemptRecord> = text_attempts
                .iter()
                .filter(|a| a.chapter_id == chapter.id)
                .copied()
                .collect();

            ChapterAnalytics {
                chapter_id: chapter.id.clone(),
                chapter_name: chapter.name.clone(),
                stats: breakdown(&chapter_attempts),
            }
        })
        .collect();

    let mut quotes = Vec::new();
    for chapter in &text.chapters {
        for quote in &chapter.quotes {
            let quote_attempts: Vec<&AttemptRecord> = text_attempts
                .iter()
                .filter(|a| a.quote_id == quote.id)
                .copied()
                .collect();

            quotes.push(QuoteAnalytics {
                quote_id: quote.id.clone(),
                chapter_id: chapter.id.clone(),
                chapter_name: chapter.name.clone(),
                quote_text: quote.text.clone(),
                stats: breakdown(&quote_attempts),
            });
        }
    }

    Some(TextAnalytics {
        text_id: text.id.clone(),
        text_name: text.name.clone(),
        overall: breakdown(&text_attempts),
        chapters,
        quotes,
    })
}

fn breakdown(attempts: &[&AttemptRecord]) -> StatsBreakdown {
    let with_hints: Vec<&AttemptRecord> =
        attempts.iter().filter(|a| a.used_hints).copied().collect();
    let without_hints: Vec<&AttemptRecord> =
        attempts.iter().filter(|a| !a.used_hints).copied().collect();

    StatsBreakdown {
        all: compute_stats(attempts),
        with_hints: compute_stats(&with_hints),
        without_hints: compute_stats(&without_hints),
    }
}

/// Sum counters over a set of attempts; `None` when the set is empty.
pub fn compute_stats(attempts: &[&AttemptRecord]) -> Option<AttemptStats> {
    if attempts.is_empty() {
        return None;
    }

    let mut total_attempted = 0;
    let mut total_correct = 0;
    let mut total_words = 0;

    for attempt in attempts {
        total_attempted += attempt.attempted_words;
        total_correct += attempt.correct_words;
        total_words += attempt.total_words;
    }

    let accuracy = if total_attempted > 0 {
        total_correct as f64 / total_attempted as f64 * 100.0
    } else {
        0.0
    };
    let coverage = if total_words > 0 {
        total_attempted as f64 / total_words as f64 * 100.0
    } else {
        0.0
    };

    Some(AttemptStats {
        attempts: attempts.len(),
        accuracy: round1(accuracy),
        coverage: round1(coverage),
        total_words,
        total_attempted,
        total_correct,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

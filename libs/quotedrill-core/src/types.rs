//! Core types for quote practice sessions.
//!
//! Persisted shapes (`Text`, `Chapter`, `Quote`, `AttemptRecord`,
//! `WordResult`) keep their original camelCase field names on the wire so
//! existing stored data stays readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored text: the root aggregate, an ordered tree of chapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub id: String,
    pub name: String,
    pub chapters: Vec<Chapter>,
    pub created_at: DateTime<Utc>,
}

/// A chapter within a text; id unique within the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub quotes: Vec<Quote>,
}

/// A literal quote within a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Redaction policy for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionType {
    Full,
    Random,
    Percentage,
}

impl Default for RedactionType {
    fn default() -> Self {
        Self::Full
    }
}

/// Quote presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrder {
    Ordered,
    Randomized,
}

impl Default for QuoteOrder {
    fn default() -> Self {
        Self::Ordered
    }
}

/// How the card is presented: at leisure or against a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Relaxed,
    Timed,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Relaxed
    }
}

/// When per-quote results are shown: inline after each mark, or only at
/// the end of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsMode {
    Progressive,
    End,
}

impl Default for ResultsMode {
    fn default() -> Self {
        Self::Progressive
    }
}

/// Session configuration, fixed for the lifetime of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    pub redaction_type: RedactionType,
    /// Visible-word percentage; meaningful only for
    /// [`RedactionType::Percentage`].
    #[serde(default)]
    pub percentage: u8,
    pub selected_chapters: Vec<String>,
    pub order: QuoteOrder,
    pub display_mode: DisplayMode,
    pub results_mode: ResultsMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            redaction_type: RedactionType::default(),
            percentage: 50,
            selected_chapters: Vec::new(),
            order: QuoteOrder::default(),
            display_mode: DisplayMode::default(),
            results_mode: ResultsMode::default(),
        }
    }
}

/// A word token with its visibility under the session's redaction plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibleWord {
    pub word: String,
    pub visible: bool,
}

/// A quote prepared for practice: normalized, tokenized, and redacted.
///
/// Built once at session start (never mutated after); a re-queued revision
/// reuses the same instance, mask included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeQuote {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub chapter_id: String,
    pub chapter_name: String,
    pub normalized_text: String,
    pub visible_words: Vec<VisibleWord>,
    pub total_words: usize,
    pub is_revision: bool,
}

impl RuntimeQuote {
    /// Hidden word tokens in original order.
    pub fn hidden_words(&self) -> Vec<&str> {
        self.visible_words
            .iter()
            .filter(|w| !w.visible)
            .map(|w| w.word.as_str())
            .collect()
    }

    /// Number of hidden (to-be-guessed) words.
    pub fn hidden_count(&self) -> usize {
        self.visible_words.iter().filter(|w| !w.visible).count()
    }
}

/// Scoring outcome for one hidden word. Exactly one of `correct`,
/// `fuzzy_match`, `incorrect` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResult {
    pub word: String,
    pub input: String,
    pub correct: bool,
    pub fuzzy_match: bool,
    pub incorrect: bool,
}

/// Attempt payload handed to the store, which assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttempt {
    pub used_hints: bool,
    pub total_words: usize,
    pub attempted_words: usize,
    pub correct_words: usize,
    pub results: Vec<WordResult>,
}

/// Persisted, append-only record of one marked quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: String,
    pub text_id: String,
    pub chapter_id: String,
    pub quote_id: String,
    pub timestamp: DateTime<Utc>,
    pub used_hints: bool,
    pub total_words: usize,
    pub attempted_words: usize,
    pub correct_words: usize,
    pub results: Vec<WordResult>,
}

/// Full trace of one marked quote within a session, handed to the results
/// review boundary on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub quote: RuntimeQuote,
    pub inputs: Vec<String>,
    pub results: Vec<WordResult>,
    pub used_hint: bool,
}

//! Core library for quote practice sessions.
//!
//! Provides:
//! - Punctuation normalization applied to quotes before tokenization
//! - Word-level answer matching (exact + Levenshtein-based fuzzy)
//! - Redaction planning (which words of a quote are hidden)
//! - The session engine (flip/mark/skip/revise state machine)
//! - Analytics rollups over persisted attempt records
//! - Shared types (Text, Quote, AttemptRecord, etc.) and the store port

pub mod analytics;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod redaction;
pub mod session;
pub mod store;
pub mod types;

pub use analytics::{compute_stats, text_analytics, AttemptStats, StatsBreakdown, TextAnalytics};
pub use error::{Result, SessionError};
pub use matching::{check_inputs, match_word, normalized_similarity, WordMatch};
pub use normalize::normalize;
pub use redaction::build_runtime_quote;
pub use session::{MarkOutcome, Phase, SessionEngine, SkipOutcome, REVEAL_COUNTDOWN_TICKS};
pub use store::{MemoryStore, Store};
pub use types::{
    AttemptRecord, Chapter, DisplayMode, NewAttempt, Quote, QuoteOrder, RedactionType,
    ResultsMode, RuntimeQuote, SessionResult, SessionSettings, Text, VisibleWord, WordResult,
};

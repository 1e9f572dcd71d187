//! API request/response types

use serde::{Deserialize, Serialize};

use quotedrill_core::session::SessionEngine;

// Re-export shared types from quotedrill-core
pub use quotedrill_core::analytics::TextAnalytics;
pub use quotedrill_core::session::{Phase, SkipOutcome};
pub use quotedrill_core::types::{
    AttemptRecord, Chapter, Quote, SessionResult, SessionSettings, Text, WordResult,
};

// === Text management ===

#[derive(Debug, Deserialize)]
pub struct CreateTextRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameTextRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TextListResponse {
    pub texts: Vec<Text>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteTextRequest {
    pub text: String,
}

// === Practice sessions ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub text_id: String,
    pub settings: SessionSettings,
}

/// One word slot on the card. `word` is withheld while the word is hidden
/// and the card has not been revealed or marked.
#[derive(Debug, Serialize)]
pub struct WordSlot {
    pub word: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub quote_id: String,
    pub chapter_id: String,
    pub chapter_name: String,
    pub is_revision: bool,
    pub total_words: usize,
    pub words: Vec<WordSlot>,
}

/// Snapshot of a session for the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub phase: Phase,
    pub position: usize,
    pub total: usize,
    pub quote: Option<QuoteView>,
    pub inputs: Vec<String>,
    pub revealed: bool,
    pub used_hint: bool,
    pub can_mark: bool,
    pub countdown: Option<u32>,
    /// Results of the most recent mark (empty while presenting).
    pub results: Vec<WordResult>,
    pub pending_revisions: usize,
    /// Full session trace, present once the session is complete.
    pub session_results: Option<Vec<SessionResult>>,
}

impl SessionView {
    pub fn from_engine(session_id: &str, engine: &SessionEngine) -> Self {
        let phase = engine.phase();
        let reveal_words = engine.revealed() || phase == Phase::Marked;

        let quote = engine.current_quote().map(|q| QuoteView {
            quote_id: q.id.clone(),
            chapter_id: q.chapter_id.clone(),
            chapter_name: q.chapter_name.clone(),
            is_revision: q.is_revision,
            total_words: q.total_words,
            words: q
                .visible_words
                .iter()
                .map(|w| WordSlot {
                    word: if w.visible || reveal_words {
                        Some(w.word.clone())
                    } else {
                        None
                    },
                    visible: w.visible,
                })
                .collect(),
        });

        let (position, total) = engine.progress();

        Self {
            session_id: session_id.to_string(),
            phase,
            position,
            total,
            quote,
            inputs: engine.inputs().to_vec(),
            revealed: engine.revealed(),
            used_hint: engine.used_hint(),
            can_mark: engine.can_mark(),
            countdown: engine.countdown(),
            results: engine.results().to_vec(),
            pending_revisions: engine.pending_revisions(),
            session_results: (phase == Phase::Complete)
                .then(|| engine.session_results().to_vec()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub index: usize,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkResponse {
    /// Every attempted word correct; the client fires the celebration.
    pub perfect: bool,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipResponse {
    pub outcome: SkipOutcome,
    pub session: SessionView,
}

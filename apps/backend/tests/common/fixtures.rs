//! Test data helpers.

use serde_json::{json, Value};

use quotedrill_backend::AppState;
use quotedrill_core::types::{Chapter, NewAttempt, Text};
use quotedrill_core::Store;

/// Seed a text with one chapter and the given quotes, returning the text
/// and its chapter.
pub fn seed_text(state: &AppState, name: &str, quotes: &[&str]) -> (Text, Chapter) {
    let text = state.db.create_text(name);
    let chapter = state.db.add_chapter(&text.id, "Chapter One").expect("text exists");
    for quote in quotes {
        state
            .db
            .add_quote(&text.id, &chapter.id, quote)
            .expect("chapter exists");
    }
    let text = state.db.get_text(&text.id).expect("text exists");
    (text, chapter)
}

/// Settings body for a full-redaction, ordered, relaxed session.
pub fn full_redaction_settings(chapter_id: &str, results_mode: &str) -> Value {
    json!({
        "redactionType": "full",
        "percentage": 0,
        "selectedChapters": [chapter_id],
        "order": "ordered",
        "displayMode": "relaxed",
        "resultsMode": results_mode,
    })
}

/// Write an attempt record directly, bypassing the session flow.
pub fn seed_attempt(
    state: &AppState,
    text_id: &str,
    chapter_id: &str,
    quote_id: &str,
    used_hints: bool,
    attempted: usize,
    correct: usize,
) {
    state.db.store_mut().save_attempt(
        text_id,
        chapter_id,
        quote_id,
        NewAttempt {
            used_hints,
            total_words: attempted,
            attempted_words: attempted,
            correct_words: correct,
            results: vec![],
        },
    );
}

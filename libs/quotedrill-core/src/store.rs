//! Store port consumed by the session engine and analytics.
//!
//! The engine never touches persistence directly; it talks to this trait so
//! callers can supply an in-memory fake in tests or wrap a real backing
//! store in an application.

use chrono::Utc;

use crate::types::{AttemptRecord, NewAttempt, Text};

/// The persistence surface the core needs: fetch a text, append an attempt,
/// read back all attempts.
pub trait Store {
    /// Fetch a text by id.
    fn get_text(&self, id: &str) -> Option<Text>;

    /// Append one attempt record, assigning it a unique id and timestamp.
    fn save_attempt(
        &mut self,
        text_id: &str,
        chapter_id: &str,
        quote_id: &str,
        attempt: NewAttempt,
    ) -> AttemptRecord;

    /// All attempt records, across texts, in insertion order.
    fn get_analytics(&self) -> Vec<AttemptRecord>;
}

/// In-memory store used by tests and the backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    texts: Vec<Text>,
    attempts: Vec<AttemptRecord>,
    next_attempt_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texts(texts: Vec<Text>) -> Self {
        Self { texts, ..Self::default() }
    }

    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    pub fn texts_mut(&mut self) -> &mut Vec<Text> {
        &mut self.texts
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    /// Drop every attempt belonging to a text. Attempt records are
    /// otherwise append-only; this is the bulk path used when a text
    /// itself is deleted.
    pub fn remove_attempts_for_text(&mut self, text_id: &str) {
        self.attempts.retain(|a| a.text_id != text_id);
    }
}

impl Store for MemoryStore {
    fn get_text(&self, id: &str) -> Option<Text> {
        self.texts.iter().find(|t| t.id == id).cloned()
    }

    fn save_attempt(
        &mut self,
        text_id: &str,
        chapter_id: &str,
        quote_id: &str,
        attempt: NewAttempt,
    ) -> AttemptRecord {
        self.next_attempt_id += 1;

        let record = AttemptRecord {
            id: self.next_attempt_id.to_string(),
            text_id: text_id.to_string(),
            chapter_id: chapter_id.to_string(),
            quote_id: quote_id.to_string(),
            timestamp: Utc::now(),
            used_hints: attempt.used_hints,
            total_words: attempt.total_words,
            attempted_words: attempt.attempted_words,
            correct_words: attempt.correct_words,
            results: attempt.results,
        };

        self.attempts.push(record.clone());
        record
    }

    fn get_analytics(&self) -> Vec<AttemptRecord> {
        self.attempts.clone()
    }
}

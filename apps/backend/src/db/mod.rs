//! In-memory store behind the core's `Store` port, plus the text/chapter/
//! quote CRUD the API exposes.
//!
//! Attempt records are append-only; the only bulk deletion path is
//! deleting a whole text, which drops its attempts with it.

use std::sync::{RwLock, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use quotedrill_core::store::{MemoryStore, Store};
use quotedrill_core::types::{AttemptRecord, Chapter, Quote, Text};

#[derive(Debug, Default)]
pub struct Database {
    store: RwLock<MemoryStore>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write access to the underlying store, for operations (like marking
    /// a quote) that go through the core's `Store` trait.
    pub fn store_mut(&self) -> RwLockWriteGuard<'_, MemoryStore> {
        self.store.write().expect("store lock")
    }

    pub fn list_texts(&self) -> Vec<Text> {
        self.store.read().expect("store lock").texts().to_vec()
    }

    pub fn get_text(&self, id: &str) -> Option<Text> {
        self.store.read().expect("store lock").get_text(id)
    }

    pub fn create_text(&self, name: &str) -> Text {
        let text = Text {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            chapters: Vec::new(),
            created_at: Utc::now(),
        };
        self.store_mut().texts_mut().push(text.clone());
        text
    }

    pub fn rename_text(&self, id: &str, name: &str) -> Option<Text> {
        let mut store = self.store_mut();
        let text = store.texts_mut().iter_mut().find(|t| t.id == id)?;
        text.name = name.to_string();
        Some(text.clone())
    }

    /// Delete a text and its attempt history. Returns false for an
    /// unknown id.
    pub fn delete_text(&self, id: &str) -> bool {
        let mut store = self.store_mut();
        let before = store.texts().len();
        store.texts_mut().retain(|t| t.id != id);
        let removed = store.texts().len() < before;
        if removed {
            store.remove_attempts_for_text(id);
        }
        removed
    }

    pub fn add_chapter(&self, text_id: &str, name: &str) -> Option<Chapter> {
        let mut store = self.store_mut();
        let text = store.texts_mut().iter_mut().find(|t| t.id == text_id)?;
        let chapter = Chapter {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quotes: Vec::new(),
        };
        text.chapters.push(chapter.clone());
        Some(chapter)
    }

    pub fn delete_chapter(&self, text_id: &str, chapter_id: &str) -> bool {
        let mut store = self.store_mut();
        let Some(text) = store.texts_mut().iter_mut().find(|t| t.id == text_id) else {
            return false;
        };
        let before = text.chapters.len();
        text.chapters.retain(|c| c.id != chapter_id);
        text.chapters.len() < before
    }

    pub fn add_quote(&self, text_id: &str, chapter_id: &str, quote_text: &str) -> Option<Quote> {
        let mut store = self.store_mut();
        let chapter = store
            .texts_mut()
            .iter_mut()
            .find(|t| t.id == text_id)?
            .chapters
            .iter_mut()
            .find(|c| c.id == chapter_id)?;

        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            text: quote_text.to_string(),
            created_at: Utc::now(),
        };
        chapter.quotes.push(quote.clone());
        Some(quote)
    }

    pub fn update_quote(
        &self,
        text_id: &str,
        chapter_id: &str,
        quote_id: &str,
        quote_text: &str,
    ) -> Option<Quote> {
        let mut store = self.store_mut();
        let quote = store
            .texts_mut()
            .iter_mut()
            .find(|t| t.id == text_id)?
            .chapters
            .iter_mut()
            .find(|c| c.id == chapter_id)?
            .quotes
            .iter_mut()
            .find(|q| q.id == quote_id)?;

        quote.text = quote_text.to_string();
        Some(quote.clone())
    }

    pub fn delete_quote(&self, text_id: &str, chapter_id: &str, quote_id: &str) -> bool {
        let mut store = self.store_mut();
        let Some(text) = store.texts_mut().iter_mut().find(|t| t.id == text_id) else {
            return false;
        };
        let Some(chapter) = text.chapters.iter_mut().find(|c| c.id == chapter_id) else {
            return false;
        };
        let before = chapter.quotes.len();
        chapter.quotes.retain(|q| q.id != quote_id);
        chapter.quotes.len() < before
    }

    pub fn attempts(&self) -> Vec<AttemptRecord> {
        self.store.read().expect("store lock").get_analytics()
    }
}

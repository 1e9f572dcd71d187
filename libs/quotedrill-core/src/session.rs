//! Practice session engine.
//!
//! Drives an ordered run through a set of redacted quotes: per-quote typed
//! inputs, flip/hint tracking, marking through the [`Store`], and a
//! revision queue for quotes the user wants a second pass at.
//!
//! The engine is an explicit state machine. Each quote moves through
//! `Presenting` (inputs open) to `Marked` (results shown, progressive mode
//! only) and on to the next quote; the session ends in `Complete`.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::matching::check_inputs;
use crate::redaction::build_runtime_quote;
use crate::store::Store;
use crate::types::{
    DisplayMode, NewAttempt, RedactionType, ResultsMode, RuntimeQuote, SessionResult,
    SessionSettings, Text, WordResult,
};

/// Countdown length for the timed display mode, in 1-second ticks.
/// The caller owns the actual timer and calls [`SessionEngine::tick`].
pub const REVEAL_COUNTDOWN_TICKS: u32 = 10;

/// Phase of the current quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Inputs are open; the quote has not been marked.
    Presenting,
    /// Results for the current quote are displayed (progressive mode).
    Marked,
    /// No quotes remain; the session is over.
    Complete,
}

/// What a mark produced.
#[derive(Debug, Clone)]
pub struct MarkOutcome {
    pub results: Vec<WordResult>,
    /// Every attempted word correct (and at least one attempted). Callers
    /// use this to fire the celebration effect; it has no effect on state.
    pub perfect: bool,
    pub phase: Phase,
}

/// Where a skip landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipOutcome {
    /// Moved on to another quote.
    Advanced,
    /// Nothing left and results mode is `end`: the session completed with
    /// whatever results had accumulated.
    Completed,
    /// Nothing left in progressive mode: the session was abandoned without
    /// a results review. Already-saved attempts stand.
    Exited,
}

/// A single practice session. Owns its quote list, queues, and per-quote
/// transient state exclusively; nothing here is shared between sessions.
#[derive(Debug)]
pub struct SessionEngine {
    text_id: String,
    settings: SessionSettings,
    quotes: Vec<RuntimeQuote>,
    current: usize,
    phase: Phase,
    inputs: Vec<String>,
    results: Vec<WordResult>,
    revealed: bool,
    used_hint: bool,
    countdown: Option<u32>,
    revision_queue: Vec<RuntimeQuote>,
    skipped: Vec<String>,
    session_results: Vec<SessionResult>,
}

impl SessionEngine {
    /// Build a session from a stored text and settings.
    ///
    /// Chapters are filtered to the selection and flattened in order; with
    /// randomized order the flattened list is shuffled once, at session
    /// start. Every RuntimeQuote is built eagerly here.
    pub fn start<R: Rng>(
        text: &Text,
        settings: SessionSettings,
        rng: &mut R,
    ) -> Result<Self> {
        if settings.selected_chapters.is_empty() {
            return Err(SessionError::NoChaptersSelected);
        }
        if settings.redaction_type == RedactionType::Percentage && settings.percentage > 100 {
            return Err(SessionError::InvalidPercentage { value: settings.percentage });
        }

        let mut pairs: Vec<(&crate::types::Chapter, &crate::types::Quote)> = text
            .chapters
            .iter()
            .filter(|ch| settings.selected_chapters.iter().any(|id| *id == ch.id))
            .flat_map(|ch| ch.quotes.iter().map(move |q| (ch, q)))
            .collect();

        if pairs.is_empty() {
            return Err(SessionError::NoQuotes);
        }

        if settings.order == crate::types::QuoteOrder::Randomized {
            pairs.shuffle(rng);
        }

        let quotes: Vec<RuntimeQuote> = pairs
            .into_iter()
            .map(|(ch, q)| build_runtime_quote(q, ch, &settings, rng))
            .collect();

        let mut engine = Self {
            text_id: text.id.clone(),
            settings,
            quotes,
            current: 0,
            phase: Phase::Presenting,
            inputs: Vec::new(),
            results: Vec::new(),
            revealed: false,
            used_hint: false,
            countdown: None,
            revision_queue: Vec::new(),
            skipped: Vec::new(),
            session_results: Vec::new(),
        };
        engine.begin_quote();
        Ok(engine)
    }

    /// Reset per-quote transient state for the quote at `current`.
    fn begin_quote(&mut self) {
        self.phase = Phase::Presenting;
        self.inputs = vec![String::new(); self.quotes[self.current].hidden_count()];
        self.results.clear();
        self.revealed = false;
        self.used_hint = false;
        self.countdown = match self.settings.display_mode {
            DisplayMode::Timed => Some(REVEAL_COUNTDOWN_TICKS),
            DisplayMode::Relaxed => None,
        };
    }

    /// Set the typed value for one hidden-word slot.
    pub fn set_input(&mut self, index: usize, value: String) -> Result<()> {
        if self.phase != Phase::Presenting {
            return Err(SessionError::WrongPhase { action: "input" });
        }
        let slot = self
            .inputs
            .get_mut(index)
            .ok_or(SessionError::InputOutOfRange { index })?;
        *slot = value;
        Ok(())
    }

    /// Manually flip the card to the answer side. Counts as a hint; the
    /// hint flag stays set for the rest of this quote's attempt even if
    /// the card is concealed again. Cancels any running countdown.
    pub fn flip(&mut self) -> Result<()> {
        if self.phase != Phase::Presenting {
            return Err(SessionError::WrongPhase { action: "flip" });
        }
        self.revealed = true;
        self.used_hint = true;
        self.countdown = None;
        Ok(())
    }

    /// Flip back to the quote side (hold-to-peek). Does not reset the hint
    /// flag; marking is unavailable until the card is revealed again.
    pub fn conceal(&mut self) -> Result<()> {
        if self.phase != Phase::Presenting {
            return Err(SessionError::WrongPhase { action: "conceal" });
        }
        self.revealed = false;
        Ok(())
    }

    /// Advance the timed-mode countdown by one tick. Reaching zero reveals
    /// the card automatically; an auto-reveal is not a hint. A tick with no
    /// countdown running (already revealed, relaxed mode, or the quote has
    /// changed) is a no-op so a stale timer cannot fire against a later
    /// quote.
    pub fn tick(&mut self) {
        if self.phase != Phase::Presenting {
            return;
        }
        if let Some(remaining) = self.countdown {
            if remaining <= 1 {
                self.countdown = None;
                self.revealed = true;
            } else {
                self.countdown = Some(remaining - 1);
            }
        }
    }

    /// Whether marking is currently allowed: the card has been revealed and
    /// every hidden-word input is non-empty.
    pub fn can_mark(&self) -> bool {
        self.phase == Phase::Presenting
            && self.revealed
            && self.inputs.iter().all(|i| !i.trim().is_empty())
    }

    /// Score the current quote's inputs, persist one attempt record, and
    /// either advance (`end` mode) or move to `Marked` (`progressive`).
    pub fn mark(&mut self, store: &mut dyn Store) -> Result<MarkOutcome> {
        if self.phase != Phase::Presenting {
            return Err(SessionError::WrongPhase { action: "mark" });
        }
        if !self.can_mark() {
            return Err(SessionError::MarkNotReady);
        }

        let quote = self.quotes[self.current].clone();
        let hidden = quote.hidden_words();
        let results = check_inputs(&self.inputs, &hidden);

        let attempted = hidden.len();
        let correct = results.iter().filter(|r| r.correct).count();
        let perfect = attempted > 0 && correct == attempted;

        store.save_attempt(
            &self.text_id,
            &quote.chapter_id,
            &quote.id,
            NewAttempt {
                used_hints: self.used_hint,
                total_words: quote.total_words,
                attempted_words: attempted,
                correct_words: correct,
                results: results.clone(),
            },
        );

        self.session_results.push(SessionResult {
            quote,
            inputs: self.inputs.clone(),
            results: results.clone(),
            used_hint: self.used_hint,
        });
        self.results = results.clone();

        match self.settings.results_mode {
            ResultsMode::End => self.advance_or_complete(),
            ResultsMode::Progressive => self.phase = Phase::Marked,
        }

        Ok(MarkOutcome { results, perfect, phase: self.phase })
    }

    /// Move past the current marked quote: next quote in the main list,
    /// else drain the revision queue into the main list, else complete.
    pub fn next(&mut self) -> Result<Phase> {
        if self.phase != Phase::Marked {
            return Err(SessionError::WrongPhase { action: "next" });
        }
        self.advance_or_complete();
        Ok(self.phase)
    }

    /// Queue the current quote for another pass later in this session
    /// (same redaction mask), then advance as `next` would.
    pub fn revise_later(&mut self) -> Result<Phase> {
        if self.phase != Phase::Marked {
            return Err(SessionError::WrongPhase { action: "revise later" });
        }
        let mut quote = self.quotes[self.current].clone();
        quote.is_revision = true;
        self.revision_queue.push(quote);

        self.advance_or_complete();
        Ok(self.phase)
    }

    /// Skip the current quote without marking it. The quote id is tracked;
    /// no attempt is persisted.
    pub fn skip(&mut self) -> Result<SkipOutcome> {
        if self.phase != Phase::Presenting {
            return Err(SessionError::WrongPhase { action: "skip" });
        }
        self.skipped.push(self.quotes[self.current].id.clone());

        if self.current + 1 < self.quotes.len() || !self.revision_queue.is_empty() {
            self.advance_or_complete();
            return Ok(SkipOutcome::Advanced);
        }

        self.phase = Phase::Complete;
        match self.settings.results_mode {
            ResultsMode::End => Ok(SkipOutcome::Completed),
            ResultsMode::Progressive => Ok(SkipOutcome::Exited),
        }
    }

    fn advance_or_complete(&mut self) {
        if self.current + 1 < self.quotes.len() {
            self.current += 1;
            self.begin_quote();
        } else if !self.revision_queue.is_empty() {
            let queued = std::mem::take(&mut self.revision_queue);
            self.quotes.extend(queued);
            self.current += 1;
            self.begin_quote();
        } else {
            self.phase = Phase::Complete;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn text_id(&self) -> &str {
        &self.text_id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The quote currently presented, if the session is still running.
    pub fn current_quote(&self) -> Option<&RuntimeQuote> {
        if self.phase == Phase::Complete {
            None
        } else {
            self.quotes.get(self.current)
        }
    }

    /// 1-based position and total count of the (possibly grown) quote list.
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.quotes.len())
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Results of the most recent mark (empty while presenting).
    pub fn results(&self) -> &[WordResult] {
        &self.results
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn used_hint(&self) -> bool {
        self.used_hint
    }

    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn pending_revisions(&self) -> usize {
        self.revision_queue.len()
    }

    /// Ordered results accumulated so far.
    pub fn session_results(&self) -> &[SessionResult] {
        &self.session_results
    }

    /// Consume the session and hand the full ordered trace to the results
    /// review boundary.
    pub fn into_results(self) -> Vec<SessionResult> {
        self.session_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{Chapter, Quote, QuoteOrder};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quote(id: &str, text: &str) -> Quote {
        Quote { id: id.into(), text: text.into(), created_at: Utc::now() }
    }

    fn sample_text() -> Text {
        Text {
            id: "t1".into(),
            name: "Sample".into(),
            chapters: vec![
                Chapter {
                    id: "ch1".into(),
                    name: "Chapter One".into(),
                    quotes: vec![
                        quote("q1", "alpha beta gamma"),
                        quote("q2", "delta epsilon zeta"),
                    ],
                },
                Chapter {
                    id: "ch2".into(),
                    name: "Chapter Two".into(),
                    quotes: vec![quote("q3", "eta theta iota")],
                },
            ],
            created_at: Utc::now(),
        }
    }

    fn settings(results_mode: ResultsMode) -> SessionSettings {
        SessionSettings {
            redaction_type: RedactionType::Full,
            percentage: 0,
            selected_chapters: vec!["ch1".into()],
            order: QuoteOrder::Ordered,
            display_mode: DisplayMode::Relaxed,
            results_mode,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Type the current quote's hidden words, optionally corrupting one.
    fn fill_inputs(engine: &mut SessionEngine, wrong_index: Option<usize>) {
        let hidden: Vec<String> = engine
            .current_quote()
            .unwrap()
            .hidden_words()
            .iter()
            .map(|w| w.to_string())
            .collect();
        for (i, word) in hidden.into_iter().enumerate() {
            let value = if wrong_index == Some(i) { "xxxxxx".to_string() } else { word };
            engine.set_input(i, value).unwrap();
        }
    }

    #[test]
    fn start_rejects_empty_chapter_selection() {
        let mut settings = settings(ResultsMode::End);
        settings.selected_chapters.clear();
        let err = SessionEngine::start(&sample_text(), settings, &mut rng());
        assert_eq!(err.unwrap_err(), SessionError::NoChaptersSelected);
    }

    #[test]
    fn start_rejects_selection_with_no_quotes() {
        let mut settings = settings(ResultsMode::End);
        settings.selected_chapters = vec!["missing".into()];
        let err = SessionEngine::start(&sample_text(), settings, &mut rng());
        assert_eq!(err.unwrap_err(), SessionError::NoQuotes);
    }

    #[test]
    fn start_rejects_percentage_out_of_range() {
        let mut settings = settings(ResultsMode::End);
        settings.redaction_type = RedactionType::Percentage;
        settings.percentage = 101;
        let err = SessionEngine::start(&sample_text(), settings, &mut rng());
        assert_eq!(
            err.unwrap_err(),
            SessionError::InvalidPercentage { value: 101 }
        );
    }

    #[test]
    fn ordered_session_presents_chapters_in_order() {
        let mut settings = settings(ResultsMode::End);
        settings.selected_chapters = vec!["ch1".into(), "ch2".into()];
        let engine = SessionEngine::start(&sample_text(), settings, &mut rng()).unwrap();

        assert_eq!(engine.current_quote().unwrap().id, "q1");
        assert_eq!(engine.progress(), (1, 3));
    }

    #[test]
    fn randomized_order_is_a_permutation() {
        let mut settings = settings(ResultsMode::End);
        settings.selected_chapters = vec!["ch1".into(), "ch2".into()];
        settings.order = QuoteOrder::Randomized;

        let mut r = rng();
        let engine = SessionEngine::start(&sample_text(), settings, &mut r).unwrap();
        let (_, total) = engine.progress();
        assert_eq!(total, 3);
    }

    #[test]
    fn inputs_sized_to_hidden_count() {
        let engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        assert_eq!(engine.inputs().len(), 3);
        assert_eq!(
            engine.inputs().len(),
            engine.current_quote().unwrap().hidden_count()
        );
    }

    #[test]
    fn mark_requires_reveal() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        fill_inputs(&mut engine, None);
        assert!(!engine.can_mark());
        assert_eq!(
            engine.mark(&mut store).unwrap_err(),
            SessionError::MarkNotReady
        );

        engine.flip().unwrap();
        assert!(engine.can_mark());
    }

    #[test]
    fn mark_requires_complete_inputs() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        engine.set_input(0, "alpha".into()).unwrap();
        assert!(!engine.can_mark());
        assert_eq!(
            engine.mark(&mut store).unwrap_err(),
            SessionError::MarkNotReady
        );
    }

    #[test]
    fn end_mode_skip_then_mark_completes_with_one_attempt() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        assert_eq!(engine.skip().unwrap(), SkipOutcome::Advanced);
        assert_eq!(engine.current_quote().unwrap().id, "q2");

        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        let outcome = engine.mark(&mut store).unwrap();

        assert!(outcome.perfect);
        assert_eq!(outcome.phase, Phase::Complete);
        assert_eq!(store.attempts().len(), 1);
        assert_eq!(store.attempts()[0].quote_id, "q2");
        assert_eq!(store.attempts()[0].correct_words, 3);
        assert_eq!(engine.session_results().len(), 1);
        assert_eq!(engine.skipped(), ["q1"]);
    }

    #[test]
    fn attempt_record_carries_hint_flag() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();

        assert!(store.attempts()[0].used_hints);
    }

    #[test]
    fn progressive_mark_moves_to_marked_phase() {
        let mut engine = SessionEngine::start(
            &sample_text(),
            settings(ResultsMode::Progressive),
            &mut rng(),
        )
        .unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        fill_inputs(&mut engine, Some(1));
        let outcome = engine.mark(&mut store).unwrap();

        assert_eq!(outcome.phase, Phase::Marked);
        assert!(!outcome.perfect);
        assert_eq!(engine.results().len(), 3);
        assert!(engine.results()[1].incorrect);
    }

    #[test]
    fn revise_later_reappears_with_identical_mask() {
        let mut settings = settings(ResultsMode::Progressive);
        settings.redaction_type = RedactionType::Percentage;
        settings.percentage = 40;
        let text = Text {
            id: "t1".into(),
            name: "Sample".into(),
            chapters: vec![Chapter {
                id: "ch1".into(),
                name: "Chapter One".into(),
                quotes: vec![
                    quote("q1", "one two three four five six seven eight"),
                    quote("q2", "nine ten eleven twelve"),
                ],
            }],
            created_at: Utc::now(),
        };

        let mut engine = SessionEngine::start(&text, settings, &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        let original_mask: Vec<bool> = engine
            .current_quote()
            .unwrap()
            .visible_words
            .iter()
            .map(|w| w.visible)
            .collect();

        engine.flip().unwrap();
        fill_inputs(&mut engine, Some(0));
        engine.mark(&mut store).unwrap();
        assert_eq!(engine.revise_later().unwrap(), Phase::Presenting);
        assert_eq!(engine.pending_revisions(), 1);

        // Work through q2; the revision queue then drains into the list.
        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();
        assert_eq!(engine.next().unwrap(), Phase::Presenting);

        let revisit = engine.current_quote().unwrap();
        assert_eq!(revisit.id, "q1");
        assert!(revisit.is_revision);
        let revisit_mask: Vec<bool> =
            revisit.visible_words.iter().map(|w| w.visible).collect();
        assert_eq!(revisit_mask, original_mask);

        // Finishing the revision pass completes the session.
        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();
        assert_eq!(engine.next().unwrap(), Phase::Complete);
        assert_eq!(store.attempts().len(), 3);
        assert_eq!(engine.session_results().len(), 3);
    }

    #[test]
    fn revise_on_last_quote_drains_queue_immediately() {
        let mut engine = SessionEngine::start(
            &sample_text(),
            settings(ResultsMode::Progressive),
            &mut rng(),
        )
        .unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();
        engine.next().unwrap();

        // Mark the final quote imperfectly and defer it.
        engine.flip().unwrap();
        fill_inputs(&mut engine, Some(0));
        engine.mark(&mut store).unwrap();
        assert_eq!(engine.revise_later().unwrap(), Phase::Presenting);

        let revisit = engine.current_quote().unwrap();
        assert_eq!(revisit.id, "q2");
        assert!(revisit.is_revision);
    }

    #[test]
    fn skip_on_last_quote_progressive_exits_without_completing() {
        let mut engine = SessionEngine::start(
            &sample_text(),
            settings(ResultsMode::Progressive),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(engine.skip().unwrap(), SkipOutcome::Advanced);
        assert_eq!(engine.skip().unwrap(), SkipOutcome::Exited);
        assert_eq!(engine.phase(), Phase::Complete);
        assert!(engine.session_results().is_empty());
    }

    #[test]
    fn skip_on_last_quote_end_mode_completes() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();

        assert_eq!(engine.skip().unwrap(), SkipOutcome::Completed);
        assert_eq!(engine.session_results().len(), 1);
        assert_eq!(engine.into_results().len(), 1);
    }

    #[test]
    fn skip_on_last_quote_drains_revision_queue_first() {
        let mut engine = SessionEngine::start(
            &sample_text(),
            settings(ResultsMode::Progressive),
            &mut rng(),
        )
        .unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        fill_inputs(&mut engine, Some(0));
        engine.mark(&mut store).unwrap();
        engine.revise_later().unwrap();

        // Skipping the last fresh quote must still visit the queued one.
        assert_eq!(engine.skip().unwrap(), SkipOutcome::Advanced);
        assert!(engine.current_quote().unwrap().is_revision);
    }

    #[test]
    fn hint_flag_is_sticky_across_conceal() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();

        engine.flip().unwrap();
        engine.conceal().unwrap();
        assert!(engine.used_hint());
        assert!(!engine.revealed());

        // Concealed again means marking is off until the next flip.
        fill_inputs(&mut engine, None);
        assert!(!engine.can_mark());
    }

    #[test]
    fn hint_flag_resets_per_quote() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();

        assert_eq!(engine.current_quote().unwrap().id, "q2");
        assert!(!engine.used_hint());
        assert!(!engine.revealed());
    }

    #[test]
    fn timed_countdown_auto_reveals_without_hint() {
        let mut settings = settings(ResultsMode::End);
        settings.display_mode = DisplayMode::Timed;
        let mut engine = SessionEngine::start(&sample_text(), settings, &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        assert_eq!(engine.countdown(), Some(REVEAL_COUNTDOWN_TICKS));
        for _ in 0..REVEAL_COUNTDOWN_TICKS - 1 {
            engine.tick();
        }
        assert!(!engine.revealed());

        engine.tick();
        assert!(engine.revealed());
        assert!(!engine.used_hint());
        assert_eq!(engine.countdown(), None);

        // Stale ticks after the reveal are inert.
        engine.tick();
        assert!(engine.revealed());

        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();
        assert!(!store.attempts()[0].used_hints);
    }

    #[test]
    fn manual_flip_cancels_countdown() {
        let mut settings = settings(ResultsMode::End);
        settings.display_mode = DisplayMode::Timed;
        let mut engine = SessionEngine::start(&sample_text(), settings, &mut rng()).unwrap();

        engine.tick();
        engine.flip().unwrap();
        assert_eq!(engine.countdown(), None);
        assert!(engine.used_hint());
    }

    #[test]
    fn countdown_restarts_on_quote_change() {
        let mut settings = settings(ResultsMode::End);
        settings.display_mode = DisplayMode::Timed;
        let mut engine = SessionEngine::start(&sample_text(), settings, &mut rng()).unwrap();

        engine.tick();
        engine.tick();
        engine.skip().unwrap();
        assert_eq!(engine.countdown(), Some(REVEAL_COUNTDOWN_TICKS));
    }

    #[test]
    fn quote_with_no_hidden_words_marks_vacuously() {
        let text = Text {
            id: "t1".into(),
            name: "Sample".into(),
            chapters: vec![Chapter {
                id: "ch1".into(),
                name: "Chapter One".into(),
                quotes: vec![quote("q1", "   ")],
            }],
            created_at: Utc::now(),
        };
        let mut engine =
            SessionEngine::start(&text, settings(ResultsMode::End), &mut rng()).unwrap();
        let mut store = MemoryStore::new();

        engine.flip().unwrap();
        assert!(engine.can_mark());
        let outcome = engine.mark(&mut store).unwrap();

        // Zero attempted words: no celebration, but the record is written.
        assert!(!outcome.perfect);
        assert_eq!(store.attempts()[0].attempted_words, 0);
        assert_eq!(engine.phase(), Phase::Complete);
    }

    #[test]
    fn actions_guarded_by_phase() {
        let mut engine = SessionEngine::start(
            &sample_text(),
            settings(ResultsMode::Progressive),
            &mut rng(),
        )
        .unwrap();
        let mut store = MemoryStore::new();

        assert_eq!(
            engine.next().unwrap_err(),
            SessionError::WrongPhase { action: "next" }
        );

        engine.flip().unwrap();
        fill_inputs(&mut engine, None);
        engine.mark(&mut store).unwrap();

        assert_eq!(
            engine.skip().unwrap_err(),
            SessionError::WrongPhase { action: "skip" }
        );
        assert_eq!(
            engine.set_input(0, "late".into()).unwrap_err(),
            SessionError::WrongPhase { action: "input" }
        );
        assert_eq!(
            engine.mark(&mut store).unwrap_err(),
            SessionError::WrongPhase { action: "mark" }
        );
    }

    #[test]
    fn input_index_bounds_checked() {
        let mut engine =
            SessionEngine::start(&sample_text(), settings(ResultsMode::End), &mut rng()).unwrap();
        assert_eq!(
            engine.set_input(99, "x".into()).unwrap_err(),
            SessionError::InputOutOfRange { index: 99 }
        );
    }
}

//! Practice session controller
//!
//! Owns one profile's loaded state and drives the mastery engine in the order
//! the front-end needs: snapshot for undo, score the read, persist, reward,
//! rotate sets, then choose the next word. Storage failures are logged and
//! never interrupt practice; the in-memory state stays authoritative.

mod clock;

use rand::Rng;
use rand::seq::SliceRandom;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::mastery::report::{WEAK_WORDS_LIMIT, word_accuracy};
use crate::mastery::{
    self, ActiveSet, MasteryMap, ProgressStats, ProgressSummary, ReadingTally, SetAdvance,
    TileTone, UndoSnapshot, WeakWord, WordProgress, active_set::mastered_in_set,
    progress::progress_or_new,
};
use crate::rewards;
use crate::store::{ProfileStore, StorageBackend, StoreError};
use crate::vocab::Vocabulary;

/// How the active set changed after a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetChange {
    /// A set was created because enough unknown words piled up
    Started { set_number: u32 },
    /// The finished set was replaced by a full one
    Next { set_number: u32 },
    /// The finished set was replaced by an undersized final one
    Final { set_number: u32 },
    /// Every attempted word is mastered
    Finished,
}

/// Result of scoring the current word
#[derive(Debug, Clone, PartialEq)]
pub struct MarkOutcome {
    pub word: String,
    pub correct: bool,
    pub progress: WordProgress,
    pub newly_mastered: bool,
    pub set_change: Option<SetChange>,
    pub next_word: Option<String>,
    pub tv_minutes: u32,
}

/// Result of an undo request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The last read was reverted; the word is shown again
    Restored { word: String },
    /// The window had closed; nothing changed
    Expired,
    /// There was nothing to undo
    Nothing,
}

/// One profile's practice state plus the collaborators that feed it
pub struct Session<B, C, R> {
    store: ProfileStore<B>,
    vocabulary: Vocabulary,
    clock: C,
    rng: R,
    profile: String,
    map: MasteryMap,
    active_set: Option<ActiveSet>,
    summary: ProgressSummary,
    tally: ReadingTally,
    tv_minutes: u32,
    undo: Option<UndoSnapshot>,
    current_word: Option<String>,
}

impl<B: StorageBackend, C: Clock, R: Rng> Session<B, C, R> {
    /// Load `profile` and pick the first word
    pub fn open(
        store: ProfileStore<B>,
        profile: &str,
        vocabulary: Vocabulary,
        clock: C,
        rng: R,
    ) -> Self {
        let mut session = Self {
            store,
            vocabulary,
            clock,
            rng,
            profile: String::new(),
            map: MasteryMap::new(),
            active_set: None,
            summary: ProgressSummary::default(),
            tally: ReadingTally::default(),
            tv_minutes: 0,
            undo: None,
            current_word: None,
        };
        session.load_profile(profile);
        session
    }

    /// Swap to another learner; any pending undo is dropped
    pub fn switch_profile(&mut self, profile: &str) {
        if profile == self.profile {
            return;
        }
        tracing::info!(from = %self.profile, to = %profile, "Switching profile");
        self.load_profile(profile);
    }

    fn load_profile(&mut self, profile: &str) {
        self.profile = profile.to_string();
        self.map = self.store.load_mastery_map(profile);
        self.active_set = self.store.load_active_set(profile);
        self.summary = self.store.load_progress_summary(profile);
        self.tally = self.store.load_reading_tally(profile);
        self.tv_minutes = self.store.load_tv_minutes(profile);

        self.undo = None;
        if self.store.load_undo_snapshot(profile).is_some() {
            let result = self.store.clear_undo_snapshot(profile);
            self.log_failure("undo snapshot", result);
        }

        let now = self.clock.now_ms();
        if let Some((set, summary)) = mastery::ensure_active_set(
            &self.map,
            self.active_set.as_ref(),
            &self.summary,
            self.vocabulary.words(),
            now,
        ) {
            self.active_set = Some(set);
            self.summary = summary;
            self.persist_set();
        }

        tracing::debug!(
            profile = %self.profile,
            words = self.map.len(),
            set = ?self.active_set.as_ref().map(|s| s.set_number),
            "Loaded profile"
        );
        self.current_word = self.choose_next_word();
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn mastery_map(&self) -> &MasteryMap {
        &self.map
    }

    pub fn active_set(&self) -> Option<&ActiveSet> {
        self.active_set.as_ref()
    }

    pub fn summary(&self) -> &ProgressSummary {
        &self.summary
    }

    pub fn tally(&self) -> &ReadingTally {
        &self.tally
    }

    pub fn tv_minutes(&self) -> u32 {
        self.tv_minutes
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn store(&self) -> &ProfileStore<B> {
        &self.store
    }

    /// Give back the store, e.g. to reopen it
    pub fn into_store(self) -> ProfileStore<B> {
        self.store
    }

    /// Score the word on screen
    pub fn mark(&mut self, correct: bool) -> Option<MarkOutcome> {
        let word = self.current_word.clone()?;
        let now = self.clock.now_ms();

        let snapshot = UndoSnapshot::capture(
            &self.map,
            self.active_set.as_ref(),
            &self.summary,
            &word,
            correct,
            now,
        );
        let result = self.store.save_undo_snapshot(&self.profile, &snapshot);
        self.log_failure("undo snapshot", result);
        self.undo = Some(snapshot);

        let before = progress_or_new(&self.map, &word);
        let progress = before.apply_outcome(correct, now);
        let newly_mastered = progress.mastered && !before.mastered;
        self.map.insert(word.clone(), progress.clone());
        let result = self.store.save_mastery_map(&self.profile, &self.map);
        self.log_failure("mastery map", result);

        self.tally.record(&word, correct);
        let result = self.store.save_reading_tally(&self.profile, &self.tally);
        self.log_failure("reading tally", result);

        self.tv_minutes = rewards::apply_score(self.tv_minutes, correct);
        let result = self.store.save_tv_minutes(&self.profile, self.tv_minutes);
        self.log_failure("tv minutes", result);

        tracing::debug!(%word, correct, streak = progress.streak, "Scored read");
        if newly_mastered {
            tracing::info!(%word, "Word mastered");
        }

        let set_change = self.rotate_set(now);
        self.current_word = self.choose_next_word();

        Some(MarkOutcome {
            word,
            correct,
            progress,
            newly_mastered,
            set_change,
            next_word: self.current_word.clone(),
            tv_minutes: self.tv_minutes,
        })
    }

    fn rotate_set(&mut self, now: i64) -> Option<SetChange> {
        if mastery::is_active_set_completed(&self.map, self.active_set.as_ref()) {
            let words = self.vocabulary.words();
            let advance = mastery::advance_to_next_set(&self.map, &self.summary, words, now);
            let change = match &advance {
                SetAdvance::Next { set, .. } => SetChange::Next { set_number: set.set_number },
                SetAdvance::Final { set, .. } => SetChange::Final { set_number: set.set_number },
                SetAdvance::Finished => SetChange::Finished,
            };
            (self.active_set, self.summary) = advance.into_parts();
            self.persist_set();
            return Some(change);
        }

        if let Some(set) = &self.active_set {
            let mastered = mastered_in_set(&self.map, set) as u32;
            if mastered != self.summary.mastered_count {
                self.summary.mastered_count = mastered;
                let result = self.store.save_progress_summary(&self.profile, &self.summary);
                self.log_failure("progress summary", result);
            }
            return None;
        }

        let (set, summary) = mastery::ensure_active_set(
            &self.map,
            None,
            &self.summary,
            self.vocabulary.words(),
            now,
        )?;
        let set_number = set.set_number;
        self.active_set = Some(set);
        self.summary = summary;
        self.persist_set();
        Some(SetChange::Started { set_number })
    }

    /// Move on without scoring
    pub fn skip(&mut self) -> Option<&str> {
        let next = match &self.active_set {
            Some(set) => {
                let open: Vec<&String> = set
                    .words
                    .iter()
                    .filter(|w| !mastery::progress::is_mastered(&self.map, w))
                    .filter(|w| Some(w.as_str()) != self.current_word.as_deref())
                    .collect();
                open.choose(&mut self.rng).map(|w| w.to_string())
            }
            None => None,
        };
        self.current_word = next.or_else(|| self.choose_next_word());
        self.current_word.as_deref()
    }

    fn choose_next_word(&mut self) -> Option<String> {
        if let Some(word) =
            mastery::select_next_word(&self.map, self.active_set.as_ref(), &mut self.rng)
        {
            return Some(word.to_string());
        }
        self.vocabulary.pick_fresh(&self.map, &mut self.rng)
    }

    /// Revert the last read if it is still inside the undo window
    pub fn undo(&mut self) -> UndoOutcome {
        let Some(snapshot) = self.undo.take() else {
            return UndoOutcome::Nothing;
        };
        let result = self.store.clear_undo_snapshot(&self.profile);
        self.log_failure("undo snapshot", result);

        if snapshot.is_expired(self.clock.now_ms()) {
            tracing::debug!(word = %snapshot.word, "Undo window closed");
            return UndoOutcome::Expired;
        }

        (self.map, self.active_set, self.summary) = snapshot.restore(&self.map);
        let result = self.store.save_mastery_map(&self.profile, &self.map);
        self.log_failure("mastery map", result);
        self.persist_set();

        tracing::info!(word = %snapshot.word, correct = snapshot.correct, "Undid read");
        self.current_word = Some(snapshot.word.clone());
        UndoOutcome::Restored { word: snapshot.word }
    }

    /// Drop the undo snapshot once its window has closed. Returns whether
    /// one was dropped.
    pub fn expire_undo(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self.undo.as_ref().is_some_and(|s| s.is_expired(now)) {
            return false;
        }
        self.discard_undo();
        true
    }

    /// Milliseconds left to undo, if anything can be undone
    pub fn undo_remaining_ms(&self) -> Option<i64> {
        let now = self.clock.now_ms();
        self.undo.as_ref().filter(|s| !s.is_expired(now)).map(|s| s.remaining_ms(now))
    }

    fn discard_undo(&mut self) {
        if self.undo.take().is_some() {
            let result = self.store.clear_undo_snapshot(&self.profile);
            self.log_failure("undo snapshot", result);
        }
    }

    /// Start the current set over. Returns false when there is no set.
    pub fn reset_current_set(&mut self) -> bool {
        let Some(set) = &self.active_set else {
            return false;
        };
        tracing::info!(profile = %self.profile, set_id = %set.set_id, "Resetting current set");

        self.map = mastery::reset_current_set(&self.map, Some(set));
        self.summary.mastered_count = 0;
        let result = self.store.save_mastery_map(&self.profile, &self.map);
        self.log_failure("mastery map", result);
        let result = self.store.save_progress_summary(&self.profile, &self.summary);
        self.log_failure("progress summary", result);

        self.discard_undo();
        self.current_word = self.choose_next_word();
        true
    }

    /// Forget all progress for this profile. Minutes and the reading tally
    /// are kept.
    pub fn reset_all(&mut self) {
        tracing::info!(profile = %self.profile, "Resetting all progress");

        self.map = mastery::reset_all_mastery();
        self.active_set = None;
        self.summary = ProgressSummary::default();
        let result = self.store.save_mastery_map(&self.profile, &self.map);
        self.log_failure("mastery map", result);
        self.persist_set();

        self.discard_undo();
        self.current_word = self.choose_next_word();
    }

    pub fn stats(&self) -> ProgressStats {
        mastery::progress_stats(&self.map, self.active_set.as_ref(), &self.summary)
    }

    pub fn weak_words(&self) -> Vec<WeakWord> {
        mastery::weak_words(&self.map, &self.tally, WEAK_WORDS_LIMIT)
    }

    pub fn panel_words(&self) -> Vec<WordProgress> {
        mastery::panel_words(&self.map, self.active_set.as_ref(), &self.weak_words())
    }

    pub fn tile_tone(&self, progress: &WordProgress) -> TileTone {
        TileTone::classify(progress, word_accuracy(progress, &self.tally))
    }

    fn persist_set(&mut self) {
        let result = self.store.save_active_set(&self.profile, self.active_set.as_ref());
        self.log_failure("active set", result);
        let result = self.store.save_progress_summary(&self.profile, &self.summary);
        self.log_failure("progress summary", result);
    }

    fn log_failure(&self, what: &str, result: Result<(), StoreError>) {
        if let Err(e) = result {
            tracing::warn!(profile = %self.profile, error = %e, "Failed to save {what}");
        }
    }
}

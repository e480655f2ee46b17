//! Single-step undo of the last scored read
//!
//! The snapshot records the state before the read rather than trying to
//! invert it: a word's prior record may not have existed at all.

use serde::{Deserialize, Serialize};

use super::UNDO_TIMEOUT_MS;
use super::active_set::{ActiveSet, ProgressSummary};
use super::progress::{MasteryMap, WordProgress};

/// State captured right before a scored read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoSnapshot {
    /// Word that was scored
    pub word: String,

    /// Outcome that was applied
    pub correct: bool,

    /// The word's record before the read (`None` if it had none)
    pub prior_progress: Option<WordProgress>,

    /// Active set before the read
    pub prior_active_set: Option<ActiveSet>,

    /// Progress summary before the read
    pub prior_summary: ProgressSummary,

    /// Millisecond timestamp of the read
    pub timestamp: i64,
}

impl UndoSnapshot {
    /// Capture the state a read of `word` is about to change
    pub fn capture(
        map: &MasteryMap,
        set: Option<&ActiveSet>,
        summary: &ProgressSummary,
        word: &str,
        correct: bool,
        timestamp: i64,
    ) -> Self {
        Self {
            word: word.to_string(),
            correct,
            prior_progress: map.get(word).cloned(),
            prior_active_set: set.cloned(),
            prior_summary: summary.clone(),
            timestamp,
        }
    }

    /// Past the undo window
    pub fn is_expired(&self, now: i64) -> bool {
        now - self.timestamp > UNDO_TIMEOUT_MS
    }

    /// Milliseconds left in the undo window
    pub fn remaining_ms(&self, now: i64) -> i64 {
        (self.timestamp + UNDO_TIMEOUT_MS - now).clamp(0, UNDO_TIMEOUT_MS)
    }

    /// Rebuild the pre-read state from the current mastery map
    pub fn restore(&self, map: &MasteryMap) -> (MasteryMap, Option<ActiveSet>, ProgressSummary) {
        let mut restored = map.clone();
        match &self.prior_progress {
            Some(prior) => {
                restored.insert(self.word.clone(), prior.clone());
            }
            None => {
                restored.shift_remove(&self.word);
            }
        }

        (restored, self.prior_active_set.clone(), self.prior_summary.clone())
    }
}

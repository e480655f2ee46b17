//! Per-word progress records and word classification

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::MASTERY_STREAK_REQUIRED;

/// Attempt history for a single word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    /// The word this record tracks (also its key in the mastery map)
    pub word: String,

    /// Consecutive correct reads since the last miss
    pub streak: u32,

    /// Lifetime number of scored reads
    pub attempts: u32,

    /// Millisecond timestamp of the last scored read (0 = never)
    pub last_seen: i64,

    /// Set once the streak reaches the mastery threshold
    pub mastered: bool,
}

impl WordProgress {
    /// A fresh record for a word that has never been scored
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into(), streak: 0, attempts: 0, last_seen: 0, mastered: false }
    }

    /// Apply one scored read and return the updated record.
    ///
    /// A miss zeroes the streak but never clears `mastered`.
    #[must_use]
    pub fn apply_outcome(&self, correct: bool, timestamp: i64) -> Self {
        let mut updated = self.clone();
        updated.attempts += 1;
        updated.last_seen = timestamp;

        if correct {
            updated.streak += 1;
            if updated.streak >= MASTERY_STREAK_REQUIRED {
                updated.mastered = true;
            }
        } else {
            updated.streak = 0;
        }

        updated
    }

    /// Attempted at least once and not yet mastered
    pub fn is_unknown(&self) -> bool {
        self.attempts > 0 && !self.mastered
    }
}

/// Every word that has been scored at least once, in first-attempt order
pub type MasteryMap = IndexMap<String, WordProgress>;

/// Words from the vocabulary with no record yet, in vocabulary order
pub fn untested_words<'a, S: AsRef<str>>(map: &MasteryMap, vocabulary: &'a [S]) -> Vec<&'a str> {
    vocabulary.iter().map(|word| word.as_ref()).filter(|word| !map.contains_key(*word)).collect()
}

/// Attempted-but-unmastered words, the pool active sets are drawn from
pub fn unknown_words(map: &MasteryMap) -> Vec<&str> {
    map.values().filter(|wp| wp.is_unknown()).map(|wp| wp.word.as_str()).collect()
}

/// Number of mastered words across the whole map
pub fn mastered_count(map: &MasteryMap) -> usize {
    map.values().filter(|wp| wp.mastered).count()
}

/// Look up a word's record, or a fresh one if it has never been scored
pub fn progress_or_new(map: &MasteryMap, word: &str) -> WordProgress {
    map.get(word).cloned().unwrap_or_else(|| WordProgress::new(word))
}

/// Whether a word has a mastered record
pub fn is_mastered(map: &MasteryMap, word: &str) -> bool {
    map.get(word).is_some_and(|wp| wp.mastered)
}

//! Weak-word reporting and per-word display classification

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ACTIVE_SET_SIZE;
use super::active_set::ActiveSet;
use super::progress::{MasteryMap, WordProgress, progress_or_new};

/// Default length of the weak-word list
pub const WEAK_WORDS_LIMIT: usize = 20;

/// Lifetime read counts for one word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCount {
    pub attempts: u32,
    pub correct: u32,
}

impl ReadCount {
    /// Fraction of reads that were correct
    pub fn accuracy(&self) -> Option<f64> {
        (self.attempts > 0).then(|| self.correct as f64 / self.attempts as f64)
    }
}

/// Per-word read counts, independent of streaks and resets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingTally {
    pub words: HashMap<String, ReadCount>,
}

impl ReadingTally {
    /// Count one read of `word`
    pub fn record(&mut self, word: &str, correct: bool) {
        let count = self.words.entry(word.to_string()).or_default();
        count.attempts += 1;
        if correct {
            count.correct += 1;
        }
    }

    /// Read counts for a word, if it was ever read
    pub fn get(&self, word: &str) -> Option<&ReadCount> {
        self.words.get(word)
    }
}

/// A word in the weak-word list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeakWord {
    pub word: String,
    pub attempts: u32,
    pub correct: u32,
    pub accuracy: f64,
    pub streak: u32,
    pub mastered: bool,
}

/// Accuracy for a word: from the tally when it has reads, otherwise
/// estimated from the streak
pub fn word_accuracy(wp: &WordProgress, tally: &ReadingTally) -> f64 {
    if let Some(accuracy) = tally.get(&wp.word).and_then(ReadCount::accuracy) {
        return accuracy;
    }
    match (wp.attempts, wp.streak) {
        (0, _) => 1.0,
        (_, 0) => 0.0,
        (attempts, streak) => streak as f64 / attempts as f64,
    }
}

/// Attempted words, unmastered first, then least accurate first
pub fn weak_words(map: &MasteryMap, tally: &ReadingTally, limit: usize) -> Vec<WeakWord> {
    let mut weak: Vec<WeakWord> = map
        .values()
        .filter(|wp| wp.attempts > 0)
        .map(|wp| WeakWord {
            word: wp.word.clone(),
            attempts: wp.attempts,
            correct: tally.get(&wp.word).map(|c| c.correct).unwrap_or(0),
            accuracy: word_accuracy(wp, tally),
            streak: wp.streak,
            mastered: wp.mastered,
        })
        .collect();

    weak.sort_by(|a, b| a.mastered.cmp(&b.mastered).then(a.accuracy.total_cmp(&b.accuracy)));
    weak.truncate(limit);
    weak
}

/// Words for the side panel: the active set first, then weak words not
/// already shown, capped at one set's worth
pub fn panel_words(
    map: &MasteryMap,
    set: Option<&ActiveSet>,
    weak: &[WeakWord],
) -> Vec<WordProgress> {
    let active = set.map(|s| s.words.as_slice()).unwrap_or(&[]);
    let in_set = |word: &str| active.iter().any(|a| a == word);

    active
        .iter()
        .map(String::as_str)
        .chain(weak.iter().map(|w| w.word.as_str()).filter(|w| !in_set(w)))
        .take(ACTIVE_SET_SIZE)
        .map(|word| progress_or_new(map, word))
        .collect()
}

/// How a word should be coloured in the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileTone {
    Mastered,
    Untried,
    /// Attempted with no correct reads
    Failing,
    /// Streak of 3 or more
    NearMastery,
    /// Streak of 1 or 2
    Progressing,
    LowAccuracy,
    FairAccuracy,
    GoodAccuracy,
}

impl TileTone {
    /// Classify a word from its record and accuracy
    pub fn classify(wp: &WordProgress, accuracy: f64) -> Self {
        if wp.mastered {
            TileTone::Mastered
        } else if wp.attempts == 0 {
            TileTone::Untried
        } else if accuracy == 0.0 {
            TileTone::Failing
        } else if wp.streak >= 3 {
            TileTone::NearMastery
        } else if wp.streak >= 1 {
            TileTone::Progressing
        } else if accuracy < 0.7 {
            TileTone::LowAccuracy
        } else if accuracy < 0.9 {
            TileTone::FairAccuracy
        } else {
            TileTone::GoodAccuracy
        }
    }
}

//! Aggregate progress statistics

use serde::Serialize;

use super::ACTIVE_SET_SIZE;
use super::active_set::{ActiveSet, ProgressSummary, mastered_in_set};
use super::progress::{MasteryMap, mastered_count, unknown_words, untested_words};

/// Snapshot of the learner's progress for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    pub has_active_set: bool,
    pub set_number: u32,
    pub total_sets: u32,
    pub mastered_in_set: usize,
    pub total_in_set: usize,
    /// Mastered words across the whole map
    pub total_mastered: usize,
    /// Words with a record
    pub total_attempted: usize,
}

/// Compute display statistics. Set number and total fall back to 1 when a set
/// exists but the summary was never filled in.
pub fn progress_stats(
    map: &MasteryMap,
    set: Option<&ActiveSet>,
    summary: &ProgressSummary,
) -> ProgressStats {
    let lifetime = ProgressStats {
        total_mastered: mastered_count(map),
        total_attempted: map.len(),
        ..Default::default()
    };

    let Some(set) = set else {
        return lifetime;
    };

    ProgressStats {
        has_active_set: true,
        set_number: summary.set_number.max(1),
        total_sets: summary.total_sets.max(1),
        mastered_in_set: mastered_in_set(map, set),
        total_in_set: set.words.len(),
        ..lifetime
    }
}

/// Sets still needed to cover every unknown and untested word
pub fn estimate_total_sets<S: AsRef<str>>(map: &MasteryMap, vocabulary: &[S]) -> u32 {
    let remaining = unknown_words(map).len() + untested_words(map, vocabulary).len();
    remaining.div_ceil(ACTIVE_SET_SIZE) as u32
}

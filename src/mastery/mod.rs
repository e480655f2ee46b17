//! Word-mastery progression
//!
//! Pure functions over a learner's mastery map: scoring reads, classifying
//! words, rotating bounded practice sets through the vocabulary, choosing the
//! next word and undoing the last read. Nothing here performs I/O.

pub mod active_set;
pub mod progress;
pub mod report;
pub mod selection;
pub mod stats;
pub mod undo;

/// Consecutive correct reads needed to master a word
pub const MASTERY_STREAK_REQUIRED: u32 = 5;

/// Maximum number of words in an active set
pub const ACTIVE_SET_SIZE: usize = 12;

/// How long a scored read can be undone, in milliseconds
pub const UNDO_TIMEOUT_MS: i64 = 5_000;

pub use active_set::{
    ActiveSet, ProgressSummary, SetAdvance, advance_to_next_set, create_active_set,
    create_final_set, ensure_active_set, is_active_set_completed, reset_all_mastery,
    reset_current_set, should_create_active_set,
};
pub use progress::{MasteryMap, WordProgress, mastered_count, unknown_words, untested_words};
pub use report::{ReadingTally, TileTone, WeakWord, panel_words, weak_words};
pub use selection::{StreakTier, select_next_word};
pub use stats::{ProgressStats, estimate_total_sets, progress_stats};
pub use undo::UndoSnapshot;

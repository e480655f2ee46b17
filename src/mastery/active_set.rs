//! Active practice sets: creation, completion, advancing and resets

use serde::{Deserialize, Serialize};

use super::ACTIVE_SET_SIZE;
use super::progress::{MasteryMap, is_mastered, unknown_words, untested_words};
use super::stats::estimate_total_sets;

/// The bounded pool of words currently being drilled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSet {
    /// Unique identifier, derived from the set number and creation time
    pub set_id: String,

    /// Words in the set (at most `ACTIVE_SET_SIZE`)
    pub words: Vec<String>,

    /// Millisecond timestamp of creation
    pub created_at: i64,

    /// 1-based position of this set in the learner's journey
    pub set_number: u32,
}

impl ActiveSet {
    /// A set numbered `set_number`, created at `now`
    pub fn new(words: Vec<String>, set_number: u32, now: i64) -> Self {
        Self { set_id: format!("set_{}_{}", set_number, now), words, created_at: now, set_number }
    }

    /// Whether a word belongs to this set
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

/// Counters shown alongside the active set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSummary {
    /// Id of the active set, if any
    pub current_set_id: Option<String>,

    /// Number of the active set (0 when there is none)
    pub set_number: u32,

    /// Estimated number of sets in the learner's journey
    pub total_sets: u32,

    /// Mastered words within the active set
    pub mastered_count: u32,
}

impl ProgressSummary {
    /// Summary for a freshly created set
    pub fn for_new_set(set: &ActiveSet, total_sets: u32) -> Self {
        Self {
            current_set_id: Some(set.set_id.clone()),
            set_number: set.set_number,
            total_sets,
            mastered_count: 0,
        }
    }
}

/// Result of the set-advance policy once a set is finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetAdvance {
    /// A full next set was created
    Next { set: ActiveSet, summary: ProgressSummary },
    /// Fewer unknown words than a full set remain; they form a final set
    Final { set: ActiveSet, summary: ProgressSummary },
    /// No unknown words remain
    Finished,
}

impl SetAdvance {
    /// The active set and summary to persist after advancing
    pub fn into_parts(self) -> (Option<ActiveSet>, ProgressSummary) {
        match self {
            SetAdvance::Next { set, summary } | SetAdvance::Final { set, summary } => {
                (Some(set), summary)
            }
            SetAdvance::Finished => (None, ProgressSummary::default()),
        }
    }
}

/// A new set is only created when none exists and a full set's worth of
/// unknown words has accumulated
pub fn should_create_active_set(map: &MasteryMap, current: Option<&ActiveSet>) -> bool {
    current.is_none() && unknown_words(map).len() >= ACTIVE_SET_SIZE
}

/// Build a set from the first `ACTIVE_SET_SIZE` unknown words
pub fn create_active_set(map: &MasteryMap, set_number: u32, now: i64) -> ActiveSet {
    let words =
        unknown_words(map).into_iter().take(ACTIVE_SET_SIZE).map(str::to_string).collect();
    ActiveSet::new(words, set_number, now)
}

/// Build an undersized set holding every remaining unknown word
pub fn create_final_set(map: &MasteryMap, set_number: u32, now: i64) -> ActiveSet {
    let words = unknown_words(map).into_iter().map(str::to_string).collect();
    ActiveSet::new(words, set_number, now)
}

/// A populated set is complete once every word in it is mastered
pub fn is_active_set_completed(map: &MasteryMap, set: Option<&ActiveSet>) -> bool {
    match set {
        Some(set) if !set.words.is_empty() => set.words.iter().all(|w| is_mastered(map, w)),
        _ => false,
    }
}

/// Number of words in the set that are mastered
pub fn mastered_in_set(map: &MasteryMap, set: &ActiveSet) -> usize {
    set.words.iter().filter(|w| is_mastered(map, w)).count()
}

/// Decide what replaces a finished set
pub fn advance_to_next_set<S: AsRef<str>>(
    map: &MasteryMap,
    summary: &ProgressSummary,
    vocabulary: &[S],
    now: i64,
) -> SetAdvance {
    let unknown = unknown_words(map).len();
    let set_number = summary.set_number + 1;

    if unknown >= ACTIVE_SET_SIZE {
        let set = create_active_set(map, set_number, now);
        let summary = ProgressSummary::for_new_set(&set, estimate_total_sets(map, vocabulary));
        tracing::info!(set_id = %set.set_id, "Advancing to next practice set");
        SetAdvance::Next { set, summary }
    } else if unknown > 0 {
        let set = create_final_set(map, set_number, now);
        let summary = ProgressSummary::for_new_set(&set, set_number);
        tracing::info!(set_id = %set.set_id, words = unknown, "Advancing to final practice set");
        SetAdvance::Final { set, summary }
    } else {
        tracing::info!(
            untested = untested_words(map, vocabulary).len(),
            "All attempted words mastered"
        );
        SetAdvance::Finished
    }
}

/// Create a set on load if the gate allows it; returns `None` when nothing
/// should change
pub fn ensure_active_set<S: AsRef<str>>(
    map: &MasteryMap,
    current: Option<&ActiveSet>,
    summary: &ProgressSummary,
    vocabulary: &[S],
    now: i64,
) -> Option<(ActiveSet, ProgressSummary)> {
    if !should_create_active_set(map, current) {
        return None;
    }

    let set = create_active_set(map, summary.set_number + 1, now);
    let summary = ProgressSummary::for_new_set(&set, estimate_total_sets(map, vocabulary));
    tracing::info!(set_id = %set.set_id, "Created practice set");
    Some((set, summary))
}

/// Clear streak and mastery for the set's words, keeping attempts and
/// last-seen times
pub fn reset_current_set(map: &MasteryMap, set: Option<&ActiveSet>) -> MasteryMap {
    let mut updated = map.clone();
    let Some(set) = set else {
        return updated;
    };

    for word in &set.words {
        if let Some(wp) = updated.get_mut(word) {
            wp.streak = 0;
            wp.mastered = false;
        }
    }

    updated
}

/// Wipe all progress
pub fn reset_all_mastery() -> MasteryMap {
    MasteryMap::new()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::mastery::progress::WordProgress;

    fn missed(word: &str) -> WordProgress {
        WordProgress::new(word).apply_outcome(false, 100)
    }

    fn mastered(word: &str) -> WordProgress {
        (0..5).fold(WordProgress::new(word), |wp, t| wp.apply_outcome(true, t))
    }

    fn map_of(entries: Vec<WordProgress>) -> MasteryMap {
        entries.into_iter().map(|wp| (wp.word.clone(), wp)).collect()
    }

    fn unknown_map(n: usize) -> MasteryMap {
        map_of((0..n).map(|i| missed(&format!("w{i:02}"))).collect())
    }

    #[test]
    fn twelve_unknown_words_trigger_a_set() {
        let map = unknown_map(12);
        assert!(should_create_active_set(&map, None));

        let set = create_active_set(&map, 1, 5_000);
        assert_eq!(set.words.len(), 12);
        assert!(set.words.iter().all(|w| map.contains_key(w)));
        assert_eq!(set.set_number, 1);
        assert_eq!(set.set_id, "set_1_5000");
        assert_eq!(set.created_at, 5_000);
    }

    #[test]
    fn eleven_unknown_words_do_not_trigger_a_set() {
        assert!(!should_create_active_set(&unknown_map(11), None));
    }

    #[test]
    fn existing_set_blocks_creation() {
        let map = unknown_map(30);
        let set = create_active_set(&map, 1, 0);
        assert!(!should_create_active_set(&map, Some(&set)));
    }

    #[test]
    fn create_takes_at_most_capacity() {
        let map = unknown_map(20);
        let set = create_active_set(&map, 2, 0);
        assert_eq!(set.words.len(), ACTIVE_SET_SIZE);
        assert_eq!(set.words[0], "w00");
    }

    #[test]
    fn set_with_one_unmastered_word_is_incomplete() {
        let map = map_of(vec![mastered("a"), mastered("b"), missed("c")]);
        let set = ActiveSet::new(vec!["a".into(), "b".into(), "c".into()], 1, 0);
        assert!(!is_active_set_completed(&map, Some(&set)));
        assert_eq!(mastered_in_set(&map, &set), 2);
    }

    #[test]
    fn set_with_untried_word_is_incomplete() {
        let map = map_of(vec![mastered("a")]);
        let set = ActiveSet::new(vec!["a".into(), "b".into()], 1, 0);
        assert!(!is_active_set_completed(&map, Some(&set)));
    }

    #[test]
    fn empty_or_missing_set_is_never_complete() {
        let map = map_of(vec![mastered("a")]);
        let empty = ActiveSet::new(Vec::new(), 1, 0);
        assert!(!is_active_set_completed(&map, Some(&empty)));
        assert!(!is_active_set_completed(&map, None));
    }

    #[test]
    fn advance_with_full_pool_creates_next_set() {
        let map = unknown_map(15);
        let summary = ProgressSummary { set_number: 3, ..Default::default() };
        let vocab: Vec<String> = (0..30).map(|i| format!("w{i:02}")).collect();

        let SetAdvance::Next { set, summary } = advance_to_next_set(&map, &summary, &vocab, 9)
        else {
            panic!("expected a full set");
        };
        assert_eq!(set.set_number, 4);
        assert_eq!(set.words.len(), 12);
        // 15 unknown + 15 untested
        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.current_set_id.as_deref(), Some("set_4_9"));
    }

    #[test]
    fn advance_with_small_pool_creates_final_set() {
        let map = unknown_map(5);
        let summary = ProgressSummary { set_number: 2, total_sets: 4, ..Default::default() };

        let SetAdvance::Final { set, summary } = advance_to_next_set(&map, &summary, &["x"], 1)
        else {
            panic!("expected a final set");
        };
        assert_eq!(set.words, vec!["w00", "w01", "w02", "w03", "w04"]);
        assert_eq!(summary.set_number, 3);
        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.mastered_count, 0);
    }

    #[test]
    fn advance_with_nothing_left_finishes() {
        let map = map_of(vec![mastered("a"), mastered("b")]);
        let summary = ProgressSummary { set_number: 7, total_sets: 7, ..Default::default() };
        let advance = advance_to_next_set(&map, &summary, &["a", "b", "c"], 1);
        assert_eq!(advance, SetAdvance::Finished);
        assert_eq!(advance.into_parts(), (None, ProgressSummary::default()));
    }

    #[test]
    fn ensure_uses_next_set_number() {
        let map = unknown_map(12);
        let summary = ProgressSummary { set_number: 4, ..Default::default() };
        let (set, summary) = ensure_active_set(&map, None, &summary, &["a"], 7).unwrap();
        assert_eq!(set.set_number, 5);
        assert_eq!(summary.set_number, 5);
        // 12 unknown + 1 untested
        assert_eq!(summary.total_sets, 2);
    }

    #[test]
    fn ensure_does_nothing_below_capacity() {
        let map = unknown_map(3);
        assert!(ensure_active_set(&map, None, &ProgressSummary::default(), &["a"], 7).is_none());
    }

    #[test]
    fn reset_current_set_only_touches_set_words() {
        let map = map_of(vec![mastered("a"), mastered("b"), missed("c")]);
        let set = ActiveSet::new(vec!["a".into(), "c".into(), "zzz".into()], 1, 0);

        let reset = reset_current_set(&map, Some(&set));

        assert_eq!(reset["a"].streak, 0);
        assert!(!reset["a"].mastered);
        assert_eq!(reset["a"].attempts, 5);
        assert_eq!(reset["a"].last_seen, 4);
        assert!(reset["b"].mastered);
        assert!(!reset.contains_key("zzz"));
        // input is left alone
        assert!(map["a"].mastered);
    }

    #[test]
    fn reset_without_set_returns_same_map() {
        let map = map_of(vec![mastered("a")]);
        assert_eq!(reset_current_set(&map, None), map);
    }

    #[test]
    fn reset_all_is_empty() {
        assert!(reset_all_mastery().is_empty());
    }

    #[test]
    fn summary_reads_missing_fields_as_zero() {
        let summary: ProgressSummary = serde_json::from_str(r#"{"setNumber":2}"#).unwrap();
        assert_eq!(summary.set_number, 2);
        assert_eq!(summary.current_set_id, None);
        assert_eq!(summary.mastered_count, 0);
    }

    proptest! {
        #[test]
        fn completion_iff_every_word_mastered(flags in prop::collection::vec(any::<bool>(), 1..15)) {
            let entries: Vec<WordProgress> = flags
                .iter()
                .enumerate()
                .map(|(i, &m)| if m { mastered(&format!("w{i}")) } else { missed(&format!("w{i}")) })
                .collect();
            let words = entries.iter().map(|wp| wp.word.clone()).collect();
            let map = map_of(entries);
            let set = ActiveSet::new(words, 1, 0);

            prop_assert_eq!(is_active_set_completed(&map, Some(&set)), flags.iter().all(|&m| m));
        }
    }
}

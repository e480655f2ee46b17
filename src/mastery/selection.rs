//! Weighted next-word selection
//!
//! Candidates are ordered weakest-first, grouped into streak tiers, and a
//! single uniform draw picks the tier. The word returned is always the
//! weakest (then least recently seen) member of that tier, so randomness only
//! decides how hard the next word is.

use rand::Rng;

use super::active_set::ActiveSet;
use super::progress::{MasteryMap, progress_or_new};

/// Highest streak that still counts as a weak word
pub const LOW_TIER_MAX_STREAK: u32 = 1;

/// Highest streak in the middle tier
pub const MEDIUM_TIER_MAX_STREAK: u32 = 3;

/// Difficulty tier of a candidate word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreakTier {
    Low,
    Medium,
    High,
}

/// Cumulative draw thresholds: the first tier whose threshold is above the
/// draw is chosen
pub const TIER_DRAW_TABLE: [(StreakTier, f64); 3] =
    [(StreakTier::Low, 0.6), (StreakTier::Medium, 0.9), (StreakTier::High, 1.0)];

impl StreakTier {
    /// Tier for a given streak
    pub fn of(streak: u32) -> Self {
        match streak {
            0..=LOW_TIER_MAX_STREAK => StreakTier::Low,
            0..=MEDIUM_TIER_MAX_STREAK => StreakTier::Medium,
            _ => StreakTier::High,
        }
    }
}

/// Choose a tier for `draw` in `[0, 1)`
pub fn pick_tier(draw: f64) -> StreakTier {
    TIER_DRAW_TABLE
        .iter()
        .find(|(_, threshold)| draw < *threshold)
        .map_or(StreakTier::High, |(tier, _)| *tier)
}

/// Pick the next word to show from the active set, or `None` when every
/// word in it is mastered (or there is no set)
pub fn select_next_word<'a, R: Rng>(
    map: &MasteryMap,
    set: Option<&'a ActiveSet>,
    rng: &mut R,
) -> Option<&'a str> {
    let draw = rng.gen_range(0.0..1.0);
    select_with_draw(map, set, draw)
}

/// Deterministic core of [`select_next_word`] for a given draw
pub fn select_with_draw<'a>(
    map: &MasteryMap,
    set: Option<&'a ActiveSet>,
    draw: f64,
) -> Option<&'a str> {
    let set = set?;

    let mut candidates: Vec<(&'a str, u32, i64)> = set
        .words
        .iter()
        .map(|word| {
            let wp = progress_or_new(map, word);
            (word.as_str(), wp.streak, wp.last_seen, wp.mastered)
        })
        .filter(|(_, _, _, mastered)| !mastered)
        .map(|(word, streak, last_seen, _)| (word, streak, last_seen))
        .collect();

    candidates.sort_by(|a, b| (a.1, a.2, a.0).cmp(&(b.1, b.2, b.0)));

    let first_in = |tier: StreakTier| {
        candidates.iter().find(|(_, streak, _)| StreakTier::of(*streak) == tier)
    };

    // An empty tier falls back to the weakest candidate, which is the head of
    // the lowest occupied tier
    let chosen = first_in(pick_tier(draw)).or_else(|| candidates.first());

    chosen.map(|(word, _, _)| *word)
}

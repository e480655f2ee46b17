//! Screen-time minutes earned and lost by reading

/// Minutes earned for a correct read
pub const REWARD: i64 = 1;

/// Minutes lost for a miss
pub const PENALTY: i64 = 5;

/// Change in minutes for one scored read
pub fn score_delta(correct: bool) -> i64 {
    if correct { REWARD } else { -PENALTY }
}

/// Minutes never go below zero
pub fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(0, u32::MAX as i64) as u32
}

/// Balance after applying one scored read
pub fn apply_score(balance: u32, correct: bool) -> u32 {
    clamp_minutes(balance as i64 + score_delta(correct))
}

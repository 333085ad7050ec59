//! Score and level progression.
//!
//! Levels are fixed-width bands of [`POINTS_PER_LEVEL`] points; the level is
//! always derived from the score, never tracked independently.

/// Width of one level band in points.
pub const POINTS_PER_LEVEL: u32 = 200;

/// Points awarded for a correct answer: a step bonus for sustained streaks.
pub fn bonus_points(streak: u32) -> u32 {
    if streak >= 5 {
        15
    } else {
        10
    }
}

/// Level for a cumulative score, starting at level 1.
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Whether the score has crossed into a band above `current_level`.
///
/// Gates the one-time level-up celebration, not the level value itself.
pub fn should_level_up(score: u32, current_level: u32) -> bool {
    level_for_score(score) > current_level
}

/// Progress through the current level band as a rounded percentage.
pub fn level_progress(score: u32) -> u32 {
    let in_band = score % POINTS_PER_LEVEL;
    ((in_band as f64 / POINTS_PER_LEVEL as f64) * 100.0).round() as u32
}

/// Points still needed to reach the next level, always in `1..=200`.
pub fn points_to_next_level(score: u32) -> u32 {
    POINTS_PER_LEVEL - score % POINTS_PER_LEVEL
}

//! Scoring module - line-clear points, level progression, gravity curve
//!
//! The point table is flat per clear count. Unlike most Tetris rulesets it is
//! not multiplied by level; the level only drives the gravity curve.

use blockfall_types::{GRAVITY_DECAY, GRAVITY_FLOOR_SECS, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows in a single lock (0-4).
/// Counts outside the table score nothing.
pub fn line_clear_points(lines: usize) -> u32 {
    if lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines]
}

/// Level for a cumulative cleared-line count. Starts at 1, advances every
/// ten lines, never goes down.
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Seconds between automatic downward steps at the given level.
/// Shrinks by 10% per level above 1, floored at [`GRAVITY_FLOOR_SECS`].
pub fn gravity_interval_secs(base: f32, level: u32) -> f32 {
    let steps = level.saturating_sub(1);
    (base * GRAVITY_DECAY.powi(steps as i32)).max(GRAVITY_FLOOR_SECS)
}

//! Scoring module - line clears, hard drops, levels and gravity
//!
//! - Line clears award `LINE_SCORES[lines] * level`.
//! - Hard drops award a flat bonus per cell travelled.
//! - Level is `lines / 10 + 1`, so a fresh run starts at level 1.
//! - Gravity speeds up by 100ms per level down to a 100ms floor.

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows in one lock at `level` (1-based).
/// More than four rows at once (only possible on a seeded board) scores as four.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base_score = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base_score.saturating_mul(level)
}

/// Hard drop bonus for `cells` travelled
pub fn calculate_drop_score(cells: u32, bonus_per_cell: u32) -> u32 {
    cells.saturating_mul(bonus_per_cell)
}

/// Level for a running total of cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds)
pub fn gravity_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS.saturating_sub(speedup).max(GRAVITY_FLOOR_MS)
}

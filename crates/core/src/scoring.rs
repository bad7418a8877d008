//! Scoring module - line-clear points, leveling and fall speed
//!
//! One lock-in clearing `n` rows at level `L` is worth
//! `SCORE_TABLE[n - 1] + LEVEL_BONUS * L`. The level is derived from the total
//! number of cleared rows, one level per board height, capped at the last
//! entry of the speed table.

use crate::types::{FALL_INTERVALS_MS, LEVELS, LEVEL_BONUS, ROW, SCORE_TABLE};

/// Points for clearing `rows` rows in a single lock-in at `level`.
///
/// Zero rows score nothing; more than four count as four.
pub fn line_clear_score(rows: usize, level: u8) -> u64 {
    if rows == 0 {
        return 0;
    }
    let base = SCORE_TABLE[rows.min(SCORE_TABLE.len()) - 1];
    base + LEVEL_BONUS * level as u64
}

/// Level reached after clearing `rows` rows in total.
pub fn level_for_rows(rows: u32) -> u8 {
    (rows as usize / ROW).min(LEVELS - 1) as u8
}

/// Fall interval in milliseconds for `level` using `table`.
pub fn fall_interval_ms(table: &[u64; LEVELS], level: u8) -> u64 {
    table[(level as usize).min(LEVELS - 1)]
}

/// Fall interval with the built-in speed table.
pub fn default_fall_interval_ms(level: u8) -> u64 {
    fall_interval_ms(&FALL_INTERVALS_MS, level)
}

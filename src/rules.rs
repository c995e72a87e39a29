//! Fixed game constants. None of these are runtime-configurable.

use std::time::Duration;

/// Tiles per grid side (4x4 grid)
pub const GRID_SIZE: usize = 4;
pub const TILE_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Seconds on the clock at the start of a round
pub const TIME_LIMIT_SECS: u32 = 30;

pub const CORRECT_TAP_POINTS: u32 = 10;
pub const WRONG_TAP_PENALTY: u32 = 5;

pub const TICK_INTERVAL_MS: u64 = 1000;
/// The target color rotates on its own cadence, independent of taps
pub const TARGET_CHANGE_INTERVAL_MS: u64 = 5000;

pub const ANIMATION_DURATION_MS: u64 = 200;
pub const SCORE_POPUP_DURATION_MS: u64 = 1000;

pub fn tick_interval() -> Duration {
    Duration::from_millis(TICK_INTERVAL_MS)
}

pub fn target_change_interval() -> Duration {
    Duration::from_millis(TARGET_CHANGE_INTERVAL_MS)
}

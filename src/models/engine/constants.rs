//! Fixed gameplay constants.

/// Number of lanes on the playfield.
pub const NUM_COLUMNS: usize = 4;

/// Time a note is visible before reaching the judgment line (ms).
pub const DEFAULT_APPROACH_MS: f64 = 650.0;
/// Grace period after a note's timestamp before it is forced to Miss (ms).
pub const DEFAULT_MISS_MS: f64 = 200.0;
/// Extra margin on both sides of the visibility window to avoid pop-in (ms).
pub const DEFAULT_SLACK_MS: f64 = 100.0;
/// Progress a note must exceed before a key press counts as a hit.
pub const HIT_PROGRESS_THRESHOLD: f64 = 0.85;
/// Time the session keeps running after the last note (ms).
pub const END_GRACE_MS: i64 = 2000;
/// Largest timestamp a map may use; the end-of-map check adds the grace period to it.
pub const MAX_TIMESTAMP_MS: i64 = i64::MAX - END_GRACE_MS;
/// Silence before the first note when a map starts (ms).
pub const DEFAULT_START_DELAY_MS: i64 = 3000;

pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 2.0;
pub const SPEED_STEP: f64 = 0.1;

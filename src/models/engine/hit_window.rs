//! Timing windows: when a note is visible, how far it has travelled, and
//! whether it can still be hit.

use super::constants::{
    DEFAULT_APPROACH_MS, DEFAULT_MISS_MS, DEFAULT_SLACK_MS, HIT_PROGRESS_THRESHOLD,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingWindows {
    pub approach_ms: f64,
    pub miss_ms: f64,
    pub slack_ms: f64,
}

impl TimingWindows {
    pub fn new(approach_ms: f64, miss_ms: f64, slack_ms: f64) -> Self {
        Self {
            approach_ms,
            miss_ms,
            slack_ms,
        }
    }

    /// Normalized travel of a note from spawn (0.0) to the judgment line (1.0).
    pub fn progress(&self, timestamp_ms: i64, elapsed_ms: f64) -> f64 {
        let time_to_hit = timestamp_ms as f64 - elapsed_ms;
        (1.0 - time_to_hit / self.approach_ms).clamp(0.0, 1.0)
    }

    /// Whether the note is inside the render/hit window.
    pub fn is_visible(&self, timestamp_ms: i64, elapsed_ms: f64) -> bool {
        let ts = timestamp_ms as f64;
        elapsed_ms >= ts - self.approach_ms - self.slack_ms
            && elapsed_ms <= ts + self.miss_ms + self.slack_ms
    }

    /// Whether the window of a note has not opened yet.
    pub fn is_ahead(&self, timestamp_ms: i64, elapsed_ms: f64) -> bool {
        elapsed_ms < timestamp_ms as f64 - self.approach_ms - self.slack_ms
    }

    pub fn can_hit(&self, timestamp_ms: i64, elapsed_ms: f64) -> bool {
        self.is_visible(timestamp_ms, elapsed_ms)
            && self.progress(timestamp_ms, elapsed_ms) > HIT_PROGRESS_THRESHOLD
    }

    pub fn is_missed(&self, timestamp_ms: i64, elapsed_ms: f64) -> bool {
        elapsed_ms > timestamp_ms as f64 + self.miss_ms
    }
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self::new(DEFAULT_APPROACH_MS, DEFAULT_MISS_MS, DEFAULT_SLACK_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> TimingWindows {
        TimingWindows::new(650.0, 200.0, 100.0)
    }

    #[test]
    fn progress_follows_the_approach_window() {
        let w = windows();
        assert_eq!(w.progress(3000, 2350.0), 0.0);
        assert!((w.progress(3000, 2947.5) - 0.919_230).abs() < 1e-4);
        assert_eq!(w.progress(3000, 3000.0), 1.0);
    }

    #[test]
    fn progress_is_clamped() {
        let w = windows();
        assert_eq!(w.progress(3000, 0.0), 0.0);
        assert_eq!(w.progress(3000, 3150.0), 1.0);
    }

    #[test]
    fn visibility_includes_slack() {
        let w = windows();
        assert!(!w.is_visible(3000, 2249.0));
        assert!(w.is_visible(3000, 2250.0));
        assert!(w.is_visible(3000, 3300.0));
        assert!(!w.is_visible(3000, 3301.0));
        assert!(w.is_ahead(3000, 2249.0));
    }

    #[test]
    fn hit_requires_progress_above_threshold() {
        let w = windows();
        assert!(!w.can_hit(3000, 2900.0));
        assert!(w.can_hit(3000, 2947.5));
        assert!(w.can_hit(3000, 3150.0));
    }

    #[test]
    fn miss_after_miss_window() {
        let w = windows();
        assert!(!w.is_missed(3000, 3200.0));
        assert!(w.is_missed(3000, 3201.0));
    }
}

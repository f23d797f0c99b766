//! Wall-clock timing source for an active play.

use std::time::{Duration, Instant};

/// Elapsed map time derived from `Instant`s.
///
/// Time starts at `-start_delay_ms` (pre-roll) and runs `speed` times faster
/// than the wall clock. While paused the value is frozen; resuming shifts the
/// reference so time continues from where it stopped.
#[derive(Debug, Clone, Copy)]
pub struct TimingSource {
    reference: Instant,
    paused_at: Option<Instant>,
    speed: f64,
    start_delay_ms: i64,
}

impl TimingSource {
    pub fn start(now: Instant, speed: f64, start_delay_ms: i64) -> Self {
        Self {
            reference: now,
            paused_at: None,
            speed,
            start_delay_ms,
        }
    }

    /// Elapsed map time in milliseconds at `now`.
    pub fn elapsed_ms_at(&self, now: Instant) -> i64 {
        let now = self.paused_at.unwrap_or(now);
        let real = now.saturating_duration_since(self.reference);
        (real.as_secs_f64() * 1000.0 * self.speed) as i64 - self.start_delay_ms
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms_at(Instant::now())
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            let paused_for: Duration = now.saturating_duration_since(paused_at);
            self.reference += paused_for;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_at_negative_delay() {
        let t0 = Instant::now();
        let clock = TimingSource::start(t0, 1.0, 3000);
        assert_eq!(clock.elapsed_ms_at(t0), -3000);
        assert_eq!(clock.elapsed_ms_at(t0 + ms(3000)), 0);
        assert_eq!(clock.elapsed_ms_at(t0 + ms(4250)), 1250);
    }

    #[test]
    fn speed_scales_elapsed_time() {
        let t0 = Instant::now();
        let clock = TimingSource::start(t0, 1.5, 0);
        assert_eq!(clock.elapsed_ms_at(t0 + ms(1000)), 1500);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let t0 = Instant::now();
        let mut clock = TimingSource::start(t0, 1.0, 0);
        clock.pause(t0 + ms(500));
        assert!(clock.is_paused());
        assert_eq!(clock.elapsed_ms_at(t0 + ms(5000)), 500);

        clock.resume(t0 + ms(5000));
        assert_eq!(clock.elapsed_ms_at(t0 + ms(5000)), 500);
        assert_eq!(clock.elapsed_ms_at(t0 + ms(5100)), 600);
    }

    #[test]
    fn never_goes_backwards() {
        let t0 = Instant::now();
        let mut clock = TimingSource::start(t0, 1.0, 100);
        let mut last = i64::MIN;
        for step in 0..50u64 {
            let now = t0 + ms(step * 37);
            if step == 10 {
                clock.pause(now);
            }
            if step == 20 {
                clock.resume(now);
            }
            let value = clock.elapsed_ms_at(now);
            assert!(value >= last);
            last = value;
        }
    }
}

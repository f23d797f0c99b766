//! Note judgment: decides, once per frame, which notes were hit or missed.

use crate::models::engine::{
    END_GRACE_MS, MapData, NUM_COLUMNS, Note, NoteState, TimingWindows,
};
use crate::models::stats::{Judgement, JudgementRecord};

/// Lanes whose key went down during the current frame.
pub type LanePresses = [bool; NUM_COLUMNS];

/// A note inside the render window and how far it has travelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleNote {
    pub lane: usize,
    pub timestamp_ms: i64,
    pub progress: f64,
}

/// Judgement state for one play of one map.
pub struct GameEngine {
    notes: Vec<Note>,
    record: JudgementRecord,
    windows: TimingWindows,
    /// Every note before this index is already judged.
    head_index: usize,
}

impl GameEngine {
    pub fn new(map: &MapData, windows: TimingWindows) -> Self {
        Self {
            notes: map.notes.iter().map(Note::reset).collect(),
            record: JudgementRecord::new(),
            windows,
            head_index: 0,
        }
    }

    /// Runs one frame of judgment.
    ///
    /// For each pending note in storage order the hit check runs before the
    /// miss check, so a press landing on the frame a note would expire still
    /// counts. A press is consumed by the first note it hits. Returns the
    /// judgements made this frame.
    pub fn update(&mut self, elapsed_ms: i64, presses: &LanePresses) -> Vec<Judgement> {
        let now = elapsed_ms as f64;
        let mut presses = *presses;
        let mut judged = Vec::new();

        while self.head_index < self.notes.len() && !self.notes[self.head_index].is_pending() {
            self.head_index += 1;
        }

        for note in self.notes.iter_mut().skip(self.head_index) {
            if self.windows.is_ahead(note.timestamp_ms, now) {
                break;
            }
            if !note.is_pending() {
                continue;
            }

            let outcome = if presses[note.lane] && self.windows.can_hit(note.timestamp_ms, now) {
                presses[note.lane] = false;
                Judgement::Hit
            } else if self.windows.is_missed(note.timestamp_ms, now) {
                Judgement::Miss
            } else {
                continue;
            };

            let state = match outcome {
                Judgement::Hit => NoteState::Hit,
                Judgement::Miss => NoteState::Miss,
            };
            if note.judge(state) {
                self.record.push(outcome);
                judged.push(outcome);
            }
        }

        judged
    }

    /// Pending notes currently inside the render window, in storage order.
    pub fn visible_notes(&self, elapsed_ms: i64) -> Vec<VisibleNote> {
        let now = elapsed_ms as f64;
        self.notes
            .iter()
            .skip(self.head_index)
            .take_while(|n| !self.windows.is_ahead(n.timestamp_ms, now))
            .filter(|n| n.is_pending() && self.windows.is_visible(n.timestamp_ms, now))
            .map(|n| VisibleNote {
                lane: n.lane,
                timestamp_ms: n.timestamp_ms,
                progress: self.windows.progress(n.timestamp_ms, now),
            })
            .collect()
    }

    /// `true` once the grace period after the last note has passed.
    pub fn is_finished(&self, elapsed_ms: i64) -> bool {
        self.notes
            .last()
            .is_none_or(|n| elapsed_ms > n.timestamp_ms.saturating_add(END_GRACE_MS))
    }

    pub fn record(&self) -> &JudgementRecord {
        &self.record
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn total_notes(&self) -> usize {
        self.notes.len()
    }

    pub fn hits(&self) -> usize {
        self.record.hits()
    }

    pub fn misses(&self) -> usize {
        self.record.misses()
    }

    pub fn accuracy(&self) -> f64 {
        self.record.accuracy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: LanePresses = [false; NUM_COLUMNS];

    fn press(lane: usize) -> LanePresses {
        let mut presses = NONE;
        presses[lane] = true;
        presses
    }

    fn engine(notes: &[(usize, i64)]) -> GameEngine {
        let notes = notes.iter().map(|&(l, t)| Note::new(l, t)).collect();
        GameEngine::new(
            &MapData::new(notes, None),
            TimingWindows::new(650.0, 200.0, 100.0),
        )
    }

    #[test]
    fn single_note_without_press_is_missed() {
        let mut engine = engine(&[(2, 1000)]);
        for t in (0..=4000).step_by(16) {
            engine.update(t, &NONE);
        }
        assert_eq!(engine.record().entries(), &[Judgement::Miss]);
        assert_eq!(engine.hits(), 0);
        assert_eq!(engine.accuracy(), 0.0);
    }

    #[test]
    fn press_after_threshold_hits() {
        let mut engine = engine(&[(1, 3000)]);
        assert!(engine.update(2350, &press(1)).is_empty());
        assert!(engine.update(2900, &press(1)).is_empty());
        assert_eq!(engine.update(2948, &press(1)), vec![Judgement::Hit]);
        assert_eq!(engine.notes()[0].state(), NoteState::Hit);
        assert!(engine.update(3300, &NONE).is_empty());
        assert_eq!(engine.accuracy(), 100.0);
    }

    #[test]
    fn wrong_lane_does_not_hit() {
        let mut engine = engine(&[(1, 3000)]);
        assert!(engine.update(2990, &press(0)).is_empty());
        assert_eq!(engine.update(3201, &NONE), vec![Judgement::Miss]);
    }

    #[test]
    fn miss_exactly_after_window() {
        let mut engine = engine(&[(0, 3000)]);
        assert!(engine.update(3200, &NONE).is_empty());
        assert_eq!(engine.update(3201, &NONE), vec![Judgement::Miss]);
    }

    #[test]
    fn hit_wins_over_miss_in_same_frame() {
        let mut engine = engine(&[(0, 3000)]);
        assert_eq!(engine.update(3250, &press(0)), vec![Judgement::Hit]);
    }

    #[test]
    fn one_press_retires_one_note() {
        let mut engine = engine(&[(3, 1000), (3, 1050)]);
        assert_eq!(engine.update(1000, &press(3)), vec![Judgement::Hit]);
        assert_eq!(engine.notes()[1].state(), NoteState::Pending);
        assert_eq!(engine.update(1010, &press(3)), vec![Judgement::Hit]);
    }

    #[test]
    fn chords_are_hit_together() {
        let mut engine = engine(&[(0, 1000), (3, 1000)]);
        let both = [true, false, false, true];
        assert_eq!(engine.update(1000, &both), vec![Judgement::Hit, Judgement::Hit]);
    }

    #[test]
    fn judgements_follow_storage_order() {
        let mut engine = engine(&[(0, 1000), (1, 1100), (2, 1200)]);
        let judged = engine.update(2000, &NONE);
        assert_eq!(judged.len(), 3);
        assert_eq!(engine.record().len(), 3);
    }

    #[test]
    fn counts_are_monotonic_and_bounded() {
        let notes: Vec<_> = (0..40).map(|i| (i % 4, 1000 + i as i64 * 120)).collect();
        let mut engine = engine(&notes);
        let mut last = 0;
        for t in (0..10_000).step_by(7) {
            let lane = (t / 7 % 4) as usize;
            engine.update(t, &press(lane));
            let judged = engine.hits() + engine.misses();
            assert!(judged >= last);
            assert!(judged <= engine.total_notes());
            last = judged;
        }
        assert_eq!(last, engine.total_notes());
        assert!((0.0..=100.0).contains(&engine.accuracy()));
    }

    #[test]
    fn visible_notes_carry_clamped_progress() {
        let engine = engine(&[(0, 3000), (1, 3400), (2, 9000)]);
        let visible = engine.visible_notes(2300);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].progress, 0.0);

        let visible = engine.visible_notes(3000);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].progress, 1.0);
        assert!((visible[1].progress - (1.0 - 400.0 / 650.0)).abs() < 1e-9);
    }

    #[test]
    fn judged_notes_are_hidden() {
        let mut engine = engine(&[(0, 3000)]);
        engine.update(3000, &press(0));
        assert!(engine.visible_notes(3000).is_empty());
    }

    #[test]
    fn finishes_after_grace_period() {
        let engine = engine(&[(0, 1000), (1, 5000)]);
        assert!(!engine.is_finished(7000));
        assert!(engine.is_finished(7001));
    }

    #[test]
    fn end_check_saturates_near_the_largest_timestamp() {
        let engine = engine(&[(0, i64::MAX - 10)]);
        assert!(!engine.is_finished(0));
        assert!(!engine.is_finished(i64::MAX));
    }

    #[test]
    fn new_engine_resets_note_state() {
        let mut note = Note::new(0, 100);
        note.judge(NoteState::Hit);
        let engine = GameEngine::new(&MapData::new(vec![note], None), TimingWindows::default());
        assert!(engine.notes()[0].is_pending());
        assert!(engine.record().is_empty());
    }
}

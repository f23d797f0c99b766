//! A single note of a map and its judgment lifecycle.

/// Lifecycle of a note. Moves out of `Pending` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteState {
    /// Not judged yet (hidden or approaching).
    #[default]
    Pending,
    /// Pressed inside the hit window.
    Hit,
    /// Passed the miss window without a press.
    Miss,
}

/// A tap note in one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Lane index (0-indexed).
    pub lane: usize,
    /// When the note should be hit, in milliseconds from map start.
    pub timestamp_ms: i64,
    state: NoteState,
}

impl Note {
    pub fn new(lane: usize, timestamp_ms: i64) -> Self {
        Self {
            lane,
            timestamp_ms,
            state: NoteState::Pending,
        }
    }

    pub fn state(&self) -> NoteState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == NoteState::Pending
    }

    /// Moves the note to a terminal state.
    ///
    /// Returns `false` (and changes nothing) if the note was already judged or
    /// `outcome` is `Pending`.
    pub fn judge(&mut self, outcome: NoteState) -> bool {
        if !self.is_pending() || outcome == NoteState::Pending {
            return false;
        }
        self.state = outcome;
        true
    }

    /// Returns a copy with the runtime state cleared.
    pub fn reset(&self) -> Self {
        Self::new(self.lane, self.timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judged_note_never_returns_to_pending() {
        let mut note = Note::new(1, 500);
        assert!(note.judge(NoteState::Hit));
        assert!(!note.judge(NoteState::Miss));
        assert!(!note.judge(NoteState::Pending));
        assert_eq!(note.state(), NoteState::Hit);
    }

    #[test]
    fn reset_clears_state_only() {
        let mut note = Note::new(3, 1200);
        note.judge(NoteState::Miss);
        let fresh = note.reset();
        assert!(fresh.is_pending());
        assert_eq!((fresh.lane, fresh.timestamp_ms), (3, 1200));
    }
}

//! Playfield geometry in screen pixels.

use super::constants::NUM_COLUMNS;

/// Lane and judgment bar placement for a given window size.
///
/// The lanes take the middle third of the screen. Notes spawn just above the
/// top edge and travel down to the judgment bar, which sits one eighth of the
/// screen height above the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldLayout {
    pub screen_width: f32,
    pub screen_height: f32,
    pub lane_width: f32,
    pub note_height: f32,
    pub judgment_y: f32,
    pub spawn_y: f32,
}

impl PlayfieldLayout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let note_height = screen_height / 20.0;
        Self {
            screen_width,
            screen_height,
            lane_width: screen_width / 3.0 / NUM_COLUMNS as f32,
            note_height,
            judgment_y: screen_height - screen_height / 8.0,
            spawn_y: -note_height,
        }
    }

    pub fn playfield_width(&self) -> f32 {
        self.lane_width * NUM_COLUMNS as f32
    }

    pub fn playfield_x(&self) -> f32 {
        (self.screen_width - self.playfield_width()) / 2.0
    }

    pub fn lane_x(&self, lane: usize) -> f32 {
        self.playfield_x() + lane as f32 * self.lane_width
    }

    /// Top edge of a note with the given progress.
    pub fn note_y(&self, progress: f64) -> f32 {
        let travel = self.judgment_y - self.spawn_y;
        self.spawn_y + progress.clamp(0.0, 1.0) as f32 * travel
    }
}

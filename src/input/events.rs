use crate::models::engine::NUM_COLUMNS;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy)]
pub struct RawInputEvent {
    pub keycode: KeyCode,
    pub state: ElementState,
}

impl RawInputEvent {
    /// Extracts a key event, dropping OS key repeats so only press edges remain.
    pub fn from_winit(event: &WindowEvent) -> Option<Self> {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(keycode),
                    state,
                    repeat: false,
                    ..
                },
            ..
        } = event
        {
            Some(Self {
                keycode: *keycode,
                state: *state,
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    // Gameplay
    Hit { column: usize },
    TogglePause,

    // Menu / navigation
    Confirm,
    Back,
    Up,
    Down,
    SpeedUp,
    SpeedDown,
    Rescan,
    QuickPlay,

    // System
    Quit,
}

/// Everything the player did since the previous frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Lanes pressed this frame.
    pub lanes: [bool; NUM_COLUMNS],
    /// Non-lane actions in arrival order.
    pub actions: Vec<GameAction>,
}

impl FrameInput {
    pub fn push(&mut self, action: GameAction) {
        match action {
            GameAction::Hit { column } if column < NUM_COLUMNS => self.lanes[column] = true,
            GameAction::Hit { column } => log::warn!("INPUT: Ignoring hit on lane {}", column),
            other => self.actions.push(other),
        }
    }

    pub fn contains(&self, action: GameAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn quit_requested(&self) -> bool {
        self.contains(GameAction::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_fold_into_lane_flags() {
        let mut input = FrameInput::default();
        input.push(GameAction::Hit { column: 2 });
        input.push(GameAction::Hit { column: 2 });
        input.push(GameAction::Confirm);
        input.push(GameAction::Hit { column: 9 });
        assert_eq!(input.lanes, [false, false, true, false]);
        assert_eq!(input.actions, vec![GameAction::Confirm]);
        assert!(!input.quit_requested());
    }
}

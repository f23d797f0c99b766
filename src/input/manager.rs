use super::events::{GameAction, RawInputEvent};
use super::keycode::parse_keycode;
use crate::models::engine::NUM_COLUMNS;
use crate::models::settings::KeySettings;
use std::collections::HashMap;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Resolves physical keys to game actions. Only press edges produce actions.
pub struct InputManager {
    bindings: HashMap<KeyCode, GameAction>,
}

impl InputManager {
    pub fn new(keys: &KeySettings) -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
        };
        manager.load_default_bindings();
        manager.reload_keybinds(keys);
        manager
    }

    pub fn process(&self, event: RawInputEvent) -> Option<GameAction> {
        if event.state != ElementState::Pressed {
            return None;
        }
        self.bindings.get(&event.keycode).copied()
    }

    #[cfg(test)]
    fn resolve(&self, keycode: KeyCode) -> Option<GameAction> {
        self.bindings.get(&keycode).copied()
    }

    /// Applies key names from the settings on top of the defaults.
    ///
    /// Unknown names are logged and leave the default binding in place. Lane
    /// keys are only replaced when all four parse.
    pub fn reload_keybinds(&mut self, keys: &KeySettings) {
        let lanes: Vec<KeyCode> = keys
            .lanes
            .iter()
            .take(NUM_COLUMNS)
            .filter_map(|label| {
                let code = parse_keycode(label);
                if code.is_none() {
                    log::warn!("INPUT: Unknown lane key {:?}", label);
                }
                code
            })
            .collect();

        if lanes.len() == NUM_COLUMNS {
            self.bindings
                .retain(|_, action| !matches!(action, GameAction::Hit { .. }));
            for (column, code) in lanes.into_iter().enumerate() {
                self.bindings.insert(code, GameAction::Hit { column });
            }
        } else {
            log::warn!("INPUT: Need {} lane keys, keeping defaults", NUM_COLUMNS);
        }

        let singles = [
            (&keys.confirm, GameAction::Confirm),
            (&keys.back, GameAction::Back),
            (&keys.up, GameAction::Up),
            (&keys.down, GameAction::Down),
            (&keys.speed_up, GameAction::SpeedUp),
            (&keys.speed_down, GameAction::SpeedDown),
            (&keys.pause, GameAction::TogglePause),
            (&keys.rescan, GameAction::Rescan),
            (&keys.quick_play, GameAction::QuickPlay),
            (&keys.quit, GameAction::Quit),
        ];
        for (label, action) in singles {
            match parse_keycode(label) {
                Some(code) => self.bind(code, action),
                None => log::warn!("INPUT: Unknown key {:?} for {:?}", label, action),
            }
        }
    }

    /// Binds `code` to `action`, dropping any other key bound to a non-lane action.
    fn bind(&mut self, code: KeyCode, action: GameAction) {
        if !matches!(action, GameAction::Hit { .. }) {
            self.bindings.retain(|_, a| *a != action);
        }
        self.bindings.insert(code, action);
    }

    fn load_default_bindings(&mut self) {
        // Gameplay 4K
        self.bindings.insert(KeyCode::KeyA, GameAction::Hit { column: 0 });
        self.bindings.insert(KeyCode::KeyS, GameAction::Hit { column: 1 });
        self.bindings.insert(KeyCode::KeyK, GameAction::Hit { column: 2 });
        self.bindings.insert(KeyCode::KeyL, GameAction::Hit { column: 3 });
        self.bindings.insert(KeyCode::Space, GameAction::TogglePause);

        // Menu
        self.bindings.insert(KeyCode::Enter, GameAction::Confirm);
        self.bindings.insert(KeyCode::Escape, GameAction::Back);
        self.bindings.insert(KeyCode::ArrowUp, GameAction::Up);
        self.bindings.insert(KeyCode::ArrowDown, GameAction::Down);
        self.bindings.insert(KeyCode::PageUp, GameAction::SpeedUp);
        self.bindings.insert(KeyCode::PageDown, GameAction::SpeedDown);
        self.bindings.insert(KeyCode::F8, GameAction::Rescan);
        self.bindings.insert(KeyCode::F10, GameAction::QuickPlay);

        // System
        self.bindings.insert(KeyCode::F4, GameAction::Quit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keycode: KeyCode) -> RawInputEvent {
        RawInputEvent {
            keycode,
            state: ElementState::Pressed,
        }
    }

    #[test]
    fn default_lane_keys() {
        let manager = InputManager::new(&KeySettings::default());
        assert_eq!(
            manager.process(pressed(KeyCode::KeyA)),
            Some(GameAction::Hit { column: 0 })
        );
        assert_eq!(
            manager.process(pressed(KeyCode::KeyL)),
            Some(GameAction::Hit { column: 3 })
        );
        assert_eq!(manager.process(pressed(KeyCode::KeyZ)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let manager = InputManager::new(&KeySettings::default());
        let released = RawInputEvent {
            keycode: KeyCode::KeyA,
            state: ElementState::Released,
        };
        assert_eq!(manager.process(released), None);
    }

    #[test]
    fn custom_lanes_replace_defaults() {
        let keys = KeySettings {
            lanes: ["KeyD", "KeyF", "KeyJ", "KeyK"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..KeySettings::default()
        };
        let manager = InputManager::new(&keys);
        assert_eq!(manager.resolve(KeyCode::KeyA), None);
        assert_eq!(manager.resolve(KeyCode::KeyK), Some(GameAction::Hit { column: 3 }));
        assert_eq!(manager.resolve(KeyCode::KeyD), Some(GameAction::Hit { column: 0 }));
    }

    #[test]
    fn incomplete_lane_list_keeps_defaults() {
        let keys = KeySettings {
            lanes: vec!["KeyD".to_string(), "Bogus".to_string()],
            ..KeySettings::default()
        };
        let manager = InputManager::new(&keys);
        assert_eq!(manager.resolve(KeyCode::KeyA), Some(GameAction::Hit { column: 0 }));
        assert_eq!(manager.resolve(KeyCode::KeyD), None);
    }

    #[test]
    fn rebinding_an_action_moves_it() {
        let keys = KeySettings {
            quit: "KeyQ".to_string(),
            ..KeySettings::default()
        };
        let manager = InputManager::new(&keys);
        assert_eq!(manager.resolve(KeyCode::KeyQ), Some(GameAction::Quit));
        assert_eq!(manager.resolve(KeyCode::F4), None);
    }
}

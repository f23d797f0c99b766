use super::{Session, Transition};
use crate::input::{FrameInput, GameAction};
use crate::models::engine::{MAX_SPEED, MIN_SPEED, MapData, MapGenerator, SPEED_STEP};
use std::time::Instant;

const QUICK_PLAY_NAME: &str = "Quick Play";

impl Session {
    pub(super) fn handle_menu(&mut self, input: &FrameInput, _now: Instant) -> Transition {
        for action in &input.actions {
            match action {
                GameAction::Up => self.catalog.previous(),
                GameAction::Down => self.catalog.next(),
                GameAction::SpeedUp => self.adjust_speed(SPEED_STEP),
                GameAction::SpeedDown => self.adjust_speed(-SPEED_STEP),
                GameAction::Rescan => self.rescan(),
                GameAction::Back => return Transition::Exit,
                GameAction::Confirm => {
                    if let Some(transition) = self.load_selected_map() {
                        return transition;
                    }
                }
                GameAction::QuickPlay => {
                    let notes = MapGenerator::quick_play().generate(&mut rand::rng());
                    return Transition::ToGame {
                        map_name: QUICK_PLAY_NAME.to_string(),
                        map: MapData::new(notes, None),
                    };
                }
                _ => {}
            }
        }
        Transition::None
    }

    fn load_selected_map(&mut self) -> Option<Transition> {
        let name = self.catalog.selected_entry()?.name.clone();
        match self.catalog.load_selected()? {
            Ok(map) => Some(Transition::ToGame {
                map_name: name,
                map,
            }),
            Err(e) => {
                log::error!("SESSION: Failed to load {:?}: {}", name, e);
                self.status = Some(e.to_string());
                None
            }
        }
    }

    fn adjust_speed(&mut self, delta: f64) {
        let speed = ((self.state.speed + delta) * 10.0).round() / 10.0;
        self.state.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        log::info!("SESSION: Speed {:.1}x", self.state.speed);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{FrameResult, SessionMode};
    use crate::input::{FrameInput, GameAction};
    use std::time::Instant;

    #[test]
    fn navigation_is_clamped() {
        let (_dir, mut session, _) = session_with(&[("a", "0 1"), ("b", "0 1"), ("c", "0 1")], 0);
        let now = Instant::now();
        session.frame(&with(&[GameAction::Up]), now);
        assert_eq!(session.catalog().selected_index(), 0);
        session.frame(&with(&[GameAction::Down, GameAction::Down, GameAction::Down]), now);
        assert_eq!(session.catalog().selected_index(), 2);
    }

    #[test]
    fn speed_steps_are_clamped() {
        let (_dir, mut session, _) = session_with(&[], 0);
        let now = Instant::now();
        for _ in 0..20 {
            session.frame(&with(&[GameAction::SpeedUp]), now);
        }
        assert_eq!(session.state.speed, 2.0);
        for _ in 0..30 {
            session.frame(&with(&[GameAction::SpeedDown]), now);
        }
        assert_eq!(session.state.speed, 0.5);
        session.frame(&with(&[GameAction::SpeedUp]), now);
        assert_eq!(session.state.speed, 0.6);
    }

    #[test]
    fn malformed_map_stays_in_menu() {
        let (_dir, mut session, player) = session_with(&[("broken", "0 100 7")], 0);
        let result = session.frame(&with(&[GameAction::Confirm]), Instant::now());
        assert_eq!(result, FrameResult::Continue);
        assert_eq!(session.mode(), SessionMode::Menu);
        assert!(session.status().is_some());
        assert!(player.calls().is_empty());
    }

    #[test]
    fn confirm_on_empty_catalog_does_nothing() {
        let (_dir, mut session, _) = session_with(&[], 0);
        session.frame(&with(&[GameAction::Confirm]), Instant::now());
        assert_eq!(session.mode(), SessionMode::Menu);
    }

    #[test]
    fn rescan_picks_up_new_maps() {
        let (dir, mut session, _) = session_with(&[("a", "0 1")], 0);
        std::fs::write(dir.path().join("b.txt"), "1 500").unwrap();
        assert_eq!(session.catalog().len(), 1);
        session.frame(&with(&[GameAction::Rescan]), Instant::now());
        assert_eq!(session.catalog().len(), 2);
    }

    #[test]
    fn quick_play_starts_without_audio() {
        let (_dir, mut session, player) = session_with(&[], 0);
        session.frame(&with(&[GameAction::QuickPlay]), Instant::now());
        assert_eq!(session.mode(), SessionMode::Playing);
        assert_eq!(session.engine().unwrap().total_notes(), 100);
        assert_eq!(player.calls(), vec!["stop"]);
    }

    #[test]
    fn back_in_menu_exits() {
        let (_dir, mut session, _) = session_with(&[], 0);
        let result = session.frame(&with(&[GameAction::Back]), Instant::now());
        assert_eq!(result, FrameResult::Exit);
    }

    #[test]
    fn idle_frames_continue() {
        let (_dir, mut session, _) = session_with(&[], 0);
        let result = session.frame(&FrameInput::default(), Instant::now());
        assert_eq!(result, FrameResult::Continue);
    }
}

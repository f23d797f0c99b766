use super::{Session, Transition};
use crate::input::{FrameInput, GameAction};
use std::time::Instant;

impl Session {
    pub(super) fn handle_game(&mut self, input: &FrameInput, now: Instant) -> Transition {
        let Some(play) = self.play.as_mut() else {
            log::warn!("SESSION: Playing without an active map");
            return Transition::ToMenu { completed: false };
        };

        for action in &input.actions {
            match action {
                GameAction::Back => return Transition::ToMenu { completed: false },
                GameAction::TogglePause => {
                    if play.clock.is_paused() {
                        play.clock.resume(now);
                        if play.audio_started && play.has_audio {
                            self.player.resume();
                        }
                        log::info!("SESSION: Resumed at {} ms", play.clock.elapsed_ms_at(now));
                    } else {
                        play.clock.pause(now);
                        if play.audio_started && play.has_audio {
                            self.player.pause();
                        }
                        log::info!("SESSION: Paused at {} ms", play.clock.elapsed_ms_at(now));
                    }
                }
                _ => {}
            }
        }

        let elapsed = play.clock.elapsed_ms_at(now).max(self.state.elapsed_ms);
        self.state.elapsed_ms = elapsed;
        self.state.paused = play.clock.is_paused();
        if self.state.paused {
            return Transition::None;
        }

        if !play.audio_started && elapsed >= 0 {
            play.audio_started = true;
            if play.has_audio {
                self.player.play();
            }
        }

        if let Some(last) = play.engine.update(elapsed, &input.lanes).last() {
            play.last_judgement = Some(*last);
        }

        if play.engine.is_finished(elapsed) {
            Transition::ToMenu { completed: true }
        } else {
            Transition::None
        }
    }
}

//! Music playback seen from the game loop.
//!
//! The session only talks to a `MusicPlayer`. `AudioManager` forwards every
//! call to the audio thread without blocking; `SilentPlayer` is used when no
//! audio thread could be started and for maps without a track.

use crate::logic::audio_thread::AudioCommand;
use crossbeam_channel::Sender;
use std::path::Path;

/// Control surface for the single music stream.
pub trait MusicPlayer {
    /// Loads a track, paused at its start.
    fn load(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// Playback rate; pitch follows.
    fn set_speed(&mut self, speed: f32);
    fn set_volume(&mut self, volume: f32);
}

/// Sends commands to the dedicated audio thread.
pub struct AudioManager {
    cmd_tx: Sender<AudioCommand>,
}

impl AudioManager {
    pub fn new(cmd_tx: Sender<AudioCommand>) -> Self {
        Self { cmd_tx }
    }

    fn send(&self, cmd: AudioCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            log::error!("AUDIO: Failed to send command (audio thread died?): {}", e);
        }
    }
}

impl MusicPlayer for AudioManager {
    fn load(&mut self, path: &Path) {
        self.send(AudioCommand::Load {
            path: path.to_path_buf(),
        });
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn resume(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }

    fn set_speed(&mut self, speed: f32) {
        self.send(AudioCommand::SetSpeed { speed });
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCommand::SetVolume { volume });
    }
}

/// A player that does nothing.
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl MusicPlayer for SilentPlayer {
    fn load(&mut self, path: &Path) {
        log::debug!("AUDIO: Silent mode, ignoring {:?}", path);
    }
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn stop(&mut self) {}
    fn set_speed(&mut self, _speed: f32) {}
    fn set_volume(&mut self, _volume: f32) {}
}

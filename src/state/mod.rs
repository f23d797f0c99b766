//! Session controller: the Menu ↔ Playing state machine.
//!
//! The session owns everything a run needs (catalog, active play, music
//! player) and is driven once per frame by the app with the input collected
//! since the previous frame. Handlers for each mode live in `menu` and `game`.

mod game;
mod menu;
pub mod traits;

pub use traits::Transition;

use crate::catalog::MapCatalog;
use crate::input::FrameInput;
use crate::logic::audio::MusicPlayer;
use crate::logic::clock::TimingSource;
use crate::logic::engine::GameEngine;
use crate::models::engine::{MapData, TimingWindows};
use crate::models::settings::Settings;
use crate::models::stats::Judgement;
use crate::shared::snapshot::{GameplaySnapshot, MenuSnapshot, PlayResult, RenderState};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Menu,
    Playing,
}

/// Outcome of one frame for the run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    Continue,
    Exit,
}

/// Mutable per-run values shared by both modes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub mode: SessionMode,
    /// Map time of the last played frame; `-start_delay_ms` right after a start.
    pub elapsed_ms: i64,
    pub speed: f64,
    pub start_delay_ms: i64,
    pub paused: bool,
}

/// Everything that only exists while a map is being played.
pub(crate) struct ActivePlay {
    pub map_name: String,
    pub engine: GameEngine,
    pub clock: TimingSource,
    pub has_audio: bool,
    pub audio_started: bool,
    pub last_judgement: Option<Judgement>,
}

pub struct Session {
    pub state: SessionState,
    pub(crate) catalog: MapCatalog,
    pub(crate) play: Option<ActivePlay>,
    pub(crate) player: Box<dyn MusicPlayer>,
    windows: TimingWindows,
    volume: f32,
    pub(crate) status: Option<String>,
    pub(crate) last_result: Option<PlayResult>,
}

impl Session {
    /// Creates the session in Menu mode and scans the maps directory.
    pub fn new(settings: &Settings, player: Box<dyn MusicPlayer>) -> Self {
        let mut session = Self {
            state: SessionState {
                mode: SessionMode::Menu,
                elapsed_ms: 0,
                speed: settings.speed,
                start_delay_ms: settings.start_delay_ms,
                paused: false,
            },
            catalog: MapCatalog::new(settings.maps_dir.clone()),
            play: None,
            player,
            windows: settings.timing_windows(),
            volume: settings.volume,
            status: None,
            last_result: None,
        };
        session.rescan();
        session
    }

    /// Runs one frame: dispatches input to the active mode, then applies the
    /// resulting transition. Quit is honoured in either mode after the frame.
    pub fn frame(&mut self, input: &FrameInput, now: Instant) -> FrameResult {
        let transition = match self.state.mode {
            SessionMode::Menu => self.handle_menu(input, now),
            SessionMode::Playing => self.handle_game(input, now),
        };

        let exit = matches!(transition, Transition::Exit) || input.quit_requested();
        // A map selected in the same frame as a quit is never started.
        if !(exit && matches!(transition, Transition::ToGame { .. })) {
            self.apply(transition, now);
        }

        if exit {
            if self.play.is_some() {
                self.stop_map(false);
            }
            log::info!("SESSION: Quit requested");
            FrameResult::Exit
        } else {
            FrameResult::Continue
        }
    }

    fn apply(&mut self, transition: Transition, now: Instant) {
        match transition {
            Transition::None | Transition::Exit => {}
            Transition::ToGame { map_name, map } => self.start_map(map_name, map, now),
            Transition::ToMenu { completed } => self.stop_map(completed),
        }
    }

    /// Re-lists the catalog; a failure is kept as the menu status.
    pub fn rescan(&mut self) {
        self.status = match self.catalog.reload() {
            Ok(0) => Some(format!("No maps found in {:?}", self.catalog.root())),
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
    }

    pub(crate) fn start_map(&mut self, map_name: String, map: MapData, now: Instant) {
        self.player.stop();
        let has_audio = match &map.audio_path {
            Some(path) => {
                self.player.load(path);
                self.player.set_speed(self.state.speed as f32);
                self.player.set_volume(self.volume);
                true
            }
            None => false,
        };

        log::info!(
            "SESSION: Starting {:?} ({} notes, speed {:.1}x, audio: {})",
            map_name,
            map.notes.len(),
            self.state.speed,
            has_audio
        );

        self.play = Some(ActivePlay {
            map_name,
            engine: GameEngine::new(&map, self.windows),
            clock: TimingSource::start(now, self.state.speed, self.state.start_delay_ms),
            has_audio,
            audio_started: false,
            last_judgement: None,
        });
        self.state.mode = SessionMode::Playing;
        self.state.elapsed_ms = -self.state.start_delay_ms;
        self.state.paused = false;
        self.status = None;
    }

    pub(crate) fn stop_map(&mut self, completed: bool) {
        self.player.stop();
        if let Some(play) = self.play.take() {
            let result = PlayResult {
                map_name: play.map_name,
                hits: play.engine.hits(),
                misses: play.engine.misses(),
                total_notes: play.engine.total_notes(),
                accuracy: play.engine.accuracy(),
                completed,
            };
            log::info!(
                "SESSION: {} {:?}: {} hits, {} misses, {:.2}%",
                if completed { "Finished" } else { "Left" },
                result.map_name,
                result.hits,
                result.misses,
                result.accuracy
            );
            self.last_result = Some(result);
        }
        self.state.mode = SessionMode::Menu;
        self.state.paused = false;
    }

    pub fn mode(&self) -> SessionMode {
        self.state.mode
    }

    pub fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> Option<&GameEngine> {
        self.play.as_ref().map(|p| &p.engine)
    }

    pub fn last_result(&self) -> Option<&PlayResult> {
        self.last_result.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Read-only view of the current frame for the renderer.
    pub fn snapshot(&self) -> RenderState {
        match &self.play {
            Some(play) if self.state.mode == SessionMode::Playing => {
                let engine = &play.engine;
                RenderState::InGame(GameplaySnapshot {
                    map_name: play.map_name.clone(),
                    elapsed_ms: self.state.elapsed_ms,
                    visible_notes: engine.visible_notes(self.state.elapsed_ms),
                    hits: engine.hits(),
                    misses: engine.misses(),
                    total_notes: engine.total_notes(),
                    accuracy: engine.accuracy(),
                    last_judgement: play.last_judgement,
                    speed: self.state.speed,
                    paused: self.state.paused,
                })
            }
            _ => RenderState::Menu(MenuSnapshot {
                entries: self
                    .catalog
                    .entries()
                    .iter()
                    .map(|e| e.name.clone())
                    .collect(),
                selected_index: self.catalog.selected_index(),
                speed: self.state.speed,
                status: self.status.clone(),
                last_result: self.last_result.clone(),
            }),
        }
    }
}

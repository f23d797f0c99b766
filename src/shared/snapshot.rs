//! Render snapshots.
//!
//! Snapshots are immutable captures of session state handed to the renderer.
//! The renderer never sees (or mutates) the session itself.

use crate::logic::engine::VisibleNote;
use crate::models::stats::Judgement;

/// High-level render state representing the current game mode.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderState {
    /// Map selection menu.
    Menu(MenuSnapshot),
    /// Active gameplay.
    InGame(GameplaySnapshot),
}

/// Snapshot of the active play.
#[derive(Clone, Debug, PartialEq)]
pub struct GameplaySnapshot {
    pub map_name: String,
    pub elapsed_ms: i64,
    pub visible_notes: Vec<VisibleNote>,
    pub hits: usize,
    pub misses: usize,
    pub total_notes: usize,
    pub accuracy: f64,
    pub last_judgement: Option<Judgement>,
    pub speed: f64,
    pub paused: bool,
}

/// Snapshot of the map selection menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuSnapshot {
    pub entries: Vec<String>,
    pub selected_index: usize,
    pub speed: f64,
    /// Diagnostic from the last failed scan or load.
    pub status: Option<String>,
    pub last_result: Option<PlayResult>,
}

/// Summary of a finished (or abandoned) play.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayResult {
    pub map_name: String,
    pub hits: usize,
    pub misses: usize,
    pub total_notes: usize,
    pub accuracy: f64,
    /// `false` when the player backed out before the end.
    pub completed: bool,
}

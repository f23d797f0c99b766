//! Transitions returned by the per-mode handlers.

use crate::models::engine::MapData;

/// What the session should do after a handler ran.
#[derive(Debug, Clone)]
pub enum Transition {
    /// Stay in the current mode.
    None,
    /// Start playing a loaded map.
    ToGame { map_name: String, map: MapData },
    /// Leave gameplay. `completed` is `false` when the player backed out.
    ToMenu { completed: bool },
    /// Exit the application.
    Exit,
}

//! Harmon: a four-lane falling-note rhythm game.
//!
//! The binary wires these modules together; `generate_map` reuses the map
//! model to write new maps.

pub mod catalog;
pub mod input;
pub mod logic;
pub mod models;
pub mod render;
pub mod shared;
pub mod state;

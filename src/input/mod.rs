//! Keyboard input: winit key events to game actions, collected per frame.

pub mod events;
pub mod keycode;
pub mod manager;

pub use events::{FrameInput, GameAction, RawInputEvent};
pub use manager::InputManager;

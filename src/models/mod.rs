//! Plain data types shared by the gameplay, menu and render layers.

pub mod engine;
pub mod settings;
pub mod stats;

//! Window, GPU and frame composition.

pub mod app;
pub mod context;
pub mod draw;
pub mod pipeline;
pub mod renderer;
pub mod text;

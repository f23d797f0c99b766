//! Game-side logic: judgment, timing and the music player.
//!
//! Everything here runs on the main thread except the rodio worker started by
//! `audio_thread`.

pub mod audio;
pub mod audio_thread;
pub mod clock;
pub mod engine;

pub mod chart;
pub mod constants;
pub mod generator;
pub mod hit_window;
pub mod instance;
pub mod note;
pub mod playfield;

pub use chart::{MapData, MapError, format_notes, load_map, parse_notes};
pub use constants::*;
pub use generator::MapGenerator;
pub use hit_window::TimingWindows;
pub use instance::InstanceRaw;
pub use note::{Note, NoteState};
pub use playfield::PlayfieldLayout;

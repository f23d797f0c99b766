use std::path::Path;
use wgpu::{Device, TextureFormat};
use wgpu_text::glyph_brush::ab_glyph::FontArc;
use wgpu_text::{BrushBuilder, TextBrush};

/// Loads the HUD font and builds a brush for it.
///
/// Returns `None` when the font is missing or unreadable; the game then runs
/// without text.
pub fn load_text_brush(
    device: &Device,
    width: u32,
    height: u32,
    format: TextureFormat,
    font_path: &Path,
) -> Option<TextBrush> {
    let font_data = match std::fs::read(font_path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("RENDER: Cannot read font {:?}: {}. Text disabled.", font_path, e);
            return None;
        }
    };

    match FontArc::try_from_vec(font_data) {
        Ok(font) => {
            log::info!("RENDER: Loaded font {:?}", font_path);
            Some(BrushBuilder::using_font(font).build(device, width, height, format))
        }
        Err(e) => {
            log::warn!("RENDER: Invalid font {:?}: {}. Text disabled.", font_path, e);
            None
        }
    }
}

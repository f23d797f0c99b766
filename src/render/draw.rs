//! Frame composition: turns a `RenderState` into plain draw commands.
//!
//! Nothing here touches the GPU; `Renderer` uploads the rectangles as quad
//! instances and hands the text to the glyph brush.

use crate::models::engine::{NUM_COLUMNS, PlayfieldLayout};
use crate::models::stats::{Judgement, JudgementColors};
use crate::shared::snapshot::{GameplaySnapshot, MenuSnapshot, RenderState};

pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const GRAY: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
pub const RED: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
pub const GREEN: [f32; 4] = [0.0, 0.89, 0.19, 1.0];
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const YELLOW: [f32; 4] = [0.99, 0.98, 0.0, 1.0];

const TEXT_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 30.0;
const MARGIN: f32 = 10.0;
/// Menu entries listed around the selection.
const MENU_VISIBLE_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: [f32; 4],
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        scale: f32,
        color: [f32; 4],
    },
}

impl DrawCommand {
    fn text(text: impl Into<String>, x: f32, y: f32, color: [f32; 4]) -> Self {
        DrawCommand::Text {
            text: text.into(),
            x,
            y,
            scale: TEXT_SIZE,
            color,
        }
    }
}

/// Clear color for each mode.
pub fn background_color(state: &RenderState) -> [f32; 4] {
    match state {
        RenderState::Menu(_) => GRAY,
        RenderState::InGame(_) => BLACK,
    }
}

/// Lane `i` gets a slightly redder shade than lane `i - 1`.
pub fn lane_color(lane: usize) -> [f32; 4] {
    let red = 40.0 + 10.0 * (lane as f32 + 1.0);
    [red / 255.0, 40.0 / 255.0, 40.0 / 255.0, 1.0]
}

pub fn build_frame(state: &RenderState, layout: &PlayfieldLayout, fps: f64) -> Vec<DrawCommand> {
    match state {
        RenderState::Menu(menu) => build_menu(menu, layout, fps),
        RenderState::InGame(game) => build_gameplay(game, layout, fps),
    }
}

fn build_gameplay(game: &GameplaySnapshot, layout: &PlayfieldLayout, fps: f64) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(NUM_COLUMNS + game.visible_notes.len() + 8);

    for lane in 0..NUM_COLUMNS {
        commands.push(DrawCommand::Rect {
            x: layout.lane_x(lane),
            y: 0.0,
            w: layout.lane_width,
            h: layout.screen_height,
            color: lane_color(lane),
        });
    }

    commands.push(DrawCommand::Rect {
        x: layout.playfield_x(),
        y: layout.judgment_y,
        w: layout.playfield_width(),
        h: layout.note_height,
        color: GRAY,
    });

    for note in &game.visible_notes {
        commands.push(DrawCommand::Rect {
            x: layout.lane_x(note.lane),
            y: layout.note_y(note.progress),
            w: layout.lane_width,
            h: layout.note_height,
            color: RED,
        });
    }

    // HUD
    let colors = JudgementColors::new();
    let bottom = layout.screen_height - LINE_HEIGHT;
    commands.push(DrawCommand::text(format!("FPS: {:.0}", fps), MARGIN, MARGIN, GREEN));
    commands.push(DrawCommand::text(
        game.map_name.clone(),
        MARGIN,
        MARGIN + LINE_HEIGHT,
        WHITE,
    ));
    commands.push(DrawCommand::text(
        format!("Timer: {}", game.elapsed_ms),
        MARGIN,
        bottom,
        GREEN,
    ));

    let right = layout.playfield_x() + layout.playfield_width() + 2.0 * MARGIN;
    commands.push(DrawCommand::text(
        format!("Hits: {}", game.hits),
        right,
        MARGIN,
        colors.color(Judgement::Hit),
    ));
    commands.push(DrawCommand::text(
        format!("Misses: {}", game.misses),
        right,
        MARGIN + LINE_HEIGHT,
        colors.color(Judgement::Miss),
    ));
    commands.push(DrawCommand::text(
        format!("Accuracy: {:.2}%", game.accuracy),
        right,
        MARGIN + 2.0 * LINE_HEIGHT,
        WHITE,
    ));
    commands.push(DrawCommand::text(
        format!("Speed: {:.1}x", game.speed),
        right,
        MARGIN + 3.0 * LINE_HEIGHT,
        WHITE,
    ));

    if let Some(judgement) = game.last_judgement {
        let label = match judgement {
            Judgement::Hit => "HIT",
            Judgement::Miss => "MISS",
        };
        commands.push(DrawCommand::text(
            label,
            layout.playfield_x() + layout.playfield_width() / 2.0 - MARGIN * 2.0,
            layout.judgment_y - 2.0 * LINE_HEIGHT,
            colors.color(judgement),
        ));
    }

    if game.paused {
        commands.push(DrawCommand::text(
            "PAUSED",
            layout.screen_width / 2.0 - 3.0 * MARGIN,
            layout.screen_height / 2.0,
            YELLOW,
        ));
    }

    commands
}

fn build_menu(menu: &MenuSnapshot, layout: &PlayfieldLayout, fps: f64) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    let center_x = layout.screen_width / 2.0;
    let mut y = layout.screen_height / 4.0;

    commands.push(DrawCommand::text(format!("FPS: {:.0}", fps), MARGIN, MARGIN, GREEN));
    commands.push(DrawCommand::text("Harmon", center_x - 4.0 * MARGIN, y, GREEN));
    y += LINE_HEIGHT * 1.5;

    let start = menu
        .selected_index
        .saturating_sub(MENU_VISIBLE_ENTRIES / 2)
        .min(menu.entries.len().saturating_sub(MENU_VISIBLE_ENTRIES));
    for (index, name) in menu
        .entries
        .iter()
        .enumerate()
        .skip(start)
        .take(MENU_VISIBLE_ENTRIES)
    {
        let (line, color) = if index == menu.selected_index {
            (format!("> {}", name), YELLOW)
        } else {
            (format!("  {}", name), WHITE)
        };
        commands.push(DrawCommand::text(line, center_x - 8.0 * MARGIN, y, color));
        y += LINE_HEIGHT;
    }

    y += LINE_HEIGHT / 2.0;
    commands.push(DrawCommand::text(
        format!("Speed: {:.1}x", menu.speed),
        center_x - 8.0 * MARGIN,
        y,
        WHITE,
    ));
    y += LINE_HEIGHT;
    commands.push(DrawCommand::text(
        "[Enter] Play  [Up/Down] Select  [PgUp/PgDn] Speed  [F8] Rescan  [F10] Quick Play  [Esc] Quit",
        MARGIN,
        y,
        GREEN,
    ));

    if let Some(result) = &menu.last_result {
        y += LINE_HEIGHT * 1.5;
        let verdict = if result.completed { "Cleared" } else { "Abandoned" };
        commands.push(DrawCommand::text(
            format!(
                "{} {}: {} hits, {} misses of {} ({:.2}%)",
                verdict,
                result.map_name,
                result.hits,
                result.misses,
                result.total_notes,
                result.accuracy
            ),
            MARGIN,
            y,
            WHITE,
        ));
    }

    if let Some(status) = &menu.status {
        commands.push(DrawCommand::text(
            status.clone(),
            MARGIN,
            layout.screen_height - LINE_HEIGHT,
            RED,
        ));
    }

    commands
}

//! Terminal rendering of labeled grids.
//!
//! Every group gets its own color, derived from the group id, and every block
//! type its own glyph. Unlabeled blocks print dim.

use std::io::{self, Write};

use blocky::{Block, DenseGrid, GroupId};
use crossterm::{QueueableCommand, style};

const GLYPHS: [char; 8] = ['#', '@', '%', '&', '*', '+', '=', '~'];

/// Color for a group. Neighboring ids land far apart on the color wheel.
pub fn group_color(group: GroupId) -> style::Color {
    if !group.is_assigned() {
        return style::Color::DarkGrey;
    }
    // Golden ratio stepping around the hue circle.
    let hue = (group.0 as f32 * 0.618_034).fract();
    let (r, g, b) = hue_to_rgb(hue);
    style::Color::Rgb { r, g, b }
}

fn hue_to_rgb(hue: f32) -> (u8, u8, u8) {
    let h = hue * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let scale = |c: f32| (55.0 + c * 200.0) as u8;
    (scale(r), scale(g), scale(b))
}

/// Glyph for a block's type.
pub fn glyph(block: &Block) -> char {
    GLYPHS[block.block_type.0.rem_euclid(GLYPHS.len() as i16) as usize]
}

/// Write `grid` to `out`, top row first (highest y), one colored glyph per
/// block.
pub fn render_grid<W: Write>(out: &mut W, grid: &DenseGrid) -> io::Result<()> {
    let width = grid.width() as usize;
    if width == 0 {
        return Ok(());
    }
    for row in grid.blocks().chunks(width).rev() {
        for block in row {
            if block.group.is_assigned() {
                out.queue(style::SetAttribute(style::Attribute::Reset))?;
            } else {
                out.queue(style::SetAttribute(style::Attribute::Dim))?;
            }
            out.queue(style::SetForegroundColor(group_color(block.group)))?;
            out.queue(style::Print(glyph(block)))?;
            out.queue(style::Print(' '))?;
        }
        out.queue(style::ResetColor)?;
        out.queue(style::Print("\r\n"))?;
    }
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    out.flush()
}

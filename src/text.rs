use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::font::Font;

/// Extra pixels between lines, on top of the font's line height.
pub const DEFAULT_SPACING: f32 = 4.0;

// ── Align ─────────────────────────────────────────────────────────────────────

/// Horizontal alignment of lines within the widest line of a text block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// ── TextBox ───────────────────────────────────────────────────────────────────

/// Tight pixel bounds of a block's ink. `right` and `bottom` are exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    fn include(bounds: &mut Option<TextBox>, x: i32, y: i32) {
        match bounds {
            None => {
                *bounds = Some(TextBox { left: x, top: y, right: x + 1, bottom: y + 1 });
            }
            Some(b) => {
                b.left = b.left.min(x);
                b.top = b.top.min(y);
                b.right = b.right.max(x + 1);
                b.bottom = b.bottom.max(y + 1);
            }
        }
    }
}

// ── TextStyle ─────────────────────────────────────────────────────────────────

/// Layout parameters shared by measuring and drawing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub align: Align,
    /// Extra pixels between successive lines.
    pub spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { align: Align::Left, spacing: DEFAULT_SPACING }
    }
}

// ── layout ────────────────────────────────────────────────────────────────────

/// A character at its pen position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Pen x in pixels, relative to the block origin.
    pub x: f32,
    /// Baseline y in pixels, relative to the block origin.
    pub baseline: f32,
}

/// Position every character of `text` for a block whose top-left is (0, 0).
///
/// # Rules
/// - `'\n'` ends a line. The next baseline is one line height plus
///   `style.spacing` further down. Newlines produce no glyph.
/// - Each line's width is the sum of its advances. Lines are aligned within
///   the widest line per `style.align`.
/// - Characters the font cannot draw are still placed and advance the pen.
pub fn layout(text: &str, font: &Font, style: &TextStyle) -> Vec<PlacedGlyph> {
    let line_step = font.line_height() + style.spacing;
    let ascent = font.ascent();

    let lines: Vec<&str> = text.split('\n').collect();
    let widths: Vec<f32> = lines.iter().map(|line| line_width(line, font)).collect();
    let block_width = widths.iter().copied().fold(0.0f32, f32::max);

    let mut placed = Vec::with_capacity(text.len());
    for (i, (line, width)) in lines.iter().zip(&widths).enumerate() {
        let mut x = match style.align {
            Align::Left => 0.0,
            Align::Center => (block_width - width) / 2.0,
            Align::Right => block_width - width,
        };
        let baseline = ascent + i as f32 * line_step;

        let mut prev = None;
        for ch in line.chars() {
            // Kerning applies before the glyph is placed.
            let advance = font.advance(prev, ch);
            let own = font.advance(None, ch);
            x += advance - own;
            placed.push(PlacedGlyph { ch, x, baseline });
            x += own;
            prev = Some(ch);
        }
    }
    placed
}

fn line_width(line: &str, font: &Font) -> f32 {
    let mut prev = None;
    line.chars()
        .map(|ch| {
            let w = font.advance(prev, ch);
            prev = Some(ch);
            w
        })
        .sum()
}

fn for_each_pixel(placed: &[PlacedGlyph], font: &Font, plot: &mut dyn FnMut(i32, i32, f32)) {
    for g in placed {
        font.rasterize(g.ch, g.x, g.baseline, plot);
    }
}

// ── measure / draw ────────────────────────────────────────────────────────────

/// Ink bounding box of `text` laid out at the origin.
///
/// Returns `None` when nothing would be drawn (empty text, whitespace, or
/// only characters the font lacks).
pub fn measure(text: &str, font: &Font, style: &TextStyle) -> Option<TextBox> {
    let placed = layout(text, font, style);
    let mut bounds = None;
    for_each_pixel(&placed, font, &mut |x: i32, y: i32, _: f32| {
        TextBox::include(&mut bounds, x, y)
    });
    bounds
}

/// Draw `text` with its block origin at the whole-pixel offset `origin`.
pub fn draw(
    canvas: &mut Canvas,
    origin: (i32, i32),
    text: &str,
    font: &Font,
    color: Color,
    style: &TextStyle,
) {
    let placed = layout(text, font, style);
    let (ox, oy) = origin;
    for_each_pixel(&placed, font, &mut |x: i32, y: i32, coverage: f32| {
        canvas.blend(ox + x, oy + y, color, coverage);
    });
}

/// Whole-pixel offset that centres `bounds` in a `width` × `height` area.
///
/// Offsets are integral so the shifted raster is pixel-identical to the
/// measured one, which keeps the ink within ±1 px of centre on both axes.
pub fn centering_offset(bounds: &TextBox, width: u32, height: u32) -> (i32, i32) {
    let ox = ((width as f32 - bounds.width() as f32) / 2.0 - bounds.left as f32).round() as i32;
    let oy = ((height as f32 - bounds.height() as f32) / 2.0 - bounds.top as f32).round() as i32;
    (ox, oy)
}

/// Measure `text`, then draw it centred on the canvas.
///
/// Returns the ink box in canvas coordinates, or `None` if there was nothing
/// to draw (the canvas is left untouched).
pub fn draw_centered(
    canvas: &mut Canvas,
    text: &str,
    font: &Font,
    color: Color,
    style: &TextStyle,
) -> Option<TextBox> {
    let bounds = measure(text, font, style)?;
    let (ox, oy) = centering_offset(&bounds, canvas.width(), canvas.height());
    draw(canvas, (ox, oy), text, font, color, style);

    Some(TextBox {
        left: bounds.left + ox,
        top: bounds.top + oy,
        right: bounds.right + ox,
        bottom: bounds.bottom + oy,
    })
}

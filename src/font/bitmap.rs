use std::collections::HashMap;

// ── Built-in glyph table ──────────────────────────────────────────────────────

/// Glyph cell width in font units (5 ink columns + 1 spacing column).
pub const CELL_WIDTH: u32 = 6;
/// Glyph cell height in font units (7 ink rows + 1 spacing row).
pub const CELL_HEIGHT: u32 = 8;
/// Rows above the baseline. Every ink row sits above it.
pub const ASCENT: u32 = 7;

/// First code point covered by [`BUILTIN_COLUMNS`].
const FIRST: u32 = 0x20;

/// Printable ASCII, U+0020 through U+007E, as 5 columns per glyph.
/// Bit 0 of each column is the top row.
#[rustfmt::skip]
const BUILTIN_COLUMNS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x41, 0x22, 0x14, 0x08, 0x00], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x32], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x03, 0x04, 0x78, 0x04, 0x03], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x00, 0x7F, 0x41, 0x41], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x08, 0x14, 0x54, 0x54, 0x3C], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x00, 0x7F, 0x10, 0x28, 0x44], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x10, 0x08, 0x08, 0x10, 0x08], // '~'
];

// ── Glyph ─────────────────────────────────────────────────────────────────────

/// One character of the built-in bitmap font.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Ink columns, left to right. Bit `n` set means row `n` is inked.
    pub columns: [u8; 5],
}

impl Glyph {
    /// Whether the pixel at (`col`, `row`) in font units is inked.
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        col < 5 && row < ASCENT && self.columns[col as usize] & (1 << row) != 0
    }
}

// ── BitmapFont ────────────────────────────────────────────────────────────────

/// The built-in fixed-cell bitmap font, scaled by a whole-pixel factor.
///
/// This is the last entry of every font fallback chain, so it can never fail
/// to load. It only covers printable ASCII. Other characters still advance the
/// cursor by one cell but draw nothing.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    /// All glyphs in this font, keyed by character.
    pub glyphs: HashMap<char, Glyph>,
    /// Pixels per font unit. Always at least 1.
    pub scale: u32,
}

impl BitmapFont {
    /// Build the built-in font for a requested pixel size.
    ///
    /// `size` is treated as the line height: the scale is `size / 8`,
    /// rounded to the nearest whole pixel and clamped to at least 1.
    pub fn builtin(size: f32) -> Self {
        let scale = (size / CELL_HEIGHT as f32).round().max(1.0) as u32;

        let glyphs = BUILTIN_COLUMNS
            .iter()
            .enumerate()
            .filter_map(|(i, columns)| {
                char::from_u32(FIRST + i as u32).map(|ch| (ch, Glyph { columns: *columns }))
            })
            .collect();

        Self { glyphs, scale }
    }

    pub fn ascent(&self) -> f32 {
        (ASCENT * self.scale) as f32
    }

    pub fn line_height(&self) -> f32 {
        (CELL_HEIGHT * self.scale) as f32
    }

    /// Horizontal advance of any character, in pixels.
    pub fn advance(&self) -> f32 {
        (CELL_WIDTH * self.scale) as f32
    }

    /// Call `plot(x, y, coverage)` for every inked pixel of `ch`.
    ///
    /// `x` is the left edge of the cell and `baseline` the baseline, both in
    /// pixels. Positions are floored to the pixel grid.
    pub fn rasterize(&self, ch: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        let Some(glyph) = self.glyphs.get(&ch) else {
            return;
        };

        let left = x.floor() as i32;
        let top = (baseline - self.ascent()).floor() as i32;
        let s = self.scale as i32;

        for col in 0..5u32 {
            for row in 0..ASCENT {
                if !glyph.is_set(col, row) {
                    continue;
                }
                let px = left + col as i32 * s;
                let py = top + row as i32 * s;
                for dy in 0..s {
                    for dx in 0..s {
                        plot(px + dx, py + dy, 1.0);
                    }
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_printable_ascii() {
        let font = BitmapFont::builtin(8.0);
        assert_eq!(font.glyphs.len(), 95);
        assert!(font.glyphs.contains_key(&' '));
        assert!(font.glyphs.contains_key(&'~'));
        assert!(!font.glyphs.contains_key(&'営'));
    }

    #[test]
    fn scale_rounds_size_to_cells() {
        assert_eq!(BitmapFont::builtin(60.0).scale, 8);
        assert_eq!(BitmapFont::builtin(20.0).scale, 3);
        assert_eq!(BitmapFont::builtin(1.0).scale, 1);
    }

    #[test]
    fn letter_i_has_center_stem() {
        let font = BitmapFont::builtin(8.0);
        let i = &font.glyphs[&'I'];
        for row in 0..ASCENT {
            assert!(i.is_set(2, row), "row {row} of 'I' stem should be inked");
        }
        assert!(!i.is_set(0, 3));
    }
}

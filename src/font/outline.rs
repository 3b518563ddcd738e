use std::path::Path;

use ab_glyph::{Font as _, FontVec, GlyphId, PxScale, ScaleFont, point};

use crate::error::{Error, Result};

/// A TrueType / OpenType face (or one face of a `.ttc` collection) at a fixed
/// pixel size.
pub struct OutlineFont {
    font: FontVec,
    scale: PxScale,
}

impl OutlineFont {
    /// Read `path` and parse face `index` from it.
    ///
    /// `size` is the em size in pixels, so a 60 px font has 60 px from the
    /// em box top to bottom regardless of the face's ascent and descent.
    pub fn load(path: &Path, index: u32, size: f32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, index, size).map_err(|reason| Error::FontParse {
            path: path.to_path_buf(),
            index,
            reason,
        })
    }

    /// Parse face `index` from raw font bytes.
    pub fn from_bytes(data: Vec<u8>, index: u32, size: f32) -> std::result::Result<Self, String> {
        let font = FontVec::try_from_vec_and_index(data, index).map_err(|e| e.to_string())?;
        let scale = match font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
            _ => PxScale::from(size),
        };
        Ok(Self { font, scale })
    }

    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    /// Line pitch without extra spacing: the bottom of the "A" outline,
    /// measured from the top of the line. Falls back to the ascent when the
    /// face has no "A".
    pub fn line_height(&self) -> f32 {
        let ascent = self.ascent();
        let id = self.glyph_id('A');
        if id.0 == 0 {
            return ascent;
        }
        let glyph = id.with_scale_and_position(self.scale, point(0.0, ascent));
        self.font
            .outline_glyph(glyph)
            .map_or(ascent, |outlined| outlined.px_bounds().max.y)
    }

    fn glyph_id(&self, ch: char) -> GlyphId {
        self.font.glyph_id(ch)
    }

    /// Advance of `ch` plus the kerning against the previous character.
    pub fn advance(&self, prev: Option<char>, ch: char) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let id = self.glyph_id(ch);
        let kern = prev.map_or(0.0, |p| scaled.kern(self.glyph_id(p), id));
        kern + scaled.h_advance(id)
    }

    /// Call `plot(x, y, coverage)` for every pixel the outline of `ch` touches.
    pub fn rasterize(&self, ch: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        let glyph = self
            .glyph_id(ch)
            .with_scale_and_position(self.scale, point(x, baseline));
        let Some(outlined) = self.font.outline_glyph(glyph) else {
            return;
        };
        let bounds = outlined.px_bounds();
        let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
        outlined.draw(|gx, gy, coverage| {
            if coverage > 0.0 {
                plot(left + gx as i32, top + gy as i32, coverage.min(1.0));
            }
        });
    }
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("glyphs", &self.font.glyph_count())
            .field("scale", &self.scale)
            .finish()
    }
}

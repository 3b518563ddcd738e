use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};

// ── ColorMode ─────────────────────────────────────────────────────────────────

/// Pixel format of the saved file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Opaque 8-bit RGB. Any alpha in the background colour is dropped.
    #[default]
    Rgb,
    /// 8-bit RGB with straight alpha.
    Rgba,
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// An in-memory pixel buffer that text is drawn onto before saving.
///
/// Pixels are always held as RGBA. An `Rgb` canvas starts opaque and stays
/// opaque, because source-over onto an opaque pixel is opaque.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
    mode: ColorMode,
}

impl Canvas {
    /// Create a `width` × `height` canvas filled with `background`.
    pub fn new(width: u32, height: u32, mode: ColorMode, background: Color) -> Self {
        let fill = match mode {
            ColorMode::Rgb => background.opaque(),
            ColorMode::Rgba => background,
        };
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(fill.0)),
            mode,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Colour at (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|p| Color(p.0))
    }

    /// Composite `color` over the pixel at (`x`, `y`) with `coverage` in `[0, 1]`.
    ///
    /// Out-of-bounds coordinates and zero coverage are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(dst) = self.image.get_pixel_mut_checked(x as u32, y as u32) else {
            return;
        };

        let sa = color.alpha() as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let da = dst.0[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);

        for c in 0..3 {
            let src = color.0[c] as f32;
            let old = dst.0[c] as f32;
            let v = (src * sa + old * da * (1.0 - sa)) / out_a;
            dst.0[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Encode as PNG in this canvas's colour mode and write it to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let result = match self.mode {
            ColorMode::Rgb => DynamicImage::ImageRgba8(self.image.clone())
                .into_rgb8()
                .save_with_format(path, ImageFormat::Png),
            ColorMode::Rgba => self.image.save_with_format(path, ImageFormat::Png),
        };
        result.map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_canvas_forces_opaque_background() {
        let canvas = Canvas::new(4, 4, ColorMode::Rgb, Color([10, 20, 30, 0]));
        assert_eq!(canvas.pixel(0, 0), Some(Color([10, 20, 30, 255])));
    }

    #[test]
    fn full_coverage_replaces_pixel() {
        let mut canvas = Canvas::new(2, 2, ColorMode::Rgb, Color::BRAND_BLUE);
        canvas.blend(1, 1, Color::WHITE, 1.0);
        assert_eq!(canvas.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Color::BRAND_BLUE));
    }

    #[test]
    fn partial_coverage_on_transparent_keeps_foreground_colour() {
        let mut canvas = Canvas::new(1, 1, ColorMode::Rgba, Color::TRANSPARENT);
        canvas.blend(0, 0, Color::WHITE, 0.5);
        let Color([r, g, b, a]) = canvas.pixel(0, 0).unwrap();
        assert_eq!((r, g, b), (255, 255, 255));
        assert!((127..=128).contains(&a), "alpha was {a}");
    }

    #[test]
    fn half_coverage_on_opaque_mixes_channels() {
        let mut canvas = Canvas::new(1, 1, ColorMode::Rgb, Color::BLACK);
        canvas.blend(0, 0, Color::WHITE, 0.5);
        let Color([r, _, _, a]) = canvas.pixel(0, 0).unwrap();
        assert!((127..=128).contains(&r), "red was {r}");
        assert_eq!(a, 255);
    }

    #[test]
    fn zero_coverage_and_out_of_bounds_are_ignored() {
        let mut canvas = Canvas::new(2, 2, ColorMode::Rgba, Color::TRANSPARENT);
        canvas.blend(0, 0, Color::WHITE, 0.0);
        canvas.blend(-1, 0, Color::WHITE, 1.0);
        canvas.blend(0, 2, Color::WHITE, 1.0);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}

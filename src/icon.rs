use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, ColorMode};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::font::{Font, FontChoice, FontSource, load_with_fallback};
use crate::text::{self, Align, DEFAULT_SPACING, TextBox, TextStyle};

// ── IconSpec ──────────────────────────────────────────────────────────────────

/// Everything needed to render one icon file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSpec {
    /// Output file name, relative to the output directory.
    pub file: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub mode: ColorMode,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    /// Label text. `\n` separates lines.
    pub text: String,
    /// Font em size in pixels.
    pub font_size: f32,
    #[serde(default)]
    pub align: Align,
    /// Extra pixels between lines.
    #[serde(default = "default_spacing")]
    pub spacing: f32,
}

fn default_background() -> Color {
    Color::TRANSPARENT
}

fn default_foreground() -> Color {
    Color::WHITE
}

fn default_spacing() -> f32 {
    DEFAULT_SPACING
}

impl IconSpec {
    /// The 192 × 192 full-colour app icon: white "営業 / Bot" on brand blue.
    pub fn color() -> Self {
        Self {
            file: "color.png".to_string(),
            width: 192,
            height: 192,
            mode: ColorMode::Rgb,
            background: Color::BRAND_BLUE,
            foreground: Color::WHITE,
            text: "営業\nBot".to_string(),
            font_size: 60.0,
            align: Align::Center,
            spacing: DEFAULT_SPACING,
        }
    }

    /// The 32 × 32 outline icon: a white "営" on a transparent background.
    pub fn outline() -> Self {
        Self {
            file: "outline.png".to_string(),
            width: 32,
            height: 32,
            mode: ColorMode::Rgba,
            background: Color::TRANSPARENT,
            foreground: Color::WHITE,
            text: "営".to_string(),
            font_size: 20.0,
            align: Align::Left,
            spacing: DEFAULT_SPACING,
        }
    }

    /// Both built-in icons, in the order they are generated.
    pub fn builtin() -> Vec<Self> {
        vec![Self::color(), Self::outline()]
    }

    pub fn style(&self) -> TextStyle {
        TextStyle { align: self.align, spacing: self.spacing }
    }

    /// Reject specs that cannot produce a sensible image.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidIcon {
            file: self.file.clone(),
            reason: reason.to_string(),
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid("width and height must be non-zero"));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(invalid("font_size must be a positive number"));
        }
        if !self.spacing.is_finite() {
            return Err(invalid("spacing must be finite"));
        }
        let name = Path::new(&self.file);
        if self.file.is_empty() || name.file_name().is_none() || name.is_absolute() {
            return Err(invalid("file must be a relative file name"));
        }
        Ok(())
    }

    /// Paint the background and the centred label with an already-loaded font.
    ///
    /// Returns the canvas and the ink box in canvas coordinates (`None` when
    /// the font draws nothing for this text).
    pub fn render(&self, font: &Font) -> Result<(Canvas, Option<TextBox>)> {
        self.validate()?;
        let mut canvas = Canvas::new(self.width, self.height, self.mode, self.background);
        let style = self.style();
        let ink = text::draw_centered(&mut canvas, &self.text, font, self.foreground, &style);
        if ink.is_none() {
            tracing::warn!(
                file = %self.file,
                "label produced no visible pixels with the selected font"
            );
        }
        Ok((canvas, ink))
    }

    /// Load a font through `sources`, render, and save into `out_dir`.
    pub fn generate(
        &self,
        sources: &[FontSource],
        font_dirs: &[PathBuf],
        out_dir: &Path,
    ) -> Result<Generated> {
        self.validate()?;
        let loaded = load_with_fallback(sources, font_dirs, self.font_size);
        let (canvas, ink) = self.render(&loaded.font)?;
        tracing::info!(
            file = %self.file,
            font = %loaded.choice,
            mode = ?canvas.mode(),
            "rendered icon"
        );
        let path = out_dir.join(&self.file);
        canvas.save(&path)?;

        Ok(Generated {
            path,
            width: canvas.width(),
            height: canvas.height(),
            font: loaded.choice,
            ink,
        })
    }
}

// ── Generated ─────────────────────────────────────────────────────────────────

/// Summary of one file written by [`IconSpec::generate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Generated {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub font: FontChoice,
    pub ink: Option<TextBox>,
}

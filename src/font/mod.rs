pub mod bitmap;
pub mod outline;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use bitmap::BitmapFont;
use outline::OutlineFont;

use crate::error::Result;

// ── Font ──────────────────────────────────────────────────────────────────────

/// A font at a fixed pixel size, ready to measure and rasterize text.
#[derive(Debug)]
pub enum Font {
    /// A TrueType / OpenType face loaded from disk.
    Outline(OutlineFont),
    /// The built-in bitmap font.
    Bitmap(BitmapFont),
}

impl Font {
    /// Distance from the top of a line to its baseline, in pixels.
    pub fn ascent(&self) -> f32 {
        match self {
            Font::Outline(f) => f.ascent(),
            Font::Bitmap(f) => f.ascent(),
        }
    }

    /// Height of one line of text, excluding any extra line spacing.
    pub fn line_height(&self) -> f32 {
        match self {
            Font::Outline(f) => f.line_height(),
            Font::Bitmap(f) => f.line_height(),
        }
    }

    /// How far the pen moves after drawing `ch`, with kerning against `prev`.
    pub fn advance(&self, prev: Option<char>, ch: char) -> f32 {
        match self {
            Font::Outline(f) => f.advance(prev, ch),
            Font::Bitmap(f) => f.advance(),
        }
    }

    /// Emit `(x, y, coverage)` for every pixel `ch` covers when its pen
    /// position is `x` on the baseline `baseline`.
    pub fn rasterize(&self, ch: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        match self {
            Font::Outline(f) => f.rasterize(ch, x, baseline, plot),
            Font::Bitmap(f) => f.rasterize(ch, x, baseline, plot),
        }
    }
}

// ── FontSource ────────────────────────────────────────────────────────────────

/// One candidate in a font fallback chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSource {
    /// Absolute path, or a file name looked up under the font directories.
    pub path: PathBuf,
    /// Face index inside a `.ttc` / `.otc` collection.
    #[serde(default)]
    pub index: u32,
}

impl FontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), index: 0 }
    }

    /// The preferred Japanese fonts, in the order they are tried.
    pub fn default_candidates() -> Vec<Self> {
        vec![
            Self::new("/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc"),
            Self::new("/System/Library/Fonts/Hiragino Sans GB.ttc"),
        ]
    }

    /// Find the file this source refers to.
    ///
    /// An existing path is used as-is. Otherwise a relative path is matched by
    /// file name against every file under `font_dirs`, first hit wins.
    pub fn resolve(&self, font_dirs: &[PathBuf]) -> Option<PathBuf> {
        if self.path.is_file() {
            return Some(self.path.clone());
        }
        if self.path.is_absolute() {
            return None;
        }
        let wanted = self.path.file_name()?;

        font_dirs.iter().find_map(|dir| {
            walkdir::WalkDir::new(dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .find(|e| e.file_name() == wanted)
                .map(|e| e.into_path())
        })
    }

    fn load(&self, font_dirs: &[PathBuf], size: f32) -> Result<(OutlineFont, PathBuf)> {
        let path = self.resolve(font_dirs).unwrap_or_else(|| self.path.clone());
        let font = OutlineFont::load(&path, self.index, size)?;
        Ok((font, path))
    }
}

// ── Fallback chain ────────────────────────────────────────────────────────────

/// Which entry of the fallback chain produced a [`LoadedFont`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontChoice {
    File { path: PathBuf, index: u32 },
    Builtin,
}

impl std::fmt::Display for FontChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontChoice::File { path, index: 0 } => write!(f, "{}", path.display()),
            FontChoice::File { path, index } => write!(f, "{} (face {index})", path.display()),
            FontChoice::Builtin => f.write_str("built-in font"),
        }
    }
}

#[derive(Debug)]
pub struct LoadedFont {
    pub font: Font,
    pub choice: FontChoice,
}

/// Try each source in order and return the first that loads.
///
/// Load errors are logged and swallowed. When every source fails (or
/// `sources` is empty) the built-in bitmap font is returned, so this never
/// fails.
pub fn load_with_fallback(sources: &[FontSource], font_dirs: &[PathBuf], size: f32) -> LoadedFont {
    for source in sources {
        match source.load(font_dirs, size) {
            Ok((font, path)) => {
                tracing::debug!(path = %path.display(), index = source.index, size, "font loaded");
                return LoadedFont {
                    font: Font::Outline(font),
                    choice: FontChoice::File { path, index: source.index },
                };
            }
            Err(e) => tracing::debug!("font candidate skipped: {e}"),
        }
    }

    if !sources.is_empty() {
        tracing::warn!(size, "no font candidate could be loaded; using the built-in font");
    }
    LoadedFont {
        font: Font::Bitmap(BitmapFont::builtin(size)),
        choice: FontChoice::Builtin,
    }
}

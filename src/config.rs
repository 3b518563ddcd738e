use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::font::FontSource;
use crate::icon::IconSpec;

// ── Config ────────────────────────────────────────────────────────────────────

/// Generator settings. Every field is optional in the JSON file; a missing
/// field falls back to the built-in value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory the icons are written to.
    pub out_dir: PathBuf,
    /// Font fallback chain, tried in order before the built-in font.
    pub fonts: Vec<FontSource>,
    /// Directories searched (recursively) for font entries given by file name.
    pub font_dirs: Vec<PathBuf>,
    /// Icons to generate, in order.
    pub icons: Vec<IconSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            fonts: FontSource::default_candidates(),
            font_dirs: Vec::new(),
            icons: IconSpec::builtin(),
        }
    }
}

impl Config {
    /// Parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every icon before anything is written.
    pub fn validate(&self) -> Result<()> {
        self.icons.iter().try_for_each(IconSpec::validate)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

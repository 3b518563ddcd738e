//! Error types for icon generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading fonts, rendering or saving icons.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but are not a usable font face.
    #[error("Invalid font {path} (face {index}): {reason}")]
    FontParse {
        path: PathBuf,
        index: u32,
        reason: String,
    },

    /// PNG encoding or writing failed.
    #[error("Failed to save image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A colour string could not be parsed.
    #[error("Invalid colour: {0:?}")]
    InvalidColor(String),

    /// An icon definition cannot be rendered as given.
    #[error("Invalid icon {file}: {reason}")]
    InvalidIcon { file: String, reason: String },

    /// The configuration file is malformed.
    #[error("Invalid configuration {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

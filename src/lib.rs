pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod icon;
pub mod text;

pub use error::{Error, Result};

//! Palette construction errors.

use std::path::PathBuf;

/// Errors that can occur while building or persisting a palette.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Palette must contain at least one color")]
    Empty,

    #[error("Palette has {count} colors, at most 256 fit in an indexed image")]
    TooManyEntries { count: usize },

    #[error("Palette color ({r}, {g}, {b}) appears more than once")]
    DuplicateColor { r: u8, g: u8, b: u8 },

    #[error("Failed to write palette image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to remove stale palette image: {0}")]
    Remove(#[from] std::io::Error),
}

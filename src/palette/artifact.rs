//! Palette image written to disk for ffmpeg's `paletteuse` filter.

use std::fs;
use std::io;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use super::{Palette, PaletteError, PALETTE_SLOTS};

/// File name used when the palette image sits next to the executable.
pub const PALETTE_FILE_NAME: &str = "palette.png";

/// Side length of the square palette image (16 x 16 = 256 slots).
const SIDE: u32 = 16;

/// Render the palette as a 16x16 image; pixel (x, y) holds slot `x + 16 * y`.
pub fn palette_image(palette: &Palette) -> RgbImage {
    let slots = palette.padded_rgb();
    debug_assert_eq!(slots.len(), PALETTE_SLOTS);
    RgbImage::from_fn(SIDE, SIDE, |x, y| slots[(x + y * SIDE) as usize])
}

/// Regenerate the palette image at `path`.
///
/// Any previous file is removed first; a missing file is not an error.
pub fn write_palette_image(palette: &Palette, path: &Path) -> Result<(), PaletteError> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(PaletteError::Remove(e)),
    }

    palette_image(palette)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| PaletteError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), colors = palette.len(), "wrote palette image");
    Ok(())
}

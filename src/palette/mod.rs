//! Fixed terminal color palette.
//!
//! A palette is a closed list of representative RGB colors, each paired with
//! the ANSI styling that displays it. Indexed images always have 256 slots,
//! so every index past the real colors resolves to the first entry.
//!
//! # Module Structure
//!
//! - [`ansi`] - Escape sequences for display codes
//! - [`artifact`] - The 16x16 palette image handed to ffmpeg

pub mod ansi;
mod artifact;
mod error;

use image::Rgb;

pub use ansi::{AnsiColor, DisplayCode, Intensity, RESET};
pub use artifact::{palette_image, write_palette_image, PALETTE_FILE_NAME};
pub use error::PaletteError;

/// Number of slots in an indexed image palette.
pub const PALETTE_SLOTS: usize = 256;

/// One palette color and the styling used to display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub rgb: Rgb<u8>,
    pub code: DisplayCode,
}

impl PaletteEntry {
    pub const fn new(rgb: [u8; 3], color: AnsiColor, intensity: Intensity) -> Self {
        Self {
            rgb: Rgb(rgb),
            code: DisplayCode::new(color, intensity),
        }
    }
}

/// Standard colors, tuned against a typical dark terminal theme.
const STANDARD: [PaletteEntry; 24] = {
    use AnsiColor::*;
    use Intensity::*;
    [
        PaletteEntry::new([30, 34, 36], Black, Dim),
        PaletteEntry::new([10, 39, 53], Black, Normal),
        PaletteEntry::new([85, 87, 87], Black, Bright),
        PaletteEntry::new([160, 160, 160], White, Dim),
        PaletteEntry::new([220, 220, 220], White, Normal),
        PaletteEntry::new([255, 255, 255], White, Bright),
        PaletteEntry::new([88, 0, 0], Red, Dim),
        PaletteEntry::new([204, 0, 0], Red, Normal),
        PaletteEntry::new([239, 41, 41], Red, Bright),
        PaletteEntry::new([52, 103, 4], Green, Dim),
        PaletteEntry::new([78, 154, 6], Green, Normal),
        PaletteEntry::new([138, 226, 52], Green, Bright),
        PaletteEntry::new([131, 107, 0], Yellow, Dim),
        PaletteEntry::new([169, 160, 0], Yellow, Normal),
        PaletteEntry::new([252, 233, 79], Yellow, Bright),
        PaletteEntry::new([34, 67, 109], Blue, Dim),
        PaletteEntry::new([52, 101, 164], Blue, Normal),
        PaletteEntry::new([173, 127, 168], Blue, Bright),
        PaletteEntry::new([90, 60, 90], Magenta, Dim),
        PaletteEntry::new([125, 80, 125], Magenta, Normal),
        PaletteEntry::new([190, 130, 190], Magenta, Bright),
        PaletteEntry::new([4, 101, 103], Cyan, Dim),
        PaletteEntry::new([6, 152, 154], Cyan, Normal),
        PaletteEntry::new([52, 226, 226], Cyan, Bright),
    ]
};

/// An ordered, validated set of palette entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from explicit entries.
    ///
    /// Requires between 1 and 256 entries with distinct RGB values.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        if entries.len() > PALETTE_SLOTS {
            return Err(PaletteError::TooManyEntries {
                count: entries.len(),
            });
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|other| other.rgb == entry.rgb) {
                let [r, g, b] = entry.rgb.0;
                return Err(PaletteError::DuplicateColor { r, g, b });
            }
        }
        Ok(Self { entries })
    }

    /// The 24-color palette: eight ANSI colors at three intensities.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD.to_vec(),
        }
    }

    /// Number of real (non-padding) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The real entries, in index order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Resolve any index, padding slots fall back to entry 0.
    pub fn entry(&self, index: u8) -> &PaletteEntry {
        self.entries
            .get(index as usize)
            .unwrap_or(&self.entries[0])
    }

    /// The full 256-slot palette as RGB triples.
    pub fn padded_rgb(&self) -> Vec<Rgb<u8>> {
        (0..PALETTE_SLOTS)
            .map(|i| self.entry(i as u8).rgb)
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

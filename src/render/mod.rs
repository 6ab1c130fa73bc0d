//! Conversion of quantized frames into printable strings.
//!
//! Every cell is drawn as a full block glyph preceded by its palette
//! entry's styling. When a cell's styled glyph is identical to the one
//! before it (in row-major order, across row breaks) only the bare glyph is
//! written and the terminal keeps the previous style. The output always
//! ends with a style reset.

mod size;

use image::RgbImage;

use crate::palette::{Palette, RESET};
use crate::quantize::{IndexGrid, Quantizer};

pub use size::{TermSize, FALLBACK_SIZE};

/// The glyph drawn for every cell.
pub const BLOCK: char = '█';

/// Knobs for string generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Skip repeated styling for runs of the same color
    pub run_length: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { run_length: true }
    }
}

/// Everything needed to turn a decoded frame into a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub size: TermSize,
    /// Cells removed from the terminal width and height
    pub margin: u16,
    pub options: RenderOptions,
}

impl RenderSettings {
    pub const DEFAULT_MARGIN: u16 = 2;

    pub fn new(size: TermSize) -> Self {
        Self {
            size,
            margin: Self::DEFAULT_MARGIN,
            options: RenderOptions::default(),
        }
    }

    /// Target grid dimensions.
    pub fn target(&self) -> (u32, u32) {
        self.size.drawable(self.margin)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::new(TermSize::default())
    }
}

/// Render a full-color frame: quantize, resize to the drawable area, render.
pub fn render_image(
    image: &RgbImage,
    quantizer: &Quantizer,
    palette: &Palette,
    settings: &RenderSettings,
) -> String {
    let (width, height) = settings.target();
    let grid = quantizer.quantize(image).resize_nearest(width, height);
    render_grid(&grid, palette, settings.options)
}

/// Render an index grid to a string as-is.
pub fn render_grid(grid: &IndexGrid, palette: &Palette, options: RenderOptions) -> String {
    // Worst case: two escapes (~10 bytes) plus a 3-byte glyph per cell
    let cells = grid.width() as usize * grid.height() as usize;
    let mut output = String::with_capacity(cells * 13 + grid.height() as usize + RESET.len());

    let mut glyph = String::with_capacity(16);
    let mut last = String::with_capacity(16);

    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            output.push('\n');
        }
        for &index in row {
            glyph.clear();
            palette.entry(index).code.push_prefix(&mut glyph);
            glyph.push(BLOCK);

            if options.run_length && glyph == last {
                output.push(BLOCK);
            } else {
                output.push_str(&glyph);
            }
            std::mem::swap(&mut glyph, &mut last);
        }
    }

    output.push_str(RESET);
    output
}

//! Nearest-color quantization onto a fixed palette.
//!
//! The quantizer precomputes a lookup cube over the whole RGB space at
//! 6 bits per channel (262,144 cells). Each cell stores the index of the
//! palette color closest to the cell center by squared Euclidean distance,
//! ties going to the lower index. Cells that contain an exact palette color
//! are then pinned to that color, so palette colors always map to themselves.
//! Per-pixel work is a single table lookup.

use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::palette::Palette;

const CUBE_BITS: u32 = 6;
const CUBE_SIDE: usize = 1 << CUBE_BITS;
const SHIFT: u32 = 8 - CUBE_BITS;

/// Grid of palette indices, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl IndexGrid {
    /// Build a grid from raw row-major indices.
    ///
    /// Returns `None` if `indices.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, indices: Vec<u8>) -> Option<Self> {
        if indices.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            indices,
        })
    }

    /// A grid filled with a single index.
    pub fn filled(width: u32, height: u32, index: u8) -> Self {
        Self {
            width,
            height,
            indices: vec![index; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }

    /// Iterate over rows of indices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.indices.chunks(self.width.max(1) as usize)
    }

    /// Resize with nearest-neighbour sampling.
    ///
    /// Indices are never blended, so every output value already exists in
    /// the source grid. Sampling uses pixel centers.
    pub fn resize_nearest(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        if self.width == 0 || self.height == 0 {
            return Self::filled(width, height, 0);
        }

        let src_x: Vec<u32> = (0..width)
            .map(|x| sample_coord(x, width, self.width))
            .collect();
        let mut indices = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let sy = sample_coord(y, height, self.height);
            indices.extend(src_x.iter().map(|&sx| self.get(sx, sy)));
        }

        Self {
            width,
            height,
            indices,
        }
    }
}

/// Map a destination coordinate to the source coordinate whose center is nearest.
fn sample_coord(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    let center = (dst as u64 * 2 + 1) * src_len as u64 / (dst_len as u64 * 2);
    (center as u32).min(src_len - 1)
}

/// Precomputed RGB to palette-index lookup.
#[derive(Clone)]
pub struct Quantizer {
    cube: Vec<u8>,
}

impl Quantizer {
    /// Build the lookup cube for `palette`.
    pub fn new(palette: &Palette) -> Self {
        let colors: Vec<[u8; 3]> = palette.entries().iter().map(|e| e.rgb.0).collect();

        let mut cube = vec![0u8; CUBE_SIDE * CUBE_SIDE * CUBE_SIDE];
        cube.par_chunks_mut(CUBE_SIDE * CUBE_SIDE)
            .enumerate()
            .for_each(|(r, plane)| {
                for (i, slot) in plane.iter_mut().enumerate() {
                    let center = [
                        cell_center(r),
                        cell_center(i / CUBE_SIDE),
                        cell_center(i % CUBE_SIDE),
                    ];
                    *slot = nearest(&colors, center);
                }
            });

        // Lowest index wins if two colors share a cell
        for (index, color) in colors.iter().enumerate().rev() {
            cube[cell(*color)] = index as u8;
        }

        tracing::debug!(colors = colors.len(), cells = cube.len(), "built quantizer cube");
        Self { cube }
    }

    /// Palette index for a single color.
    pub fn index_of(&self, color: Rgb<u8>) -> u8 {
        self.cube[cell(color.0)]
    }

    /// Map every pixel of `image` to its palette index.
    pub fn quantize(&self, image: &RgbImage) -> IndexGrid {
        IndexGrid {
            width: image.width(),
            height: image.height(),
            indices: image.pixels().map(|p| self.index_of(*p)).collect(),
        }
    }
}

impl std::fmt::Debug for Quantizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quantizer")
            .field("cells", &self.cube.len())
            .finish()
    }
}

fn cell([r, g, b]: [u8; 3]) -> usize {
    let (r, g, b) = ((r >> SHIFT) as usize, (g >> SHIFT) as usize, (b >> SHIFT) as usize);
    (r * CUBE_SIDE + g) * CUBE_SIDE + b
}

fn cell_center(cell: usize) -> u8 {
    ((cell << SHIFT) | (1 << (SHIFT - 1))) as u8
}

fn nearest(colors: &[[u8; 3]], target: [u8; 3]) -> u8 {
    let mut best = 0usize;
    let mut best_dist = u32::MAX;
    for (i, color) in colors.iter().enumerate() {
        let dist = distance_sq(*color, target);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best as u8
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

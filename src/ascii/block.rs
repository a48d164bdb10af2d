//! Block geometry and per-block aggregation.

use image::Rgb;

use crate::raster::{read_luminance, read_pixel, ColorImage, LuminanceImage};

/// Half-open square region `[row, row + size) x [col, col + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub row: u32,
    pub col: u32,
    pub size: u32,
}

impl Block {
    pub fn new(row: u32, col: u32, size: u32) -> Self {
        Self { row, col, size }
    }

    pub fn row_end(&self) -> u32 {
        self.row + self.size
    }

    pub fn col_end(&self) -> u32 {
        self.col + self.size
    }

    pub fn pixel_count(&self) -> u64 {
        self.size as u64 * self.size as u64
    }

    /// Check whether the block lies entirely inside `[0, rows) x [0, cols)`.
    pub fn fits(&self, rows: u32, cols: u32) -> bool {
        self.row_end() <= rows && self.col_end() <= cols
    }
}

/// Mean luminance and mean color of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    pub luminance: u8,
    pub color: Rgb<u8>,
}

/// Average color and luminance over every pixel of `block`.
///
/// Sums are accumulated as integers and divided once by the pixel count,
/// truncating toward zero. The block must be non-empty and inside both
/// images; the block processor only hands over blocks that are.
pub fn aggregate(block: &Block, color: &ColorImage, luma: &LuminanceImage) -> BlockStats {
    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut sum_b = 0u64;
    let mut sum_l = 0u64;

    for row in block.row..block.row_end() {
        for col in block.col..block.col_end() {
            let [r, g, b] = read_pixel(color, row, col);
            sum_r += r as u64;
            sum_g += g as u64;
            sum_b += b as u64;
            sum_l += read_luminance(luma, row, col) as u64;
        }
    }

    // a zero-sized block has no pixels and averages to black
    let count = block.pixel_count().max(1);
    BlockStats {
        luminance: (sum_l / count) as u8,
        color: Rgb([
            (sum_r / count) as u8,
            (sum_g / count) as u8,
            (sum_b / count) as u8,
        ]),
    }
}

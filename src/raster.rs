//! Raster buffer roles and accessors.
//!
//! All rasters are `image::ImageBuffer`s tagged by pixel type. Color data is
//! always stored as **R, G, B** (`Rgb<u8>`), luminance as one byte per pixel.
//! Coordinates in this crate are given as `(row, col)`.

use image::{GrayImage, Rgb, RgbImage};

/// Source color raster (R, G, B, 8 bits per channel).
pub type ColorImage = RgbImage;

/// Single-channel luminance raster, congruent with its [`ColorImage`].
pub type LuminanceImage = GrayImage;

/// Destination raster returned by a conversion.
pub type OutputCanvas = RgbImage;

/// Bytes per canvas pixel.
const CHANNELS: usize = 3;

/// Read the color of the pixel at `(row, col)`.
///
/// Panics if the coordinate is outside the image, like `ImageBuffer::get_pixel`.
#[inline]
pub fn read_pixel(image: &ColorImage, row: u32, col: u32) -> [u8; 3] {
    image.get_pixel(col, row).0
}

/// Read the luminance of the pixel at `(row, col)`.
#[inline]
pub fn read_luminance(image: &LuminanceImage, row: u32, col: u32) -> u8 {
    image.get_pixel(col, row).0[0]
}

/// Image size as `(rows, cols)`.
#[inline]
pub fn rows_cols<P: image::Pixel>(image: &image::ImageBuffer<P, Vec<P::Subpixel>>) -> (u32, u32) {
    (image.height(), image.width())
}

/// Mutable view over a run of whole canvas rows.
///
/// A strip owns `rows` consecutive rows starting at `first_row`. Writes are
/// addressed in absolute image coordinates and rejected outside the strip.
#[derive(Debug)]
pub struct StripMut<'a> {
    data: &'a mut [u8],
    width: u32,
    first_row: u32,
    rows: u32,
}

impl<'a> StripMut<'a> {
    /// Wrap `data`, which must hold exactly `rows * width` RGB pixels.
    fn new(data: &'a mut [u8], width: u32, first_row: u32) -> Self {
        let row_bytes = width as usize * CHANNELS;
        let rows = (data.len() / row_bytes) as u32;
        Self {
            data,
            width,
            first_row,
            rows,
        }
    }

    /// First image row covered by this strip.
    pub fn first_row(&self) -> u32 {
        self.first_row
    }

    /// One past the last image row covered by this strip.
    pub fn end_row(&self) -> u32 {
        self.first_row + self.rows
    }

    /// Number of rows in this strip.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Check whether `(row, col)` falls inside this strip.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.first_row && row < self.end_row() && col < self.width
    }

    /// Write one pixel. Returns `false` (and writes nothing) if `(row, col)`
    /// lies outside the strip.
    pub fn put_pixel(&mut self, row: u32, col: u32, color: Rgb<u8>) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        let idx = ((row - self.first_row) as usize * self.width as usize + col as usize) * CHANNELS;
        self.data[idx..idx + CHANNELS].copy_from_slice(&color.0);
        true
    }

    /// Read one pixel back, if it lies inside the strip.
    pub fn get_pixel(&self, row: u32, col: u32) -> Option<Rgb<u8>> {
        if !self.contains(row, col) {
            return None;
        }
        let idx = ((row - self.first_row) as usize * self.width as usize + col as usize) * CHANNELS;
        Some(Rgb([self.data[idx], self.data[idx + 1], self.data[idx + 2]]))
    }
}

/// Split a canvas into disjoint strips of `grain` rows each.
///
/// The last strip is truncated to the canvas height. An empty canvas (or a
/// zero grain) yields no strips.
pub fn split_into_strips(canvas: &mut OutputCanvas, grain: u32) -> Vec<StripMut<'_>> {
    let width = canvas.width();
    if width == 0 || canvas.height() == 0 || grain == 0 {
        return Vec::new();
    }

    let strip_bytes = width as usize * CHANNELS * grain as usize;
    let data: &mut [u8] = canvas;
    data.chunks_mut(strip_bytes)
        .enumerate()
        .map(|(i, chunk)| StripMut::new(chunk, width, i as u32 * grain))
        .collect()
}

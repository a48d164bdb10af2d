//! Image to glyph-mosaic conversion.
//!
//! The converter splits the canvas into horizontal strips and paints each
//! strip on the rayon pool. Strips are disjoint mutable slices of the canvas,
//! so workers never share a pixel and no locking is involved.

use rayon::prelude::*;

use super::error::ConvertError;
use super::font::{BitmapFont, GlyphRenderer};
use super::grayscale::{Bt601, LuminanceProvider};
use super::strip::paint_strip;
use crate::raster::{rows_cols, split_into_strips, ColorImage, OutputCanvas};

/// Default block side length in pixels.
pub const DEFAULT_BLOCK_SIZE: u32 = 16;

/// Default number of rows per strip.
pub const DEFAULT_GRAIN: u32 = 500;

/// Validated conversion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    block_size: u32,
    grain: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            grain: DEFAULT_GRAIN,
        }
    }
}

impl ConvertOptions {
    /// Create options, rejecting a zero block size or grain.
    pub fn new(block_size: u32, grain: u32) -> Result<Self, ConvertError> {
        if block_size == 0 {
            return Err(ConvertError::DegenerateBlock(block_size));
        }
        if grain == 0 {
            return Err(ConvertError::DegenerateGrain(grain));
        }
        Ok(Self { block_size, grain })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn grain(&self) -> u32 {
        self.grain
    }

    /// Rows per strip actually used: the grain rounded down to a whole
    /// number of blocks, and never less than one block.
    ///
    /// Strip boundaries therefore always coincide with block boundaries.
    pub fn effective_grain(&self) -> u32 {
        let aligned = self.grain - self.grain % self.block_size;
        aligned.max(self.block_size)
    }
}

/// Counters for one finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    pub strips: usize,
    pub glyphs: usize,
}

/// Stateless converter, generic over its luminance and glyph collaborators.
///
/// A converter may be shared and called concurrently; each call owns its
/// own luminance image and canvas.
#[derive(Debug, Clone, Default)]
pub struct Converter<L = Bt601, R = BitmapFont> {
    options: ConvertOptions,
    luminance: L,
    renderer: R,
}

impl Converter {
    /// Converter using BT.601 luminance and the built-in bitmap font.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            luminance: Bt601,
            renderer: BitmapFont::default(),
        }
    }
}

impl<L, R> Converter<L, R>
where
    L: LuminanceProvider,
    R: GlyphRenderer,
{
    /// Converter with injected collaborators.
    pub fn with_collaborators(options: ConvertOptions, luminance: L, renderer: R) -> Self {
        Self {
            options,
            luminance,
            renderer,
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Render `color` as a glyph mosaic.
    ///
    /// The returned canvas has the same size as the input. It starts as a
    /// copy of the input; every whole block is then overpainted with its
    /// glyph, so trailing rows and columns that do not fill a block keep the
    /// source pixels.
    pub fn convert(&self, color: &ColorImage) -> Result<OutputCanvas, ConvertError> {
        self.convert_with_summary(color).map(|(canvas, _)| canvas)
    }

    /// Like [`convert`](Self::convert), also reporting how much was drawn.
    pub fn convert_with_summary(
        &self,
        color: &ColorImage,
    ) -> Result<(OutputCanvas, ConversionSummary), ConvertError> {
        let luma = self.luminance.luminance(color);

        let (rows, cols) = rows_cols(color);
        let (luma_rows, luma_cols) = rows_cols(&luma);
        if (rows, cols) != (luma_rows, luma_cols) {
            return Err(ConvertError::InputDimensionMismatch {
                color_rows: rows,
                color_cols: cols,
                luminance_rows: luma_rows,
                luminance_cols: luma_cols,
            });
        }

        let block_size = self.options.block_size;
        let grain = self.options.effective_grain();
        log::debug!(
            "converting {}x{} image: block={} grain={}",
            cols,
            rows,
            block_size,
            grain
        );

        let mut canvas = color.clone();
        let strips = split_into_strips(&mut canvas, grain);
        let strip_count = strips.len();
        let renderer = &self.renderer;

        let glyphs = strips
            .into_par_iter()
            .map(|mut strip| paint_strip(color, &luma, &mut strip, block_size, renderer))
            .collect::<Result<Vec<usize>, ConvertError>>()?
            .into_iter()
            .sum();

        let summary = ConversionSummary {
            strips: strip_count,
            glyphs,
        };
        log::debug!(
            "drew {} glyphs across {} strips",
            summary.glyphs,
            summary.strips
        );
        Ok((canvas, summary))
    }
}

/// Convert with default options, BT.601 luminance and the bitmap font.
pub fn convert(color: &ColorImage) -> Result<OutputCanvas, ConvertError> {
    Converter::new(ConvertOptions::default()).convert(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_reject_zero_block() {
        assert_eq!(
            ConvertOptions::new(0, 500),
            Err(ConvertError::DegenerateBlock(0))
        );
    }

    #[test]
    fn test_options_reject_zero_grain() {
        assert_eq!(
            ConvertOptions::new(8, 0),
            Err(ConvertError::DegenerateGrain(0))
        );
    }

    #[test]
    fn test_effective_grain_is_block_aligned() {
        assert_eq!(ConvertOptions::new(16, 500).unwrap().effective_grain(), 496);
        assert_eq!(ConvertOptions::new(10, 500).unwrap().effective_grain(), 500);
        assert_eq!(ConvertOptions::new(16, 5).unwrap().effective_grain(), 16);
        assert_eq!(ConvertOptions::new(1, 1).unwrap().effective_grain(), 1);
    }

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.block_size(), DEFAULT_BLOCK_SIZE);
        assert_eq!(options.grain(), DEFAULT_GRAIN);
    }

    #[test]
    fn test_empty_image() {
        let canvas = convert(&ColorImage::new(0, 0)).unwrap();
        assert_eq!(canvas.dimensions(), (0, 0));
    }

    #[test]
    fn test_luminance_provider_need_not_be_sync() {
        use crate::raster::LuminanceImage;
        use std::cell::Cell;

        // Cell is Send but not Sync; it stays on the calling thread.
        struct Counting(Cell<usize>);
        impl LuminanceProvider for Counting {
            fn luminance(&self, image: &ColorImage) -> LuminanceImage {
                self.0.set(self.0.get() + 1);
                crate::ascii::to_grayscale(image)
            }
        }

        let converter = Converter::with_collaborators(
            ConvertOptions::new(4, 4).unwrap(),
            Counting(Cell::new(0)),
            BitmapFont::new(),
        );
        let (canvas, summary) = converter
            .convert_with_summary(&ColorImage::new(8, 12))
            .unwrap();

        assert_eq!(canvas.dimensions(), (8, 12));
        assert_eq!(summary.glyphs, 6);
        assert_eq!(converter.luminance.0.get(), 1);
    }
}

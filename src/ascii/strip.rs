//! Per-strip block processing.

use super::block::{aggregate, Block};
use super::error::ConvertError;
use super::font::{Glyph, GlyphRenderer};
use super::mapping::glyph_for_luminance;
use super::scale::compute_scale;
use crate::raster::{ColorImage, LuminanceImage, StripMut};

/// Draw one glyph per whole block inside `strip`.
///
/// Blocks are visited column by column, top to bottom within each column.
/// A block is processed only if it fits entirely inside the strip's rows and
/// the image's columns; partial blocks at the edges are left untouched.
///
/// # Returns
/// The number of glyphs drawn, or [`ConvertError::DegenerateBlock`] when
/// `block_size` is zero.
pub fn paint_strip<R>(
    color: &ColorImage,
    luma: &LuminanceImage,
    strip: &mut StripMut<'_>,
    block_size: u32,
    renderer: &R,
) -> Result<usize, ConvertError>
where
    R: GlyphRenderer + ?Sized,
{
    if block_size == 0 {
        return Err(ConvertError::DegenerateBlock(block_size));
    }

    let cols = color.width();
    let (low_row, high_row) = (strip.first_row(), strip.end_row());
    let step = block_size as usize;
    let mut drawn = 0;

    for col in (0..cols).step_by(step) {
        for row in (low_row..high_row).step_by(step) {
            let block = Block::new(row, col, block_size);
            if block.col_end() > cols || block.row_end() > high_row {
                continue;
            }
            paint_block(&block, color, luma, strip, renderer)?;
            drawn += 1;
        }
    }

    log::trace!("strip rows {}..{}: {} glyphs", low_row, high_row, drawn);
    Ok(drawn)
}

fn paint_block<R>(
    block: &Block,
    color: &ColorImage,
    luma: &LuminanceImage,
    strip: &mut StripMut<'_>,
    renderer: &R,
) -> Result<(), ConvertError>
where
    R: GlyphRenderer + ?Sized,
{
    let stats = aggregate(block, color, luma);
    let ch = glyph_for_luminance(stats.luminance);
    let fail = |source| ConvertError::GlyphRendering {
        ch,
        row: block.row,
        col: block.col,
        source,
    };

    let natural = renderer.measure(ch).map_err(fail)?;
    let glyph = Glyph {
        ch,
        color: stats.color,
        scale: compute_scale(natural, block.size, block.size),
    };
    renderer
        .draw(strip, &glyph, block.row, block.col)
        .map_err(fail)
}

//! Glyph metrics and drawing.
//!
//! [`GlyphRenderer`] is the seam between the converter and whatever
//! rasterizes text. [`BitmapFont`] is the built-in implementation, backed by
//! the public-domain `font8x8` tables.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::Rgb;

use super::error::GlyphError;
use super::scale::GlyphSize;
use crate::raster::StripMut;

/// Character drawn for one block, with its color and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb<u8>,
    pub scale: f64,
}

/// Measures and draws single-character glyphs.
///
/// Implementations are shared by every strip worker of a conversion, hence
/// the `Sync` bound.
pub trait GlyphRenderer: Sync {
    /// Natural size of `ch` at unit scale.
    fn measure(&self, ch: char) -> Result<GlyphSize, GlyphError>;

    /// Draw `glyph` with its top-left corner at `(row, col)`.
    fn draw(
        &self,
        target: &mut StripMut<'_>,
        glyph: &Glyph,
        row: u32,
        col: u32,
    ) -> Result<(), GlyphError>;
}

impl<T: GlyphRenderer + ?Sized> GlyphRenderer for &T {
    fn measure(&self, ch: char) -> Result<GlyphSize, GlyphError> {
        (**self).measure(ch)
    }

    fn draw(
        &self,
        target: &mut StripMut<'_>,
        glyph: &Glyph,
        row: u32,
        col: u32,
    ) -> Result<(), GlyphError> {
        (**self).draw(target, glyph, row, col)
    }
}

/// Character drawn in place of characters the font has no bitmap for.
pub const DEFAULT_FALLBACK: char = '?';

/// 8x8 bitmap font covering Basic Latin and Latin-1.
///
/// The natural size of a glyph is its ink bounding box, so `'!'` is narrow
/// and `'W'` is wide. Characters without ink (controls, DEL, the C1 range)
/// are drawn with the fallback character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    fallback: Option<char>,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self {
            fallback: Some(DEFAULT_FALLBACK),
        }
    }
}

impl BitmapFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font that substitutes `fallback` for characters it cannot draw.
    pub fn with_fallback(fallback: char) -> Self {
        Self {
            fallback: Some(fallback),
        }
    }

    /// Font that reports [`GlyphError::Unsupported`] instead of substituting.
    pub fn without_fallback() -> Self {
        Self { fallback: None }
    }

    fn resolve(&self, ch: char) -> Result<Bitmap, GlyphError> {
        if let Some(bitmap) = Bitmap::lookup(ch) {
            return Ok(bitmap);
        }
        match self.fallback.and_then(Bitmap::lookup) {
            Some(bitmap) => {
                log::trace!("no bitmap for {:?}, drawing fallback", ch);
                Ok(bitmap)
            }
            None => Err(GlyphError::Unsupported(ch)),
        }
    }
}

impl GlyphRenderer for BitmapFont {
    fn measure(&self, ch: char) -> Result<GlyphSize, GlyphError> {
        let bitmap = self.resolve(ch)?;
        Ok(GlyphSize {
            width: bitmap.width,
            height: bitmap.height,
        })
    }

    fn draw(
        &self,
        target: &mut StripMut<'_>,
        glyph: &Glyph,
        row: u32,
        col: u32,
    ) -> Result<(), GlyphError> {
        if !(glyph.scale.is_finite() && glyph.scale > 0.0) {
            return Err(GlyphError::InvalidScale(glyph.scale));
        }
        let bitmap = self.resolve(glyph.ch)?;

        let out_width = scaled_extent(bitmap.width, glyph.scale);
        let out_height = scaled_extent(bitmap.height, glyph.scale);

        // Nearest-neighbour sampling of the ink box.
        for dy in 0..out_height {
            let sy = bitmap.top + ((dy as f64 / glyph.scale) as u32).min(bitmap.height - 1);
            for dx in 0..out_width {
                let sx = bitmap.left + ((dx as f64 / glyph.scale) as u32).min(bitmap.width - 1);
                if !bitmap.is_set(sx, sy) {
                    continue;
                }
                let (r, c) = (row + dy, col + dx);
                if !target.put_pixel(r, c, glyph.color) {
                    return Err(GlyphError::OutOfBounds { row: r, col: c });
                }
            }
        }
        Ok(())
    }
}

fn scaled_extent(natural: u32, scale: f64) -> u32 {
    (natural as f64 * scale).round().max(1.0) as u32
}

/// One 8x8 glyph plus its ink bounding box. Bit `x` of row `y` is the pixel
/// at column `x`, least significant bit leftmost.
#[derive(Debug, Clone, Copy)]
struct Bitmap {
    rows: [u8; 8],
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl Bitmap {
    fn lookup(ch: char) -> Option<Self> {
        BASIC_FONTS
            .get(ch)
            .or_else(|| LATIN_FONTS.get(ch))
            .and_then(Self::from_rows)
    }

    fn from_rows(rows: [u8; 8]) -> Option<Self> {
        let columns = rows.iter().fold(0u8, |acc, r| acc | r);
        if columns == 0 {
            return None;
        }
        let top = rows.iter().position(|&r| r != 0)? as u32;
        let bottom = rows.iter().rposition(|&r| r != 0)? as u32;
        let left = columns.trailing_zeros();
        let right = 7 - columns.leading_zeros();

        Some(Self {
            rows,
            left,
            top,
            width: right - left + 1,
            height: bottom - top + 1,
        })
    }

    #[inline]
    fn is_set(&self, x: u32, y: u32) -> bool {
        (self.rows[y as usize] >> x) & 1 == 1
    }
}

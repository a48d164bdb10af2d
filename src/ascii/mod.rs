//! Glyph-mosaic renderer.
//!
//! Converts a color image into a mosaic of colored characters:
//!
//! 1. **Luminance** - one brightness value per pixel ([`LuminanceProvider`])
//! 2. **Aggregation** - mean color and luminance per square block
//! 3. **Glyph mapping** - mean luminance to one character
//! 4. **Scaling and drawing** - the character is scaled to fill its block and
//!    painted in the block's mean color ([`GlyphRenderer`])
//!
//! Strips of blocks are painted in parallel by [`Converter`].

mod block;
mod converter;
mod error;
mod font;
mod grayscale;
mod mapping;
mod scale;
mod strip;

pub use block::{aggregate, Block, BlockStats};
pub use converter::{
    convert, ConversionSummary, ConvertOptions, Converter, DEFAULT_BLOCK_SIZE, DEFAULT_GRAIN,
};
pub use error::{ConvertError, GlyphError};
pub use font::{BitmapFont, Glyph, GlyphRenderer, DEFAULT_FALLBACK};
pub use grayscale::{to_grayscale, Bt601, LuminanceProvider};
pub use mapping::{glyph_for_luminance, GLYPH_BASE, GLYPH_SPAN};
pub use scale::{compute_scale, GlyphSize};
pub use strip::paint_strip;

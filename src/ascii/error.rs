//! Error types for glyph rendering and conversion.

/// Failures reported by a [`GlyphRenderer`](super::GlyphRenderer).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GlyphError {
    #[error("no glyph available for character {0:?}")]
    Unsupported(char),

    #[error("invalid glyph scale {0}")]
    InvalidScale(f64),

    #[error("glyph pixel ({row}, {col}) falls outside the target strip")]
    OutOfBounds { row: u32, col: u32 },
}

/// Errors that abort a conversion. No partial canvas is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error(
        "luminance image is {luminance_cols}x{luminance_rows} but color image is {color_cols}x{color_rows}"
    )]
    InputDimensionMismatch {
        color_rows: u32,
        color_cols: u32,
        luminance_rows: u32,
        luminance_cols: u32,
    },

    #[error("failed to draw glyph {ch:?} at block ({row}, {col}): {source}")]
    GlyphRendering {
        ch: char,
        row: u32,
        col: u32,
        #[source]
        source: GlyphError,
    },

    #[error("block size must be at least 1 pixel, got {0}")]
    DegenerateBlock(u32),

    #[error("strip grain must be at least 1 row, got {0}")]
    DegenerateGrain(u32),
}

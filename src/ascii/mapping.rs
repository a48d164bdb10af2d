//! Brightness to character mapping.

/// First character code produced by the mapping (`'!'`).
pub const GLYPH_BASE: u32 = 33;

/// Modulus applied to the mean luminance before offsetting.
pub const GLYPH_SPAN: u32 = 127;

/// Map a mean luminance value to the character drawn for its block.
///
/// The mapping is `char(33 + (v mod 127))`. It wraps instead of ramping, so
/// it does not track brightness monotonically, and values 94..=126 land on
/// codes 127..=159 (DEL and the C1 control range). Those characters have no
/// printable form; the glyph renderer decides how to draw them.
///
/// # Example
/// ```
/// use ascii_mosaic::ascii::glyph_for_luminance;
///
/// assert_eq!(glyph_for_luminance(0), '!');
/// assert_eq!(glyph_for_luminance(127), '!');
/// assert_eq!(glyph_for_luminance(65), 'b');
/// ```
#[inline]
pub fn glyph_for_luminance(luminance: u8) -> char {
    // at most 33 + 126 = 159, which fits in a byte
    let code = GLYPH_BASE + luminance as u32 % GLYPH_SPAN;
    char::from(code as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(glyph_for_luminance(255), '"');
        assert_eq!(glyph_for_luminance(0) as u32, 33);
        assert_eq!(glyph_for_luminance(93) as u32, 126);
        assert_eq!(glyph_for_luminance(94) as u32, 127);
        assert_eq!(glyph_for_luminance(126) as u32, 159);
        assert_eq!(glyph_for_luminance(127) as u32, 33);
        assert_eq!(glyph_for_luminance(255) as u32, 33 + 1);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for v in 0..=255u8 {
            assert_eq!(glyph_for_luminance(v), glyph_for_luminance(v));
        }
    }

    #[test]
    fn test_range() {
        for v in 0..=255u8 {
            let code = glyph_for_luminance(v) as u32;
            assert!((33..=159).contains(&code), "v={} produced {}", v, code);
        }
    }
}

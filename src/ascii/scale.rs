//! Glyph scale computation.

/// Natural rendered size of a glyph at unit scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSize {
    pub width: u32,
    pub height: u32,
}

/// Uniform scale that makes the glyph's dominant dimension fill the block.
///
/// If the glyph is wider than tall the width is matched to `block_width`,
/// otherwise the height is matched to `block_height`. Aspect ratio is kept.
/// Natural dimensions are positive for any drawable glyph.
pub fn compute_scale(natural: GlyphSize, block_width: u32, block_height: u32) -> f64 {
    if natural.width > natural.height {
        block_width as f64 / natural.width as f64
    } else {
        block_height as f64 / natural.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_dominant_dimension_fills_block() {
        for (w, h) in [(5u32, 7u32), (7, 5), (6, 6), (1, 8), (8, 1)] {
            for s in [4u32, 9, 16] {
                let scale = compute_scale(GlyphSize { width: w, height: h }, s, s);
                let dominant = w.max(h) as f64;
                assert!((scale * dominant - s as f64).abs() < EPS);
                assert!(scale * w.min(h) as f64 <= s as f64 + EPS);
            }
        }
    }

    #[test]
    fn test_tie_uses_height() {
        let scale = compute_scale(GlyphSize { width: 4, height: 4 }, 8, 12);
        assert!((scale - 3.0).abs() < EPS);
    }

    #[test]
    fn test_wide_glyph_uses_width() {
        let scale = compute_scale(GlyphSize { width: 8, height: 2 }, 4, 100);
        assert!((scale - 0.5).abs() < EPS);
    }
}

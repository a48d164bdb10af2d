//! End-to-end tests for image to glyph-mosaic conversion.
//!
//! These tests verify the conversion contract:
//! - Output canvas has the input's dimensions
//! - Whole blocks are overpainted, trailing remainders keep source pixels
//! - Results are identical across runs and strip partitionings
//! - Failures abort the whole conversion

use ascii_mosaic::ascii::{
    convert, Bt601, BitmapFont, ConvertError, ConvertOptions, Converter, Glyph, GlyphError,
    GlyphRenderer, GlyphSize,
};
use ascii_mosaic::cli::{run_convert, ConvertArgs};
use ascii_mosaic::config::Config;
use ascii_mosaic::raster::{ColorImage, LuminanceImage, StripMut};
use image::{Luma, Rgb};
use std::sync::Mutex;

/// Helper to create a test image with the specified pattern.
fn make_test_image(pattern: &str, width: u32, height: u32) -> ColorImage {
    match pattern {
        "solid" => ColorImage::from_pixel(width, height, Rgb([10, 20, 200])),
        "gradient_h" => ColorImage::from_fn(width, height, |x, _| {
            let v = ((x as f32 / width.max(1) as f32) * 255.0) as u8;
            Rgb([v, v, v])
        }),
        "noise" => ColorImage::from_fn(width, height, |x, y| {
            // cheap deterministic hash, no RNG needed
            let h = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
            Rgb([(h >> 3) as u8, (h >> 11) as u8, (h >> 19) as u8])
        }),
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn flat_luminance(value: u8) -> impl Fn(&ColorImage) -> LuminanceImage {
    move |img: &ColorImage| LuminanceImage::from_pixel(img.width(), img.height(), Luma([value]))
}

/// Renderer that records draw calls and forwards them to the bitmap font.
struct Recording {
    inner: BitmapFont,
    calls: Mutex<Vec<(u32, u32, Glyph)>>,
}

impl Recording {
    fn new() -> Self {
        Self {
            inner: BitmapFont::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl GlyphRenderer for Recording {
    fn measure(&self, ch: char) -> Result<GlyphSize, GlyphError> {
        self.inner.measure(ch)
    }

    fn draw(
        &self,
        target: &mut StripMut<'_>,
        glyph: &Glyph,
        row: u32,
        col: u32,
    ) -> Result<(), GlyphError> {
        self.calls.lock().unwrap().push((row, col, *glyph));
        self.inner.draw(target, glyph, row, col)
    }
}

/// Renderer whose draw primitive always fails.
struct Broken;

impl GlyphRenderer for Broken {
    fn measure(&self, _ch: char) -> Result<GlyphSize, GlyphError> {
        Ok(GlyphSize { width: 5, height: 7 })
    }

    fn draw(
        &self,
        _target: &mut StripMut<'_>,
        glyph: &Glyph,
        _row: u32,
        _col: u32,
    ) -> Result<(), GlyphError> {
        Err(GlyphError::Unsupported(glyph.ch))
    }
}

// ==================== Single Block Scenario ====================

#[test]
fn test_single_block_solid_image() {
    let image = make_test_image("solid", 4, 4);
    let renderer = Recording::new();
    let converter = Converter::with_collaborators(
        ConvertOptions::new(4, 500).unwrap(),
        flat_luminance(100),
        &renderer,
    );

    let (canvas, summary) = converter.convert_with_summary(&image).unwrap();

    assert_eq!(summary.glyphs, 1);
    assert_eq!(summary.strips, 1);

    let calls = renderer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (row, col, glyph) = calls[0];
    assert_eq!((row, col), (0, 0));
    assert_eq!(glyph.ch as u32, 133);
    assert_eq!(glyph.color, Rgb([10, 20, 200]));

    // Background is the source image and the glyph is drawn in the same
    // color, so every pixel ends up as the block color.
    assert_eq!(canvas.dimensions(), (4, 4));
    assert!(canvas.pixels().all(|p| *p == Rgb([10, 20, 200])));
}

#[test]
fn test_glyph_is_painted_over_source() {
    // Dark source, and a renderer painting in a fixed bright color: some
    // pixels must change, and only inside the single block.
    struct Bright(BitmapFont);
    impl GlyphRenderer for Bright {
        fn measure(&self, ch: char) -> Result<GlyphSize, GlyphError> {
            self.0.measure(ch)
        }
        fn draw(
            &self,
            target: &mut StripMut<'_>,
            glyph: &Glyph,
            row: u32,
            col: u32,
        ) -> Result<(), GlyphError> {
            let bright = Glyph {
                color: Rgb([255, 255, 255]),
                ..*glyph
            };
            self.0.draw(target, &bright, row, col)
        }
    }

    let image = ColorImage::new(10, 10);
    let converter = Converter::with_collaborators(
        ConvertOptions::new(8, 500).unwrap(),
        Bt601,
        Bright(BitmapFont::new()),
    );

    let canvas = converter.convert(&image).unwrap();

    let painted: Vec<(u32, u32)> = canvas
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == Rgb([255, 255, 255]))
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!painted.is_empty());
    assert!(painted.iter().all(|&(x, y)| x < 8 && y < 8));
}

// ==================== Geometry Tests ====================

#[test]
fn test_output_dimensions_match_input() {
    for (w, h) in [(1, 1), (3, 17), (64, 48), (33, 100), (250, 7)] {
        let image = make_test_image("noise", w, h);
        let canvas = Converter::new(ConvertOptions::new(8, 16).unwrap())
            .convert(&image)
            .unwrap();
        assert_eq!(canvas.dimensions(), (w, h));
    }
}

#[test]
fn test_trailing_remainder_is_untouched() {
    let image = make_test_image("noise", 30, 27);
    let canvas = Converter::new(ConvertOptions::new(8, 8).unwrap())
        .convert(&image)
        .unwrap();

    // Whole blocks cover columns 0..24 and rows 0..24.
    for (x, y, p) in canvas.enumerate_pixels() {
        if x >= 24 || y >= 24 {
            assert_eq!(p, image.get_pixel(x, y), "remainder pixel ({}, {}) changed", x, y);
        }
    }
}

#[test]
fn test_image_smaller_than_block_is_copied() {
    let image = make_test_image("gradient_h", 5, 5);
    let canvas = Converter::new(ConvertOptions::new(8, 500).unwrap())
        .convert(&image)
        .unwrap();
    assert_eq!(canvas, image);
}

#[test]
fn test_no_gaps_between_strips() {
    // grain 10 with block 4 is aligned down to 8, so every block row is drawn
    let image = make_test_image("solid", 8, 40);
    let renderer = Recording::new();
    let converter = Converter::with_collaborators(
        ConvertOptions::new(4, 10).unwrap(),
        Bt601,
        &renderer,
    );

    let (_, summary) = converter.convert_with_summary(&image).unwrap();

    assert_eq!(summary.strips, 5);
    assert_eq!(summary.glyphs, 2 * 10);
    let mut rows: Vec<u32> = renderer.calls.lock().unwrap().iter().map(|c| c.0).collect();
    rows.sort_unstable();
    rows.dedup();
    assert_eq!(rows, (0..40).step_by(4).collect::<Vec<u32>>());
}

// ==================== Determinism Tests ====================

#[test]
fn test_repeated_conversion_is_identical() {
    let image = make_test_image("noise", 160, 120);
    let converter = Converter::new(ConvertOptions::new(6, 12).unwrap());

    let first = converter.convert(&image).unwrap();
    for _ in 0..5 {
        assert_eq!(converter.convert(&image).unwrap().as_raw(), first.as_raw());
    }
}

#[test]
fn test_result_independent_of_grain() {
    let image = make_test_image("noise", 97, 203);
    let coarse = Converter::new(ConvertOptions::new(5, 1000).unwrap())
        .convert(&image)
        .unwrap();
    let fine = Converter::new(ConvertOptions::new(5, 5).unwrap())
        .convert(&image)
        .unwrap();
    assert_eq!(coarse, fine);
}

#[test]
fn test_default_convert() {
    let image = make_test_image("gradient_h", 64, 64);
    let canvas = convert(&image).unwrap();
    assert_eq!(canvas.dimensions(), (64, 64));
    assert_ne!(canvas, image);
}

// ==================== Error Tests ====================

#[test]
fn test_dimension_mismatch_is_reported() {
    let image = make_test_image("solid", 12, 9);
    let short = |img: &ColorImage| LuminanceImage::new(img.width() - 1, img.height());
    let converter =
        Converter::with_collaborators(ConvertOptions::default(), short, BitmapFont::new());

    let err = converter.convert(&image).unwrap_err();

    assert_eq!(
        err,
        ConvertError::InputDimensionMismatch {
            color_rows: 9,
            color_cols: 12,
            luminance_rows: 9,
            luminance_cols: 11,
        }
    );
}

#[test]
fn test_draw_failure_aborts_conversion() {
    let image = make_test_image("noise", 64, 64);
    let converter =
        Converter::with_collaborators(ConvertOptions::new(8, 16).unwrap(), Bt601, Broken);

    let err = converter.convert(&image).unwrap_err();

    assert!(matches!(err, ConvertError::GlyphRendering { .. }));
}

#[test]
fn test_unsupported_glyph_without_fallback() {
    let image = make_test_image("solid", 4, 4);
    let converter = Converter::with_collaborators(
        ConvertOptions::new(4, 4).unwrap(),
        flat_luminance(100),
        BitmapFont::without_fallback(),
    );

    match converter.convert(&image) {
        Err(ConvertError::GlyphRendering { ch, source, .. }) => {
            assert_eq!(ch, '\u{85}');
            assert_eq!(source, GlyphError::Unsupported('\u{85}'));
        }
        other => panic!("expected glyph failure, got {:?}", other.map(|c| c.dimensions())),
    }
}

// ==================== File Round Trip ====================

#[test]
fn test_cli_convert_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    make_test_image("noise", 40, 30).save(&input).unwrap();

    let args = ConvertArgs {
        input,
        output: output.clone(),
        block_size: Some(8),
        grain: Some(16),
        threads: Some(2),
    };
    let summary = run_convert(&args, &Config::default()).unwrap();

    assert_eq!(summary.glyphs, 5 * 3);
    let written = image::open(&output).unwrap().into_rgb8();
    assert_eq!(written.dimensions(), (40, 30));
}

#[test]
fn test_cli_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = ConvertArgs {
        input: dir.path().join("missing.png"),
        output: dir.path().join("out.png"),
        ..Default::default()
    };
    let err = run_convert(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read image"));
}

//! RGB to luminance conversion using the ITU-R BT.601 formula.

use image::Luma;

use crate::raster::{ColorImage, LuminanceImage};

/// Produces a luminance raster congruent with a color raster.
///
/// The converter calls this exactly once per conversion.
pub trait LuminanceProvider {
    fn luminance(&self, image: &ColorImage) -> LuminanceImage;
}

/// Default provider: integer BT.601 luma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bt601;

impl LuminanceProvider for Bt601 {
    fn luminance(&self, image: &ColorImage) -> LuminanceImage {
        to_grayscale(image)
    }
}

impl<F> LuminanceProvider for F
where
    F: Fn(&ColorImage) -> LuminanceImage,
{
    fn luminance(&self, image: &ColorImage) -> LuminanceImage {
        self(image)
    }
}

/// Convert an RGB image to grayscale using ITU-R BT.601 luminance formula.
///
/// The luminance formula is: Y = 0.299*R + 0.587*G + 0.114*B
///
/// Coefficients are scaled by 1000 so the hot loop stays in integer math.
pub fn to_grayscale(image: &ColorImage) -> LuminanceImage {
    let mut gray = LuminanceImage::new(image.width(), image.height());
    for (dst, src) in gray.pixels_mut().zip(image.pixels()) {
        *dst = Luma([luma(src.0)]);
    }
    gray
}

#[inline]
fn luma([r, g, b]: [u8; 3]) -> u8 {
    // 299 + 587 + 114 = 1000, so the result never exceeds 255
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

//! # Fixed-Threshold Binarization
//!
//! Converts composited RGB into one bit per pixel using Rec. 601 luma and a
//! single global cutoff:
//!
//! ```text
//! luminance = 0.299 R + 0.587 G + 0.114 B
//! black     = luminance < 128
//! ```
//!
//! There is no dithering or error diffusion. Photos come out posterized; that
//! is the expected output of this stage.
//!
//! ```
//! use cinta::render::threshold::{is_black, luminance};
//!
//! assert!(is_black(luminance(0, 0, 0)));
//! assert!(!is_black(luminance(255, 255, 255)));
//! ```

use super::pixels::{Pixel, PixelGrid};

/// Luminance cutoff. Values strictly below it print.
pub const THRESHOLD: f64 = 128.0;

/// Rec. 601 luma of an RGB triple, in the range 0.0..=255.0.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    r as f64 * 0.299 + g as f64 * 0.587 + b as f64 * 0.114
}

/// Whether a luminance value prints as a black dot.
#[inline]
pub fn is_black(luminance: f64) -> bool {
    luminance < THRESHOLD
}

/// Whether an (already opaque) pixel prints as a black dot.
///
/// Alpha is ignored; composite first.
#[inline]
pub fn pixel_is_black(pixel: Pixel) -> bool {
    is_black(luminance(pixel.r, pixel.g, pixel.b))
}

/// One bit per pixel, row-major. `true` = black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonochromeGrid {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl MonochromeGrid {
    /// Threshold every pixel of an opaque grid.
    pub fn from_pixels(grid: &PixelGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            bits: grid.pixels().iter().copied().map(pixel_is_black).collect(),
        }
    }

    /// Build directly from bits, e.g. for tests or synthetic patterns.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` when the dot at column `x`, row `y` is black.
    #[inline]
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// Dot at `(row, column)` as a bit value, 1 = black.
    #[inline]
    pub(crate) fn bit_at(&self, row: usize, column: usize) -> u8 {
        self.is_black(column, row) as u8
    }

    /// Number of black dots, handy for sanity checks.
    pub fn black_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert!(is_black(127.999));
        assert!(!is_black(128.0));
        assert!(!is_black(128.001));
    }

    #[test]
    fn test_luminance_weights() {
        assert!((luminance(255, 0, 0) - 76.245).abs() < 1e-9);
        assert!((luminance(0, 255, 0) - 149.685).abs() < 1e-9);
        assert!((luminance(0, 0, 255) - 29.07).abs() < 1e-9);
        assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_primary_colors() {
        // Red and blue are dark enough to print, green is not
        assert!(pixel_is_black(Pixel::rgb(255, 0, 0)));
        assert!(!pixel_is_black(Pixel::rgb(0, 255, 0)));
        assert!(pixel_is_black(Pixel::rgb(0, 0, 255)));
    }

    #[test]
    fn test_mid_gray() {
        // The weights don't sum to exactly 1.0 in f64, so 128 gray lands at
        // 127.99999999999999 and still prints. 129 gray is about 129.0.
        assert!(pixel_is_black(Pixel::rgb(127, 127, 127)));
        assert!(luminance(128, 128, 128) < 128.0);
        assert!(pixel_is_black(Pixel::rgb(128, 128, 128)));
        assert!(!pixel_is_black(Pixel::rgb(129, 129, 129)));
    }

    #[test]
    fn test_from_pixels() {
        let grid = PixelGrid::from_fn(4, 2, |x, _| {
            if x % 2 == 0 {
                Pixel::BLACK
            } else {
                Pixel::WHITE
            }
        });
        let mono = MonochromeGrid::from_pixels(&grid);
        assert_eq!(mono.width(), 4);
        assert_eq!(mono.height(), 2);
        assert!(mono.is_black(0, 1));
        assert!(!mono.is_black(1, 1));
        assert_eq!(mono.black_count(), 4);
    }
}

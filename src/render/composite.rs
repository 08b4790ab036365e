//! # Alpha Compositing
//!
//! Thermal paper is white, so transparent regions of an image must end up
//! white before thresholding. Each pixel is composited over an opaque white
//! background:
//!
//! ```text
//! out = (alpha * channel + (255 - alpha) * 255) / 255
//! ```
//!
//! The division is integer division on `u32`, which keeps fully opaque pixels
//! bit-identical (`255 * c / 255 == c`) and turns fully transparent pixels into
//! pure white regardless of their color channels.

use super::pixels::{Pixel, PixelGrid};

/// Composite a single channel over white.
#[inline]
pub fn composite_channel(channel: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((a * channel as u32 + (255 - a) * 255) / 255) as u8
}

/// Composite one pixel over white. The result is always opaque.
#[inline]
pub fn composite_pixel(pixel: Pixel) -> Pixel {
    Pixel::rgba(
        composite_channel(pixel.r, pixel.a),
        composite_channel(pixel.g, pixel.a),
        composite_channel(pixel.b, pixel.a),
        255,
    )
}

/// Composite a whole grid over white.
pub fn over_white(grid: &PixelGrid) -> PixelGrid {
    grid.map(composite_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_becomes_white() {
        for &(r, g, b) in &[(0, 0, 0), (12, 200, 99), (255, 0, 255)] {
            assert_eq!(composite_pixel(Pixel::rgba(r, g, b, 0)), Pixel::WHITE);
        }
    }

    #[test]
    fn test_opaque_is_unchanged() {
        for c in 0..=255u8 {
            let p = Pixel::rgba(c, 255 - c, c / 2, 255);
            assert_eq!(composite_pixel(p), p);
        }
    }

    #[test]
    fn test_half_alpha_black() {
        // (128 * 0 + 127 * 255) / 255 = 127
        let p = composite_pixel(Pixel::rgba(0, 0, 0, 128));
        assert_eq!(p, Pixel::rgba(127, 127, 127, 255));
    }

    #[test]
    fn test_over_white_grid() {
        let grid = PixelGrid::filled(4, 2, Pixel::rgba(10, 10, 10, 0));
        let out = over_white(&grid);
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 2);
        assert!(out.rows().flatten().all(|&p| p == Pixel::WHITE));
    }
}

//! # ESC/POS Graphics Commands
//!
//! This module frames packed raster data (see [`render::pack`](crate::render::pack))
//! into printer commands.
//!
//! ## Graphics Modes Overview
//!
//! | Mode | Command | Layout | Best For |
//! |------|---------|--------|----------|
//! | Band | ESC W + ESC * 33 | 24-row column strips | Page mode placement |
//! | Raster | GS v 0 | Row-aligned | Whole images in standard mode |
//! | Graphics buffer | GS ( L | Row-aligned | Store once, print later |
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal)
//!   │
//!   │   ████████  ← one dot per bit
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```

use super::commands::{ESC, GS, split_lh};
use super::page::print_area_split;
use crate::render::pack::{BandRaster, SimpleRaster};

// ============================================================================
// BAND MODE GRAPHICS (ESC W + ESC *)
// ============================================================================

/// `ESC *` mode byte for 24-dot triple-density bit images.
pub const TRIPLE_DENSITY: u8 = 33;

/// Where raster bands go on the page.
///
/// `start_y` is the top of the first band. Every following band moves down
/// by `increment` dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandPlacement {
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
    pub increment: usize,
}

impl BandPlacement {
    /// Bands stacked flush from the top-left corner of a `width`-dot page,
    /// each one `band_height` dots below the last.
    pub fn stacked(width: usize, page_height: usize, band_height: usize) -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            end_x: width,
            end_y: page_height,
            increment: band_height,
        }
    }
}

/// # Select Bit-Image Mode (ESC * m nL nH d1...dk)
///
/// `nL + nH * 256` is the width in dots. In mode 33 each dot column carries
/// three bytes, so `k = width * 3`.
pub fn bit_image(mode: u8, width: usize, data: &[u8]) -> Vec<u8> {
    let [nl, nh] = split_lh(width);
    let mut cmd = Vec::with_capacity(5 + data.len());
    cmd.extend([ESC, b'*', mode, nl, nh]);
    cmd.extend_from_slice(data);
    cmd
}

/// Advance a split `[yL, yH]` position by `increment`.
///
/// The high byte grows by the *whole* pre-overflow sum (truncated to a byte),
/// not by a conventional carry of 1.
///
/// ```
/// use cinta::protocol::graphics::advance_y;
///
/// // 250 + 10 = 260: yH += 260 as u8 (4), yL = 4
/// assert_eq!(advance_y([250, 0], 10), [4, 4]);
/// assert_eq!(advance_y([0, 0], 24), [24, 0]);
/// ```
pub fn advance_y([yl, yh]: [u8; 2], increment: usize) -> [u8; 2] {
    let sum = yl as usize + increment;
    let yh = if sum > 255 {
        yh.wrapping_add(sum as u8)
    } else {
        yh
    };
    [sum as u8, yh]
}

/// # Positioned Raster Bands
///
/// For every 24-row band:
///
/// ```text
/// ESC W xL xH yL yH x2L x2H y2L y2H      print area for this band
/// ESC * 33 wL wH d1...d(w*3)             triple-density bit image
/// ```
///
/// then `y` advances by `placement.increment` using [`advance_y`].
///
/// ## Example
///
/// ```
/// use cinta::protocol::graphics::{raster_bands, BandPlacement};
/// use cinta::render::{pack::pack_bands, threshold::MonochromeGrid};
///
/// let raster = pack_bands(&MonochromeGrid::from_fn(8, 48, |_, _| true));
/// let cmd = raster_bands(&raster, &BandPlacement::stacked(8, 48, 24));
///
/// // Two bands, each 10 + 5 + 24 bytes
/// assert_eq!(cmd.len(), 2 * (10 + 5 + 8 * 3));
/// ```
pub fn raster_bands(raster: &BandRaster, placement: &BandPlacement) -> Vec<u8> {
    let x = split_lh(placement.start_x);
    let end_x = split_lh(placement.end_x);
    let end_y = split_lh(placement.end_y);
    let mut y = split_lh(placement.start_y);

    let per_band = 15 + raster.width * 3;
    let mut cmd = Vec::with_capacity(per_band * raster.bands.len());

    for band in &raster.bands {
        cmd.extend(print_area_split(x, y, end_x, end_y));
        cmd.extend(bit_image(TRIPLE_DENSITY, raster.width, &band.data));
        y = advance_y(y, placement.increment);
    }

    cmd
}

// ============================================================================
// RASTER MODE GRAPHICS (GS v 0)
// ============================================================================

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Field | Meaning |
/// |-------|---------|
/// | m | 0 = normal density |
/// | xL, xH | width in **bytes** |
/// | yL, yH | height in dots |
/// | d | `width_bytes * height` bytes, row-major, MSB = leftmost |
///
/// ```
/// use cinta::protocol::graphics::raster_image;
/// use cinta::render::{pack::pack_simple, threshold::MonochromeGrid};
///
/// let raster = pack_simple(&MonochromeGrid::from_fn(16, 8, |_, _| true));
/// let cmd = raster_image(&raster);
/// assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0, 2, 0, 8, 0]);
/// ```
pub fn raster_image(raster: &SimpleRaster) -> Vec<u8> {
    let [xl, xh] = raster.x;
    let [yl, yh] = raster.y;
    let mut cmd = Vec::with_capacity(8 + raster.block.data.len());
    cmd.extend([GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(&raster.block.data);
    cmd
}

// ============================================================================
// GRAPHICS BUFFER (GS ( L)
// ============================================================================

/// `GS ( L` frame: `pL pH` cover `m`, `fn` and `data`.
pub fn graphics_frame(m: u8, function: u8, data: &[u8]) -> Vec<u8> {
    let [pl, ph] = split_lh(data.len() + 2);
    let mut cmd = Vec::with_capacity(7 + data.len());
    cmd.extend([GS, b'(', b'L', pl, ph, m, function]);
    cmd.extend_from_slice(data);
    cmd
}

/// # Store Raster Graphics in the Print Buffer (GS ( L fn 112)
///
/// Payload: `a=48` (monochrome), `bx=1`, `by=1` (no scaling), `c=49`
/// (first color), `xL xH` width in dots, `yL yH` height in dots, then the
/// row-aligned raster data.
///
/// ```
/// use cinta::protocol::graphics::store_graphics;
///
/// let cmd = store_graphics(8, 1, &[0xFF]);
/// assert_eq!(cmd, vec![0x1D, 0x28, 0x4C, 11, 0, 48, 112, 48, 1, 1, 49, 8, 0, 1, 0, 0xFF]);
/// ```
pub fn store_graphics(width_dots: usize, height: usize, data: &[u8]) -> Vec<u8> {
    let [xl, xh] = split_lh(width_dots);
    let [yl, yh] = split_lh(height);
    let mut payload = Vec::with_capacity(8 + data.len());
    payload.extend([b'0', 1, 1, b'1', xl, xh, yl, yh]);
    payload.extend_from_slice(data);
    graphics_frame(b'0', b'p', &payload)
}

/// # Print Buffered Graphics (GS ( L fn 50)
pub fn print_graphics() -> Vec<u8> {
    graphics_frame(b'0', b'2', &[])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pack::{RasterBlock, pack_bands, pack_simple};
    use crate::render::threshold::MonochromeGrid;

    fn bands(width: usize, count: usize) -> BandRaster {
        BandRaster {
            width,
            height: count * 24,
            bands: (0..count)
                .map(|i| RasterBlock {
                    data: vec![i as u8; width * 3],
                    width,
                    height: 24,
                })
                .collect(),
        }
    }

    #[test]
    fn test_bit_image_header() {
        let cmd = bit_image(TRIPLE_DENSITY, 300, &[]);
        assert_eq!(cmd, vec![0x1B, 0x2A, 33, 0x2C, 0x01]);
    }

    #[test]
    fn test_advance_y_no_overflow() {
        assert_eq!(advance_y([0, 0], 24), [24, 0]);
        assert_eq!(advance_y([231, 2], 24), [255, 2]);
    }

    #[test]
    fn test_advance_y_overflow_adds_whole_sum() {
        // 250 + 10 = 260 -> yH += 4, yL = 4
        assert_eq!(advance_y([250, 0], 10), [4, 4]);
        assert_eq!(advance_y([250, 3], 10), [4, 7]);
        // 240 + 24 = 264 -> yH += 8, yL = 8
        assert_eq!(advance_y([240, 1], 24), [8, 9]);
    }

    #[test]
    fn test_advance_y_large_increment() {
        // 10 + 300 = 310 -> truncated to 54 for both bytes
        assert_eq!(advance_y([10, 0], 300), [54, 54]);
    }

    #[test]
    fn test_raster_bands_single() {
        let raster = bands(8, 1);
        let placement = BandPlacement {
            start_x: 16,
            start_y: 300,
            end_x: 512,
            end_y: 1000,
            increment: 24,
        };
        let cmd = raster_bands(&raster, &placement);

        assert_eq!(
            &cmd[..10],
            &[0x1B, 0x57, 16, 0, 0x2C, 0x01, 0x00, 0x02, 0xE8, 0x03]
        );
        assert_eq!(&cmd[10..15], &[0x1B, 0x2A, 33, 8, 0]);
        assert_eq!(&cmd[15..], &[0u8; 24][..]);
    }

    #[test]
    fn test_raster_bands_frame_matches_print_area() {
        let raster = bands(8, 1);
        let placement = BandPlacement::stacked(576, 2400, 24);
        let cmd = raster_bands(&raster, &placement);
        assert_eq!(cmd[..10].to_vec(), crate::protocol::page::print_area(0, 0, 576, 2400));
    }

    #[test]
    fn test_stacked_increment() {
        let raster = bands(8, 2);
        let cmd = raster_bands(&raster, &BandPlacement::stacked(8, 2400, 30));
        let stride = 15 + 8 * 3;
        assert_eq!([cmd[stride + 4], cmd[stride + 5]], [30, 0]);
    }

    #[test]
    fn test_raster_bands_y_sequence() {
        let raster = bands(8, 3);
        let placement = BandPlacement {
            start_x: 0,
            start_y: 250,
            end_x: 8,
            end_y: 0,
            increment: 10,
        };
        let cmd = raster_bands(&raster, &placement);
        let stride = 15 + 8 * 3;

        let ys: Vec<[u8; 2]> = (0..3).map(|i| [cmd[i * stride + 4], cmd[i * stride + 5]]).collect();
        assert_eq!(ys, vec![[250, 0], [4, 4], [14, 4]]);

        // Band payloads stay in order
        assert_eq!(cmd[stride + 15], 1);
        assert_eq!(cmd[2 * stride + 15], 2);
    }

    #[test]
    fn test_raster_bands_empty() {
        let raster = pack_bands(&MonochromeGrid::from_fn(8, 23, |_, _| true));
        assert!(raster_bands(&raster, &BandPlacement::stacked(8, 23, 24)).is_empty());
    }

    #[test]
    fn test_raster_image() {
        let raster = pack_simple(&MonochromeGrid::from_fn(8, 8, |_, _| true));
        let cmd = raster_image(&raster);
        assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0x00, 1, 0, 8, 0]);
        assert_eq!(&cmd[8..], &[0xFF; 8][..]);
    }

    #[test]
    fn test_graphics_frame_length_covers_m_fn_data() {
        let cmd = graphics_frame(b'0', b'p', &[1, 2, 3]);
        assert_eq!(cmd, vec![0x1D, 0x28, 0x4C, 5, 0, 48, 112, 1, 2, 3]);
    }

    #[test]
    fn test_store_graphics_large() {
        let data = vec![0xAA; 72 * 10];
        let cmd = store_graphics(576, 10, &data);
        // 2 (m, fn) + 8 (header) + 720 = 730 = 0x02DA
        assert_eq!(cmd[3], 0xDA);
        assert_eq!(cmd[4], 0x02);
        assert_eq!(cmd.len(), 5 + 730);
    }

    #[test]
    fn test_print_graphics() {
        assert_eq!(print_graphics(), vec![0x1D, 0x28, 0x4C, 2, 0, 48, 50]);
    }
}

//! # Bit Packing
//!
//! Turns a [`MonochromeGrid`] into the packed bytes the printer's bit-image
//! commands expect. Two layouts exist:
//!
//! | Layout | Unit | Byte covers | Used by |
//! |--------|------|-------------|---------|
//! | Simple | one row | 8 horizontal dots | `GS v 0`, `GS ( L` |
//! | Band | 24 rows | 8 vertical dots | `ESC *` mode 33 |
//!
//! ## Effective Dimensions
//!
//! Neither layout pads. Width is floored to a multiple of 8, and height to a
//! multiple of 8 (simple) or 24 (band). Dots past the effective edge are
//! dropped without an error:
//!
//! ```text
//! source 30 x 30
//!   simple -> 24 x 24   (6 columns, 6 rows dropped)
//!   band   -> 24 x 24   (one band)
//! source 20 x 50
//!   band   -> 16 x 48   (two bands)
//! ```
//!
//! ## Simple Layout
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! bit 7 (MSB) = leftmost dot
//! ```
//!
//! ## Band Layout
//!
//! Each column of a band becomes three bytes, top to bottom:
//!
//! ```text
//!            column j
//! row i*24+0  ┐
//!   ...       ├─ byte 0  (bit 7 = row i*24+0)
//! row i*24+7  ┘
//! row i*24+8  ┐
//!   ...       ├─ byte 1
//! row i*24+15 ┘
//! row i*24+16 ┐
//!   ...       ├─ byte 2
//! row i*24+23 ┘
//! ```
//!
//! Output order: band 0 columns left to right, then band 1, and so on.

use super::threshold::MonochromeGrid;
use crate::protocol::commands::split_lh;

/// Rows per triple-density band.
pub const BAND_ROWS: usize = 24;

/// Bytes emitted per column of a band.
pub const BAND_BYTES_PER_COLUMN: usize = BAND_ROWS / 8;

/// The region of a grid that actually gets packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveDims {
    /// Width in dots, a multiple of 8
    pub width: usize,
    /// Height in dots, a multiple of 8 (simple) or 24 (band)
    pub height: usize,
}

impl EffectiveDims {
    /// Effective size for the row-aligned simple layout.
    pub fn simple(width: usize, height: usize) -> Self {
        Self {
            width: width / 8 * 8,
            height: height / 8 * 8,
        }
    }

    /// Effective size for the 24-row band layout.
    pub fn band(width: usize, height: usize) -> Self {
        Self {
            width: width / 8 * 8,
            height: height / BAND_ROWS * BAND_ROWS,
        }
    }

    /// Packed bytes per row in the simple layout.
    #[inline]
    pub fn width_bytes(&self) -> usize {
        self.width / 8
    }

    /// Number of whole 24-row bands.
    #[inline]
    pub fn bands(&self) -> usize {
        self.height / BAND_ROWS
    }
}

/// Packed bytes plus the dot dimensions they encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBlock {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RasterBlock {
    /// `ceil(width / 8)`
    #[inline]
    pub fn width_bytes(&self) -> usize {
        self.width.div_ceil(8)
    }
}

/// Simple-layout output, with header fields pre-split into low/high bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRaster {
    pub block: RasterBlock,
    /// Byte width as `[width_bytes % 256, width_bytes / 256]`
    pub x: [u8; 2],
    /// Dot height as `[height % 256, height / 256]`
    pub y: [u8; 2],
}

/// Band-layout output: one block per 24-row band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandRaster {
    /// Effective width in dots (= columns per band)
    pub width: usize,
    /// Effective height in dots (= bands * 24)
    pub height: usize,
    pub bands: Vec<RasterBlock>,
}

impl BandRaster {
    /// All bands concatenated in emission order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bands
            .iter()
            .flat_map(|band| band.data.iter().copied())
            .collect()
    }
}

/// Pack a run of up to 8 bits MSB first.
#[inline]
fn pack_byte(bits: impl Iterator<Item = u8>) -> u8 {
    bits.take(8)
        .enumerate()
        .fold(0u8, |acc, (i, bit)| acc | (bit << (7 - i)))
}

/// Pack a grid in the row-aligned simple layout.
///
/// ## Example
///
/// ```
/// use cinta::render::pack::pack_simple;
/// use cinta::render::threshold::MonochromeGrid;
///
/// let grid = MonochromeGrid::from_fn(8, 8, |_, _| true);
/// let raster = pack_simple(&grid);
/// assert_eq!(raster.block.data, vec![0xFF; 8]);
/// assert_eq!(raster.x, [1, 0]);
/// assert_eq!(raster.y, [8, 0]);
/// ```
pub fn pack_simple(grid: &MonochromeGrid) -> SimpleRaster {
    let dims = EffectiveDims::simple(grid.width(), grid.height());
    let width_bytes = dims.width_bytes();
    let mut data = Vec::with_capacity(width_bytes * dims.height);

    for y in 0..dims.height {
        for col in 0..width_bytes {
            let x0 = col * 8;
            data.push(pack_byte((x0..x0 + 8).map(|x| grid.bit_at(y, x))));
        }
    }

    SimpleRaster {
        block: RasterBlock {
            data,
            width: dims.width,
            height: dims.height,
        },
        x: split_lh(width_bytes),
        y: split_lh(dims.height),
    }
}

/// Pack one 24-row band starting at `top`.
fn pack_band(grid: &MonochromeGrid, top: usize, width: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * BAND_BYTES_PER_COLUMN);
    for column in 0..width {
        for strip in 0..BAND_BYTES_PER_COLUMN {
            let r0 = top + strip * 8;
            data.push(pack_byte((r0..r0 + 8).map(|row| grid.bit_at(row, column))));
        }
    }
    data
}

/// Pack a grid in the triple-density band layout.
///
/// ## Example
///
/// ```
/// use cinta::render::pack::pack_bands;
/// use cinta::render::threshold::MonochromeGrid;
///
/// // 30 rows: the last 6 are dropped
/// let grid = MonochromeGrid::from_fn(8, 30, |_, _| true);
/// let raster = pack_bands(&grid);
/// assert_eq!(raster.height, 24);
/// assert_eq!(raster.bands.len(), 1);
/// assert_eq!(raster.bands[0].data.len(), 8 * 3);
/// ```
pub fn pack_bands(grid: &MonochromeGrid) -> BandRaster {
    let dims = EffectiveDims::band(grid.width(), grid.height());

    let bands = (0..dims.bands())
        .map(|i| RasterBlock {
            data: pack_band(grid, i * BAND_ROWS, dims.width),
            width: dims.width,
            height: BAND_ROWS,
        })
        .collect();

    BandRaster {
        width: dims.width,
        height: dims.height,
        bands,
    }
}

// ============================================================================
// TESTS
// ============================================================================

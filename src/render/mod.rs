//! # Rendering Module
//!
//! This module turns a decoded bitmap into packed printer raster data.
//!
//! ## Pipeline
//!
//! ```text
//! PixelSource ─► PixelGrid ─► over_white ─► MonochromeGrid ─► pack_simple / pack_bands
//!                (snapshot)   (alpha)       (threshold)       (bit packing)
//! ```
//!
//! ## Modules
//!
//! - [`pixels`]: Pixel sources and the immutable pixel grid
//! - [`composite`]: Alpha compositing over white paper
//! - [`threshold`]: Fixed-cutoff luminance binarization
//! - [`pack`]: Simple and triple-density band bit packing
//!
//! ## Usage Example
//!
//! ```
//! use cinta::render;
//! use image::{Rgba, RgbaImage};
//!
//! // 16x24 black image with a transparent left half
//! let img = RgbaImage::from_fn(16, 24, |x, _| {
//!     if x < 8 { Rgba([0, 0, 0, 0]) } else { Rgba([0, 0, 0, 255]) }
//! });
//!
//! let simple = render::rasterize_simple(&img);
//! assert_eq!(&simple.block.data[0..2], &[0x00, 0xFF]);
//!
//! let bands = render::rasterize_bands(&img);
//! assert_eq!(bands.bands.len(), 1);
//! ```

pub mod composite;
pub mod pack;
pub mod pixels;
pub mod threshold;

use pack::{BandRaster, SimpleRaster};
use pixels::{PixelGrid, PixelSource};
use threshold::MonochromeGrid;

/// Composite and threshold a pixel source into a monochrome grid.
pub fn monochrome<S: PixelSource + ?Sized>(source: &S) -> MonochromeGrid {
    let grid = PixelGrid::from_source(source);
    let opaque = composite::over_white(&grid);
    MonochromeGrid::from_pixels(&opaque)
}

/// Full pipeline into the row-aligned simple layout.
pub fn rasterize_simple<S: PixelSource + ?Sized>(source: &S) -> SimpleRaster {
    pack::pack_simple(&monochrome(source))
}

/// Full pipeline into the triple-density band layout.
pub fn rasterize_bands<S: PixelSource + ?Sized>(source: &S) -> BandRaster {
    pack::pack_bands(&monochrome(source))
}

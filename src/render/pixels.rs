//! # Pixel Sources
//!
//! The raster pipeline starts from an already-decoded bitmap. Anything that can
//! report its dimensions and hand out 8-bit RGBA pixels implements
//! [`PixelSource`]; the pipeline snapshots it once into an immutable
//! [`PixelGrid`] and never reads the source again.
//!
//! ```
//! use cinta::render::pixels::{Pixel, PixelGrid};
//!
//! let grid = PixelGrid::filled(16, 8, Pixel::rgba(0, 0, 0, 255));
//! assert_eq!(grid.width(), 16);
//! assert_eq!(grid.height(), 8);
//! ```

use image::{DynamicImage, GenericImageView, RgbaImage};

/// One pixel with four independent 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const WHITE: Pixel = Pixel::rgba(255, 255, 255, 255);
    pub const BLACK: Pixel = Pixel::rgba(0, 0, 0, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

/// A decoded image the raster pipeline can read from.
///
/// Coordinates are `(x, y)` with `x < width` and `y < height`; the pipeline
/// never asks for anything outside that range.
pub trait PixelSource {
    /// `(width, height)` in pixels
    fn dimensions(&self) -> (usize, usize);

    /// Pixel at column `x`, row `y`
    fn pixel(&self, x: usize, y: usize) -> Pixel;
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn pixel(&self, x: usize, y: usize) -> Pixel {
        let [r, g, b, a] = self.get_pixel(x as u32, y as u32).0;
        Pixel::rgba(r, g, b, a)
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    // 16-bit and float images are narrowed to 8 bits per channel by `image`.
    fn pixel(&self, x: usize, y: usize) -> Pixel {
        let [r, g, b, a] = self.get_pixel(x as u32, y as u32).0;
        Pixel::rgba(r, g, b, a)
    }
}

/// Immutable row-major grid of pixels.
///
/// Dimensions are fixed at construction. Every pipeline stage derives a new
/// grid from the previous one instead of editing in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Snapshot a pixel source into a grid.
    pub fn from_source<S: PixelSource + ?Sized>(source: &S) -> Self {
        let (width, height) = source.dimensions();
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(source.pixel(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a grid from rows of pixels.
    ///
    /// Returns `None` when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: rows.into_iter().flatten().collect(),
        })
    }

    /// A grid where every pixel has the same value.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every position.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
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

    /// Pixel at column `x`, row `y`.
    ///
    /// Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.width + x]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks() rejects a zero size, and a zero-width grid has no pixels anyway
        self.pixels.chunks(self.width.max(1))
    }

    /// Map every pixel into a new grid of the same dimensions.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Pixel) -> Pixel,
    {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }

    pub(crate) fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl PixelSource for PixelGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.get(x, y)
    }
}

//! # Page Mode Commands
//!
//! Page mode composes a print area with absolute positioning before printing.
//! Unlike standard mode where each line prints immediately, page mode
//! accumulates content and prints when explicitly commanded.
//!
//! ## Workflow
//!
//! 1. Enter page mode ([`page_mode`])
//! 2. Define the print area ([`print_area`])
//! 3. Optionally set the direction ([`print_direction`])
//! 4. Position and add content (text, barcodes, raster bands)
//! 5. Print the buffer ([`print_page_buffer`]) and return to [`standard_mode`]
//!
//! The raster band frame in [`graphics`](super::graphics) reuses
//! [`print_area_split`] to place each 24-row band.

use super::commands::{ESC, FF, GS, split_lh};

/// Select page mode (ESC L).
pub fn page_mode() -> Vec<u8> {
    vec![ESC, b'L']
}

/// Select standard mode (ESC S).
pub fn standard_mode() -> Vec<u8> {
    vec![ESC, b'S']
}

/// # Set Print Area in Page Mode (ESC W)
///
/// **Command:** ESC W xL xH yL yH dxL dxH dyL dyH
///
/// All four values are split into little-endian byte pairs.
///
/// ```
/// use cinta::protocol::page::print_area;
///
/// assert_eq!(
///     print_area(0, 300, 512, 24),
///     vec![0x1B, 0x57, 0, 0, 0x2C, 0x01, 0x00, 0x02, 24, 0]
/// );
/// ```
pub fn print_area(x: usize, y: usize, end_x: usize, end_y: usize) -> Vec<u8> {
    print_area_split(split_lh(x), split_lh(y), split_lh(end_x), split_lh(end_y))
}

/// [`print_area`] from values already split into `[low, high]` pairs.
///
/// The band frame tracks `y` as a byte pair between bands, so it calls this
/// directly.
pub fn print_area_split(
    [xl, xh]: [u8; 2],
    [yl, yh]: [u8; 2],
    [x2l, x2h]: [u8; 2],
    [y2l, y2h]: [u8; 2],
) -> Vec<u8> {
    vec![ESC, b'W', xl, xh, yl, yh, x2l, x2h, y2l, y2h]
}

/// Print direction and starting corner in page mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PrintDirection {
    LeftToRight = 0,
    BottomToTop = 1,
    RightToLeft = 2,
    TopToBottom = 3,
}

/// # Select Print Direction in Page Mode (GS T n)
///
/// Accepts `0..=3` and their ASCII forms `'0'..='3'` (48..=51). Anything else
/// falls back to `0` (left to right).
pub fn print_direction(direction: u8) -> Vec<u8> {
    let n = match direction {
        0..=3 | 48..=51 => direction,
        _ => 0,
    };
    vec![GS, b'T', n]
}

/// Typed convenience wrapper for [`print_direction`].
#[inline]
pub fn set_direction(direction: PrintDirection) -> Vec<u8> {
    print_direction(direction as u8)
}

/// Print the page buffer (ESC FF).
pub fn print_page_buffer() -> Vec<u8> {
    vec![ESC, FF]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert_eq!(page_mode(), vec![0x1B, 0x4C]);
        assert_eq!(standard_mode(), vec![0x1B, 0x53]);
        assert_eq!(print_page_buffer(), vec![0x1B, 0x0C]);
    }

    #[test]
    fn test_print_area() {
        assert_eq!(
            print_area(10, 20, 576, 1000),
            vec![
                0x1B, 0x57,
                10, 0,       // x
                20, 0,       // y
                0x40, 0x02,  // 576
                0xE8, 0x03,  // 1000
            ]
        );
    }

    #[test]
    fn test_print_area_split_matches() {
        assert_eq!(
            print_area_split([0, 0], [250, 0], [8, 0], [0xE8, 0x03]),
            print_area(0, 250, 8, 1000)
        );
        assert_eq!(
            print_area_split([0, 0], [4, 4], [8, 0], [0, 0]),
            vec![0x1B, 0x57, 0, 0, 4, 4, 8, 0, 0, 0]
        );
    }

    #[test]
    fn test_print_direction_valid() {
        for n in [0u8, 1, 2, 3, 48, 49, 50, 51] {
            assert_eq!(print_direction(n), vec![0x1D, 0x54, n]);
        }
    }

    #[test]
    fn test_print_direction_falls_back() {
        assert_eq!(print_direction(4), vec![0x1D, 0x54, 0]);
        assert_eq!(print_direction(200), vec![0x1D, 0x54, 0]);
    }

    #[test]
    fn test_set_direction() {
        assert_eq!(
            set_direction(PrintDirection::TopToBottom),
            vec![0x1D, 0x54, 3]
        );
    }
}

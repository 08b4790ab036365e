//! # ESC/POS Protocol Commands
//!
//! This module implements the fixed, parameter-light commands of the ESC/POS
//! protocol used by most thermal receipt printers (Epson TM series and the many
//! printers that clone its command set).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V A n`, `ESC $ nL nH`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding, low byte first:
//! - value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! Positions arriving as plain integers are split with [`split_lh`]
//! (`value % 256`, `value / 256`), matching how the printer reassembles them
//! (`nL + nH * 256`).

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for cutting, barcodes, 2D symbols and raster graphics.
pub const GS: u8 = 0x1D;

/// DLE (Data Link Escape) - Real-time command prefix
pub const DLE: u8 = 0x10;

/// EOT (End Of Transmission) - Second byte of the real-time status request
pub const EOT: u8 = 0x04;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Prints the page buffer in page mode
pub const FF: u8 = 0x0C;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets every mode to its power-on default.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use cinta::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// End-of-job marker (0xFA).
///
/// Not an ESC/POS command; some spooling firmwares use it to close a job.
/// Printers that don't know it ignore it.
#[inline]
pub fn end() -> Vec<u8> {
    vec![0xFA]
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Feed and Full Cut (GS V A 0)
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V A NUL  |
/// | Hex     | 1D 56 41 00 |
///
/// Function B (`A` = 65) feeds the paper to the cutting position plus `n`
/// dots before cutting; `n = 0` cuts right after the last printed line.
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', b'A', 0]
}

/// # Partial Cut (GS V 1)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 1   |
/// | Hex     | 1D 56 01 |
///
/// Leaves one point uncut so the receipt hangs from the roll.
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, 0x56, 1]
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// # Open Cash Drawer (ESC p 0 10 255)
///
/// Pulses drawer pin 2 with a 20 ms on time and a 510 ms off time.
#[inline]
pub fn cash_drawer() -> Vec<u8> {
    vec![ESC, b'p', 0x00, 0x0A, 0xFF]
}

/// # Drawer Pulse (ESC p 2)
///
/// Short kick (2 × 2 ms) on the drawer connector.
#[inline]
pub fn pulse() -> Vec<u8> {
    vec![ESC, b'p', 0x02]
}

// ============================================================================
// PAPER FEED AND POSITIONING
// ============================================================================

/// Print the line buffer and advance one line.
#[inline]
pub fn linefeed() -> Vec<u8> {
    vec![LF]
}

/// # Print and Feed n Lines (ESC d n)
///
/// ```
/// use cinta::protocol::commands;
///
/// assert_eq!(commands::feed_lines(3), vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Absolute Horizontal Position (ESC $ nL nH)
///
/// Moves the print position `x` motion units from the start of the line.
#[inline]
pub fn move_x(x: u16) -> Vec<u8> {
    let [l, h] = u16_le(x);
    vec![ESC, b'$', l, h]
}

/// # Absolute Vertical Position in Page Mode (GS $ nL nH)
#[inline]
pub fn move_y(y: u16) -> Vec<u8> {
    let [l, h] = u16_le(y);
    vec![GS, b'$', l, h]
}

/// # Left Margin (GS L nL nH)
#[inline]
pub fn margin_left(margin: u16) -> Vec<u8> {
    let [l, h] = u16_le(margin);
    vec![GS, b'L', l, h]
}

// ============================================================================
// STATUS
// ============================================================================

/// Which status byte a real-time status request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StatusKind {
    /// Printer status (drawer, online)
    Printer = 1,
    /// Offline cause (cover, feed button)
    Offline = 2,
    /// Error cause (cutter, unrecoverable)
    Error = 3,
    /// Paper roll sensor
    Paper = 4,
}

/// # Real-Time Status Request (DLE EOT n)
///
/// The printer answers with a single status byte, even while busy.
///
/// ```
/// use cinta::protocol::commands;
///
/// assert_eq!(commands::status_request(4), vec![0x10, 0x04, 0x04]);
/// ```
#[inline]
pub fn status_request(n: u8) -> Vec<u8> {
    vec![DLE, EOT, n]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use cinta::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

/// Split an integer into `[value % 256, value / 256]`.
///
/// Unlike [`u16_le`] this accepts any size; the high byte wraps when the
/// value doesn't fit in 16 bits, which is what the printer would see anyway.
///
/// ```
/// use cinta::protocol::commands::split_lh;
///
/// assert_eq!(split_lh(256), [0, 1]);
/// assert_eq!(split_lh(7092), [0xB4, 0x1B]);
/// ```
#[inline]
pub const fn split_lh(value: usize) -> [u8; 2] {
    [(value % 256) as u8, (value / 256) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

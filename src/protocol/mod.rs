//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! used by thermal receipt printers. Every builder is a pure function that
//! returns the exact bytes of one command (or one command sequence); nothing
//! here talks to a device.
//!
//! ## Module Structure
//!
//! - [`commands`]: Fixed printer commands (init, cut, feed, status)
//! - [`page`]: Page mode and print area
//! - [`text`]: Text styling and toggle state
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`graphics`]: Raster bands, raster images, graphics buffer
//!
//! ## Usage Example
//!
//! ```
//! use cinta::protocol::{barcode, commands, text};
//!
//! let mut data = Vec::new();
//!
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(b"RECEIPT\n");
//! data.extend(barcode::barcode(barcode::Symbology::Ean13, b"590123412345"));
//! data.extend(commands::cut_full());
//!
//! // Send `data` to printer via transport...
//! ```

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod page;
pub mod text;

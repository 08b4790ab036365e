//! # Cinta - ESC/POS Receipt Printer Library
//!
//! Cinta turns pictures, barcodes, QR codes and styled text into the byte
//! streams ESC/POS thermal printers understand. It provides:
//!
//! - **Raster pipeline**: alpha compositing, luminance thresholding and
//!   packing into row-aligned or 24-row band layouts
//! - **Protocol implementation**: ESC/POS command builders
//! - **Session**: stateful text toggles, job nodes and status reads
//! - **Transport**: device files, raw TCP and in-memory sinks
//!
//! ## Quick Start
//!
//! ```no_run
//! use cinta::{
//!     protocol::{commands, graphics},
//!     render,
//!     transport::{DeviceTransport, Transport},
//! };
//!
//! // Open connection to printer
//! let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
//!
//! // Threshold a picture and pack it row by row
//! let picture = image::open("logo.png").map_err(|e| cinta::CintaError::Image(e.to_string()))?;
//! let raster = render::rasterize_simple(&picture);
//!
//! // Build print sequence
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(graphics::raster_image(&raster));
//! data.extend(commands::cut_full());
//!
//! // Send to printer
//! transport.write_all(&data)?;
//!
//! # Ok::<(), cinta::CintaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Compositing, thresholding and bit packing |
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Profiles, job options, sessions |
//! | [`transport`] | Communication backends |
//! | [`error`] | Error types |

pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::{CintaError, CintaResult};
pub use printer::{PrinterConfig, Session};
pub use transport::{DeviceTransport, MemoryTransport, NetworkTransport, Transport};

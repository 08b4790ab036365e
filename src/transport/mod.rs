//! # Printer Transport Layer
//!
//! This module provides communication backends for sending data to printers.
//!
//! ## Available Transports
//!
//! | Transport | Target | Status reads |
//! |-----------|--------|--------------|
//! | [`DeviceTransport`] | `/dev/usb/lp0`, `/dev/ttyUSB0`, `/dev/rfcomm0` | Yes |
//! | [`NetworkTransport`] | Raw TCP, usually port 9100 | Yes |
//! | [`MemoryTransport`] | In-memory buffer (dumps, tests) | Queued bytes |
//!
//! Every transport implements [`Transport`], so a
//! [`Session`](crate::printer::Session) works the same over any of them.
//! Errors from the underlying device are surfaced as
//! [`CintaError::Transport`] and never retried.

pub mod device;
pub mod network;

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{CintaError, CintaResult};

pub use device::DeviceTransport;
pub use network::NetworkTransport;

/// A byte sink that can also answer single-byte status reads.
pub trait Transport {
    /// Send every byte of `data` to the printer.
    fn write_all(&mut self, data: &[u8]) -> CintaResult<()>;

    /// Read one status byte.
    fn read_byte(&mut self) -> CintaResult<u8>;

    /// Push buffered bytes out to the device.
    fn flush(&mut self) -> CintaResult<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, data: &[u8]) -> CintaResult<()> {
        (**self).write_all(data)
    }

    fn read_byte(&mut self) -> CintaResult<u8> {
        (**self).read_byte()
    }

    fn flush(&mut self) -> CintaResult<()> {
        (**self).flush()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, data: &[u8]) -> CintaResult<()> {
        (**self).write_all(data)
    }

    fn read_byte(&mut self) -> CintaResult<u8> {
        (**self).read_byte()
    }

    fn flush(&mut self) -> CintaResult<()> {
        (**self).flush()
    }
}

// ============================================================================
// MEMORY TRANSPORT
// ============================================================================

/// # In-Memory Transport
///
/// Collects everything written to it and answers status reads from a queue.
///
/// ```
/// use cinta::transport::{MemoryTransport, Transport};
///
/// let mut transport = MemoryTransport::with_responses([0x12]);
/// transport.write_all(&[0x10, 0x04, 0x01])?;
///
/// assert_eq!(transport.read_byte()?, 0x12);
/// assert_eq!(transport.written(), &[0x10, 0x04, 0x01]);
/// # Ok::<(), cinta::CintaError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    written: Vec<u8>,
    responses: VecDeque<u8>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose status reads return `responses` in order.
    pub fn with_responses(responses: impl IntoIterator<Item = u8>) -> Self {
        Self {
            written: Vec::new(),
            responses: responses.into_iter().collect(),
        }
    }

    /// Queue another status byte.
    pub fn push_response(&mut self, byte: u8) {
        self.responses.push_back(byte);
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Take the written bytes, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.written)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.written
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> CintaResult<()> {
        debug!(len = data.len(), "buffering bytes");
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn read_byte(&mut self) -> CintaResult<u8> {
        self.responses
            .pop_front()
            .ok_or_else(|| CintaError::Transport("no status byte available".to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

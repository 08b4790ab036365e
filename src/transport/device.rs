//! # Device File Transport
//!
//! Talks to a printer through a character device: USB line printers
//! (`/dev/usb/lp0`), USB/serial adapters (`/dev/ttyUSB0`) and Bluetooth
//! RFCOMM bindings (`/dev/rfcomm0`).
//!
//! ## TTY Configuration
//!
//! When the device is a terminal it is switched to raw mode so binary data
//! is transmitted without modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! Line printer devices are not terminals and are left alone.
//!
//! ## Chunked Writes
//!
//! Large jobs (raster images mostly) are written in chunks with a short
//! pause between them so slow links don't overflow the printer's input
//! buffer. The default chunk size is 4096 bytes.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::Transport;
use crate::error::{CintaError, CintaResult};

/// Default USB line printer device
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Printer Transport
///
/// ## Example
///
/// ```no_run
/// use cinta::transport::{DeviceTransport, Transport};
/// use cinta::protocol::commands;
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
///
/// transport.write_all(&commands::init())?;
///
/// # Ok::<(), cinta::CintaError>(())
/// ```
pub struct DeviceTransport {
    path: PathBuf,
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open a printer device for reading and writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> CintaResult<Self> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                CintaError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let fd = file.as_raw_fd();
        if is_tty(fd) {
            debug!(device = %path.display(), "configuring raw tty");
            configure_tty_raw(fd)?;
        }

        info!(device = %path.display(), "opened printer device");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the chunk size for large writes. Zero is treated as one byte.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for DeviceTransport {
    /// Small writes are sent directly; large writes are chunked.
    #[instrument(skip(self, data), fields(device = %self.path.display(), data_len = data.len()))]
    fn write_all(&mut self, data: &[u8]) -> CintaResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        if data.len() <= self.chunk_size {
            self.file.write_all(data).map_err(write_failed)?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.file.write_all(chunk).map_err(write_failed)?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        debug!("write complete");
        Ok(())
    }

    fn read_byte(&mut self) -> CintaResult<u8> {
        let mut byte = [0u8; 1];
        self.file
            .read_exact(&mut byte)
            .map_err(|e| CintaError::Transport(format!("Read failed: {}", e)))?;
        Ok(byte[0])
    }

    fn flush(&mut self) -> CintaResult<()> {
        self.file
            .flush()
            .map_err(|e| CintaError::Transport(format!("Flush failed: {}", e)))
    }
}

fn write_failed(e: io::Error) -> CintaError {
    CintaError::Transport(format!("Write failed: {}", e))
}

#[cfg(unix)]
fn is_tty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_fd: i32) -> bool {
    false
}

/// Configure a file descriptor for raw TTY mode.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB (then CS8 is set)
///
/// IXON/IXOFF/IXANY must be off: 0x11 (XON) and 0x13 (XOFF) appear freely
/// in raster data.
#[cfg(unix)]
fn configure_tty_raw(fd: i32) -> CintaResult<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(CintaError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // A status read blocks until one byte arrives.
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(CintaError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32) -> CintaResult<()> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device_path() {
        assert_eq!(DEFAULT_DEVICE, "/dev/usb/lp0");
    }

    #[test]
    fn test_open_missing_device() {
        let result = DeviceTransport::open("/nonexistent/printer");
        assert!(matches!(result, Err(CintaError::Transport(_))));
    }

    #[test]
    fn test_regular_file_round_trip() {
        let path = std::env::temp_dir().join(format!("cinta-device-{}", std::process::id()));
        std::fs::write(&path, [0x16]).unwrap();

        let mut transport = DeviceTransport::open(&path).unwrap();
        assert_eq!(transport.read_byte().unwrap(), 0x16);

        transport.set_chunk_size(2);
        transport.set_chunk_delay(Duration::ZERO);
        transport.write_all(&[0x1B, 0x40, 0x0A]).unwrap();
        transport.flush().unwrap();
        drop(transport);

        // Read advanced the cursor past the first byte; writes follow it.
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x16, 0x1B, 0x40, 0x0A]);
        std::fs::remove_file(&path).unwrap();
    }
}

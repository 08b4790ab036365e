//! # Network Transport
//!
//! Most Ethernet and Wi-Fi receipt printers accept raw ESC/POS on TCP
//! port 9100. The connection carries both the command stream and the
//! printer's status replies.

use std::io::{Read, Write};
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{info, instrument};

use super::Transport;
use crate::error::{CintaError, CintaResult};

/// Raw printing port
pub const DEFAULT_PORT: u16 = 9100;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// # TCP Printer Transport
///
/// ```no_run
/// use cinta::transport::{NetworkTransport, Transport};
///
/// let mut transport = NetworkTransport::connect("192.168.1.100:9100")?;
/// transport.write_all(&[0x1B, 0x40])?;
/// # Ok::<(), cinta::CintaError>(())
/// ```
pub struct NetworkTransport {
    addr: SocketAddr,
    stream: TcpStream,
}

impl NetworkTransport {
    /// Connect to `addr`. A bare host gets port 9100.
    pub fn connect(addr: &str) -> CintaResult<Self> {
        Self::connect_timeout(addr, DEFAULT_TIMEOUT)
    }

    pub fn connect_timeout(addr: &str, timeout: Duration) -> CintaResult<Self> {
        let addr = resolve(addr)?;

        let stream = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| CintaError::Transport(format!("{}: {}", addr, e)))?;
        apply_timeouts(&stream, timeout)?;

        info!(%addr, "connected to printer");
        Ok(Self { addr, stream })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

fn apply_timeouts(stream: &TcpStream, timeout: Duration) -> CintaResult<()> {
    stream
        .set_read_timeout(Some(timeout))
        .and_then(|_| stream.set_write_timeout(Some(timeout)))
        .map_err(|e| CintaError::Transport(format!("Setting timeout failed: {}", e)))
}

/// `host`, `host:port`, a bare IP (v4 or v6) or `[v6]`.
fn resolve(addr: &str) -> CintaResult<SocketAddr> {
    if let Ok(socket) = addr.parse::<SocketAddr>() {
        return Ok(socket);
    }
    let bare = addr.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    let with_port = if addr.contains(':') {
        addr.to_string()
    } else {
        format!("{}:{}", addr, DEFAULT_PORT)
    };

    with_port
        .to_socket_addrs()
        .map_err(|e| CintaError::Transport(format!("Invalid address {}: {}", with_port, e)))?
        .next()
        .ok_or_else(|| CintaError::Transport(format!("No address for {}", with_port)))
}

impl Transport for NetworkTransport {
    #[instrument(skip(self, data), fields(addr = %self.addr, data_len = data.len()))]
    fn write_all(&mut self, data: &[u8]) -> CintaResult<()> {
        self.stream
            .write_all(data)
            .map_err(|e| CintaError::Transport(format!("Write failed: {}", e)))
    }

    fn read_byte(&mut self) -> CintaResult<u8> {
        let mut byte = [0u8; 1];
        self.stream
            .read_exact(&mut byte)
            .map_err(|e| CintaError::Transport(format!("Read failed: {}", e)))?;
        Ok(byte[0])
    }

    fn flush(&mut self) -> CintaResult<()> {
        self.stream
            .flush()
            .map_err(|e| CintaError::Transport(format!("Flush failed: {}", e)))
    }
}

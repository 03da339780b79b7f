//! Async TCP connection to a Steam connection manager.
//!
//! Bytes are passed through untouched: framing is the engine's business.

use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Size of a single socket read.
const READ_CHUNK: usize = 4096;

/// Raw byte stream to Steam.
pub struct SteamConnection {
    stream: TcpStream,
    buf:    Box<[u8; READ_CHUNK]>,
}

impl SteamConnection {
    /// Connect to `addr` (`host:port`).
    pub async fn connect(addr: &str) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        Self { stream, buf: Box::new([0u8; READ_CHUNK]) }
    }

    /// Read whatever is available. An empty slice means the peer closed.
    pub async fn recv(&mut self) -> io::Result<&[u8]> {
        let n = self.stream.read(&mut self.buf[..]).await?;
        Ok(&self.buf[..n])
    }

    /// Write a whole buffer.
    pub async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.stream.write_all(data).await
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> TcpStream { self.stream }
}

//! Client Connection
//!
//! One blocking TCP connection to the store.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::{read_response, write_request, Request, Response};

/// A single client connection to the store
///
/// Each call is one framed request followed by one framed response; the
/// connection carries no other state.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to the store at the given address
    ///
    /// Sets up buffered I/O and disables Nagle's algorithm.
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Issue one request and wait for its response (blocking)
    pub fn call(&mut self, request: &Request) -> Result<Response> {
        tracing::trace!("Sending {:?} to {}", request.request_type(), self.peer_addr);

        write_request(&mut self.writer, request)?;
        let response = read_response(&mut self.reader)?;

        tracing::trace!(
            "Received {:?} from {}",
            response.status,
            self.peer_addr
        );

        Ok(response)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

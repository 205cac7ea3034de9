//! Connection Driver
//!
//! Owns the socket and the I/O readiness loop.
//!
//! The driver knows nothing about the protocol: it flushes whatever the
//! handler has queued for transmission, feeds whatever the server sends back
//! into the handler, and re-checks the caller's predicate after every
//! activity tick. Deadline expiry is not an error here; the caller decides
//! what an elapsed wait means.

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{AdminError, Result};
use crate::network::AdminCommandHandler;

/// Floor for a single read-timeout slice
///
/// `set_read_timeout` rejects a zero duration.
const MIN_POLL_SLICE: Duration = Duration::from_millis(1);

/// Drives I/O for one connection under a caller-supplied stop predicate
pub trait ConnectionDriver {
    /// Run the readiness loop: flush handler output, read server bytes into
    /// the handler, and invoke `keep_waiting` after each activity tick.
    ///
    /// Returns when `keep_waiting` reports `false` or `timeout` elapses,
    /// whichever comes first. The calling thread blocks cooperatively inside
    /// each readiness wait; there is no busy-spinning.
    fn poll_until<F>(
        &mut self,
        handler: &mut AdminCommandHandler,
        keep_waiting: F,
        timeout: Duration,
    ) -> Result<()>
    where
        F: FnMut(&AdminCommandHandler) -> bool;
}

/// Blocking TCP driver
///
/// Readiness waits are implemented as bounded-timeout reads: each tick
/// blocks in the OS for up to the configured poll interval (or the remaining
/// deadline, whichever is shorter).
pub struct TcpDriver {
    /// The connected stream
    stream: TcpStream,

    /// Granularity of a single readiness wait
    poll_interval: Duration,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpDriver {
    /// Connect to the server described by `config`
    pub fn connect(config: &Config) -> Result<Self> {
        use std::net::ToSocketAddrs;

        let addr = config
            .server_addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                AdminError::Protocol(format!(
                    "Server address resolved to nothing: {}",
                    config.server_addr
                ))
            })?;

        let stream = TcpStream::connect_timeout(&addr, config.connect_timeout)?;
        stream.set_nodelay(config.tcp_nodelay)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            stream,
            poll_interval: config.poll_interval,
            peer_addr,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Write everything the handler has queued for transmission
    fn flush_outbound(&mut self, handler: &mut AdminCommandHandler) -> Result<()> {
        if let Some(bytes) = handler.take_outbound() {
            tracing::trace!("Writing {} byte(s) to {}", bytes.len(), self.peer_addr);
            self.stream.write_all(&bytes)?;
            self.stream.flush()?;
        }
        Ok(())
    }
}

impl ConnectionDriver for TcpDriver {
    fn poll_until<F>(
        &mut self,
        handler: &mut AdminCommandHandler,
        mut keep_waiting: F,
        timeout: Duration,
    ) -> Result<()>
    where
        F: FnMut(&AdminCommandHandler) -> bool,
    {
        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; 4096];

        loop {
            self.flush_outbound(handler)?;

            if !keep_waiting(handler) {
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }

            // Block for one readiness slice, bounded by the deadline.
            let slice = (deadline - now).min(self.poll_interval).max(MIN_POLL_SLICE);
            self.stream.set_read_timeout(Some(slice))?;

            match self.stream.read(&mut buf) {
                Ok(0) => {
                    tracing::debug!("Server {} closed the connection", self.peer_addr);
                    return Err(AdminError::ConnectionClosed);
                }
                Ok(n) => handler.receive_data(&buf[..n])?,
                Err(ref e)
                    if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut =>
                {
                    // No activity this tick; loop re-checks predicate/deadline
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e.into());
                }
            }
        }
    }
}

//! One-shot stub forwarder used by the iterative walker (spec.md §4.G).
//!
//! Grounded on `simple_forward.go`/`forward.go` in `original_source`: dial
//! a fresh socket, write one datagram, read one datagram, verify the
//! reply's header ID matches, close. Deadline honored via socket-level
//! read/write timeouts, matching the teacher's `serve_udp`'s use of
//! `set_read_timeout` in `dns_server.rs`.

use std::net::UdpSocket;
use std::time::Duration;

use log::warn;
use permit::Permit;

use crate::error::ResolveError;
use crate::wire::Message;

const UDP_PAYLOAD_LIMIT: usize = 512;

/// A throwaway-socket forwarder: one exchange per call.
pub struct StubForwarder {
    timeout: Duration,
}

impl Default for StubForwarder {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl StubForwarder {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Send `query` to `target:53` and return the decoded reply.
    ///
    /// `permit` is checked before the exchange; it does not interrupt an
    /// in-flight socket call (the socket-level timeout is the real brake,
    /// matching spec.md §4.G).
    pub fn exchange(&self, permit: &Permit, target: &str, query: &Message) -> Result<Message, ResolveError> {
        if permit.is_revoked() {
            return Err(ResolveError::DeadlineExceeded);
        }

        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| ResolveError::UpstreamUnavailable(e.to_string()))?;
        socket
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| ResolveError::UpstreamUnavailable(e.to_string()))?;
        socket
            .set_read_timeout(Some(self.timeout))
            .map_err(|e| ResolveError::UpstreamUnavailable(e.to_string()))?;
        socket
            .connect((target, 53))
            .map_err(|e| ResolveError::UpstreamUnavailable(e.to_string()))?;

        let mut out = [0u8; UDP_PAYLOAD_LIMIT];
        let n = query.write(&mut out).map_err(ResolveError::from)?;
        socket
            .send(&out[..n])
            .map_err(|e| ResolveError::UpstreamUnavailable(e.to_string()))?;

        let mut in_buf = [0u8; UDP_PAYLOAD_LIMIT];
        let read = socket
            .recv(&mut in_buf)
            .map_err(|e| ResolveError::UpstreamUnavailable(e.to_string()))?;

        let reply = Message::parse(&in_buf[..read]).map_err(ResolveError::from)?;
        if reply.header.id != query.header.id {
            warn!(
                "stub forwarder: reply id {} does not match request id {}",
                reply.header.id, query.header.id
            );
            return Err(ResolveError::Malformed("reply id mismatch".to_string()));
        }
        Ok(reply)
    }
}

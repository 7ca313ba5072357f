//! UDP listener (spec.md §6; SPEC_FULL.md §4.N).
//!
//! Grounded on `serve_udp` in the teacher's `dns_server.rs` (bind once,
//! 500ms read timeout loop, `Permit::is_revoked` as the stop condition,
//! drop-and-continue on a bad packet) and on `internal/endpoints/udp.go`'s
//! failure counters, which become `log::warn!` call sites here instead of
//! prometheus counters (metrics exposition is out of scope per spec.md §1).

use std::net::UdpSocket;
use std::time::Duration;

use log::{info, warn};
use permit::Permit;

use crate::internal::InternalMessage;
use crate::resolve::Resolver;
use crate::server::UDP_PAYLOAD_LIMIT;
use crate::wire::{Message, RCode};

const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Bind `addr` and serve UDP queries against `pipeline` until `permit` is
/// revoked.
pub fn serve_udp(permit: &Permit, addr: &str, pipeline: &dyn Resolver) -> std::io::Result<()> {
    let socket = UdpSocket::bind(addr)?;
    socket.set_read_timeout(Some(READ_TIMEOUT))?;
    info!("udp listener bound to {addr}");

    let mut buf = [0u8; UDP_PAYLOAD_LIMIT];
    while !permit.is_revoked() {
        let (n, peer) = match socket.recv_from(&mut buf) {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock || e.kind() == std::io::ErrorKind::TimedOut => {
                continue;
            }
            Err(e) => {
                warn!("udp listener: read error: {e}");
                continue;
            }
        };

        let request = match Message::parse(&buf[..n]) {
            Ok(m) => m,
            Err(e) => {
                warn!("udp listener: dropping undecodable packet from {peer}: {e}");
                continue;
            }
        };

        let Some(reply) = handle_request(permit, &request, pipeline) else {
            continue;
        };
        let mut out = [0u8; UDP_PAYLOAD_LIMIT];
        match reply.write(&mut out) {
            Ok(len) => {
                if let Err(e) = socket.send_to(&out[..len], peer) {
                    warn!("udp listener: write error to {peer}: {e}");
                }
            }
            Err(e) => warn!("udp listener: failed to encode reply to {peer}: {e}"),
        }
    }
    info!("udp listener on {addr} stopped");
    Ok(())
}

/// Decode the question, run the pipeline, and re-lower into wire form,
/// matching the listener contract in spec.md §6. Returns `None` when a
/// deadline/cancellation error means the client should simply time out
/// (spec.md §7's policy for context errors).
fn handle_request(permit: &Permit, request: &Message, pipeline: &dyn Resolver) -> Option<Message> {
    let question = match request.single_question() {
        Ok(q) => q.clone(),
        Err(_) => return Some(request.error_response(RCode::FormatError)),
    };
    let internal = InternalMessage::new(question);
    match pipeline.resolve(permit, internal) {
        Ok(reply) => Some(reply.into_wire_response(request.header.id, request.header.recursion_desired)),
        Err(crate::error::ResolveError::DeadlineExceeded) => None,
        Err(e) => {
            warn!("udp listener: resolve failed: {e}");
            Some(request.error_response(RCode::ServerFailure))
        }
    }
}

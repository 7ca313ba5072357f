//! TCP listener (spec.md §6; SPEC_FULL.md §4.N).
//!
//! Grounded on `internal/endpoints/tcp.go` in `original_source`: a 2-byte
//! big-endian length prefix per message, one connection handled fully
//! before accepting the next (no connection pool — outside the core's
//! concurrency budget per spec.md §5). `internal/app/app.go` never wires
//! this endpoint even though it exists; SPEC_FULL.md §P wires it.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use log::{info, warn};
use permit::Permit;

use crate::internal::InternalMessage;
use crate::resolve::Resolver;
use crate::wire::{Message, RCode};

const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const MAX_TCP_MESSAGE: usize = u16::MAX as usize;

pub fn serve_tcp(permit: &Permit, addr: &str, pipeline: &dyn Resolver) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    info!("tcp listener bound to {addr}");

    while !permit.is_revoked() {
        let (stream, peer) = match listener.accept() {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(ACCEPT_POLL_INTERVAL);
                continue;
            }
            Err(e) => {
                warn!("tcp listener: accept error: {e}");
                continue;
            }
        };
        if let Err(e) = handle_connection(permit, stream, pipeline) {
            warn!("tcp listener: connection with {peer} failed: {e}");
        }
    }
    info!("tcp listener on {addr} stopped");
    Ok(())
}

fn handle_connection(permit: &Permit, mut stream: TcpStream, pipeline: &dyn Resolver) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;

    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf)?;
    let len = u16::from_be_bytes(len_buf) as usize;
    if len > MAX_TCP_MESSAGE {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "message too long"));
    }

    let mut body = vec![0u8; len];
    stream.read_exact(&mut body)?;

    let request = match Message::parse(&body) {
        Ok(m) => m,
        Err(e) => {
            warn!("tcp listener: dropping undecodable message: {e}");
            return Ok(());
        }
    };

    let question = match request.single_question() {
        Ok(q) => q.clone(),
        Err(_) => {
            write_reply(&mut stream, &request.error_response(RCode::FormatError))?;
            return Ok(());
        }
    };

    let reply = match pipeline.resolve(permit, InternalMessage::new(question)) {
        Ok(reply) => reply.into_wire_response(request.header.id, request.header.recursion_desired),
        Err(crate::error::ResolveError::DeadlineExceeded) => return Ok(()),
        Err(e) => {
            warn!("tcp listener: resolve failed: {e}");
            request.error_response(RCode::ServerFailure)
        }
    };
    write_reply(&mut stream, &reply)
}

fn write_reply(stream: &mut TcpStream, message: &Message) -> std::io::Result<()> {
    let mut buf = vec![0u8; MAX_TCP_MESSAGE];
    let n = message
        .write(&mut buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    stream.write_all(&(n as u16).to_be_bytes())?;
    stream.write_all(&buf[..n])?;
    Ok(())
}

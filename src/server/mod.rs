//! UDP/TCP front doors (SPEC_FULL.md §4.N): threaded listeners in front of
//! the resolver pipeline.
//!
//! Grounded on `internal/endpoints/udp.go`/`tcp.go`/`defaults.go` in
//! `original_source` for the listener shape and default addresses, and on
//! the teacher's `serve_udp` in `dns_server.rs` for the threaded
//! read-timeout loop and `Permit`-based shutdown.

pub mod tcp;
pub mod udp;

pub use tcp::serve_tcp;
pub use udp::serve_udp;

/// `internal/endpoints/defaults.go`'s `DefaultAddrPort`.
pub const DEFAULT_ADDR: &str = "127.0.0.1:53";
/// `internal/endpoints/defaults.go`'s `DefaultCloudflareAddrPort`.
pub const DEFAULT_UPSTREAM: &str = "1.1.1.1:53";

/// UDP payload cap shared by the listener and the forwarders (spec.md §6).
pub const UDP_PAYLOAD_LIMIT: usize = 512;

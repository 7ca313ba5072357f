//! [![crates.io version](https://img.shields.io/crates/v/dns-resolver.svg)](https://crates.io/crates/dns-resolver)
//! [![license: Apache 2.0](https://gitlab.com/leonhard-llc/ops/-/raw/main/license-apache-2.0.svg)](https://gitlab.com/leonhard-llc/ops/-/raw/main/dns-resolver/LICENSE)
//! [![unsafe forbidden](https://gitlab.com/leonhard-llc/ops/-/raw/main/unsafe-forbidden.svg)](https://github.com/rust-secure-code/safety-dance/)
//! [![pipeline status](https://gitlab.com/leonhard-llc/ops/badges/main/pipeline.svg)](https://gitlab.com/leonhard-llc/ops/-/pipelines)
//!
//! # dns-resolver
//!
//! A threaded, recursive/forwarding DNS resolver library: wire codec,
//! a composable resolver pipeline (static override, blacklist, cache,
//! iterative or forwarding resolution), and UDP/TCP listeners.
//!
//! ## Use Cases
//! - Run a local caching resolver that walks the DNS hierarchy itself
//!   instead of trusting an upstream.
//! - Sinkhole a fixed set of names while forwarding everything else.
//! - Embed the wire codec in a tool that needs to read or write raw DNS
//!   messages, compression pointers included.
//!
//! ## Features
//! - `forbid(unsafe_code)`
//! - No async runtime: one thread per listener plus the forwarder's
//!   sender/receiver pair.
//!
//! ## Limitations
//! - No DNSSEC validation, no EDNS(0) beyond tolerating OPT as opaque,
//!   no zone file loading or authoritative service.
//! - UDP responses over 512 bytes are not split; truncation is left to
//!   the listener.
//!
//! ## Example
//! ```no_run
//! use dns_resolver::resolve::{ChainResolver, IterativeResolver, StaticResolver};
//! use dns_resolver::server::serve_udp;
//! use permit::Permit;
//! use std::collections::HashMap;
//!
//! let pipeline = ChainResolver::new(vec![
//!     Box::new(StaticResolver::new(HashMap::new())),
//!     Box::new(IterativeResolver::default()),
//! ]);
//! let permit = Permit::new();
//! serve_udp(&permit, "127.0.0.1:5300", &pipeline).unwrap();
//! ```
//!
//! ## Changelog
//! - v0.1.0 - Initial version
#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod error;
pub mod forwarder;
pub mod idalloc;
pub mod internal;
pub mod resolve;
pub mod roots;
pub mod server;
pub mod wire;

pub use error::{BufferError, CodecError, NameError, ResolveError};
pub use internal::InternalMessage;

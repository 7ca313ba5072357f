//! The resolver pipeline (spec.md §2, §4.H–§4.M): a composable chain of
//! resolution stages sharing one trait.
//!
//! Grounded on `resolver.go`'s `Resolver` interface in `original_source`
//! (`Resolve(context.Context, proto.Message) (proto.Message, error)`),
//! translated to a trait object the way the teacher threads `&permit::Permit`
//! through `dns_server.rs`'s request handling.

pub mod authority_cleaner;
pub mod blacklist;
pub mod cache_resolver;
pub mod chain;
pub mod forward;
pub mod iterative;
pub mod static_resolver;

use permit::Permit;

use crate::error::ResolveError;
use crate::internal::InternalMessage;

/// A single resolution stage. Implementors either answer the question
/// themselves or delegate to a wrapped child resolver.
pub trait Resolver: Send + Sync {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError>;
}

pub use authority_cleaner::AuthorityCleaner;
pub use blacklist::BlacklistResolver;
pub use cache_resolver::CacheResolver;
pub use chain::ChainResolver;
pub use forward::ForwardResolver;
pub use iterative::IterativeResolver;
pub use static_resolver::StaticResolver;

//! Upstream forwarders (spec.md §4.F, §4.G): a stub one-shot forwarder for
//! the iterative walker, and a multiplexed long-lived forwarder for
//! forward-mode resolution.

pub mod multiplexed;
pub mod stub;

pub use multiplexed::MultiplexedForwarder;
pub use stub::StubForwarder;

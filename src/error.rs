//! Error kinds for the resolver, not error *types*: spec.md §7 asks for one
//! flat taxonomy per failure family rather than a type per component.  We
//! model that with `thiserror`, the way several of the example repos in the
//! retrieval pack derive their errors (see `other_examples/`), rather than
//! hand-rolling `Display`/`Error` impls the way the teacher's `DnsError`
//! (`dns-server/src/lib.rs`) does.

use thiserror::Error;

/// Out-of-bounds read/write in the byte cursor or codec.
///
/// Carries the operation name and the offending position, matching
/// `pkg/bv.ErrBuf` in the original source (`op`, `pos`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Error)]
#[error("buffer error: op={op} pos={pos}")]
pub struct BufferError {
    pub op: &'static str,
    pub pos: usize,
}

impl BufferError {
    pub fn new(op: &'static str, pos: usize) -> Self {
        Self { op, pos }
    }
}

/// Errors from the name compression codec (spec.md §4.B).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NameError {
    #[error("compression pointer jump limit exceeded")]
    JumpLimit,
    #[error("label {0:?} is longer than 63 bytes")]
    LabelTooLong(String),
    #[error("name is longer than 255 bytes")]
    NameTooLong,
    #[error("label is not valid utf-8")]
    InvalidLabel,
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Decode/encode failures for the wire codec (spec.md §4.C), a superset of
/// `BufferError`/`NameError` plus message-shape problems the original
/// source's `Decoder.Decode` surfaces as plain `error` values.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("message carries more than one question")]
    MultipleQuestions,
    #[error("message carries no question")]
    NoQuestion,
}

/// Errors surfaced by the resolver pipeline (spec.md §7).
///
/// `NotFound` is the "no-report" sentinel: it is swallowed by
/// [`crate::resolve::chain::ChainResolver`] and must never reach a listener.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("transaction ID pool exhausted")]
    PoolExhausted,
    #[error("upstream I/O error: {0}")]
    UpstreamUnavailable(String),
    #[error("deadline exceeded")]
    DeadlineExceeded,
    /// "pass to next resolver in chain" — not a real failure.
    #[error("no report")]
    NotFound,
    #[error("all resolvers returned error")]
    ChainExhausted,
    #[error("malformed message: {0}")]
    Malformed(String),
}

impl ResolveError {
    /// True for the chain's silent fallthrough sentinel (spec.md §4.L, §7).
    #[must_use]
    pub fn is_no_report(&self) -> bool {
        matches!(self, ResolveError::NotFound)
    }
}

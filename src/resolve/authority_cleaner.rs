//! Authority cleaner (spec.md §4.M).
//!
//! Grounded on `authority_cleaner.go` in `original_source`: when the child
//! returns a non-empty Answer, clear Authority — downstream clients never
//! need referral hints alongside a complete answer.

use permit::Permit;

use crate::error::ResolveError;
use crate::internal::InternalMessage;
use crate::resolve::Resolver;

pub struct AuthorityCleaner<R: Resolver> {
    child: R,
}

impl<R: Resolver> AuthorityCleaner<R> {
    #[must_use]
    pub fn new(child: R) -> Self {
        Self { child }
    }
}

impl<R: Resolver> Resolver for AuthorityCleaner<R> {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        let mut reply = self.child.resolve(permit, msg)?;
        if !reply.answer.is_empty() {
            reply.authority.clear();
        }
        Ok(reply)
    }
}

//! Chain resolver (spec.md §4.L).
//!
//! Grounded on `ChainResolver.Resolve` in `chain.go` (`original_source`):
//! try children in order, swallow `no-report` silently, log any other
//! error and continue, first success wins.

use log::warn;
use permit::Permit;

use crate::error::ResolveError;
use crate::internal::InternalMessage;
use crate::resolve::Resolver;

pub struct ChainResolver {
    children: Vec<Box<dyn Resolver>>,
}

impl ChainResolver {
    #[must_use]
    pub fn new(children: Vec<Box<dyn Resolver>>) -> Self {
        Self { children }
    }
}

impl Resolver for ChainResolver {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        if self.children.is_empty() {
            return Err(ResolveError::ChainExhausted);
        }
        for child in &self.children {
            match child.resolve(permit, msg.clone()) {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_no_report() => continue,
                Err(e) => warn!("chain resolver: child returned error: {e}"),
            }
        }
        Err(ResolveError::ChainExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{QClass, QType, Question};

    struct NoReport;
    impl Resolver for NoReport {
        fn resolve(&self, _permit: &Permit, _msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
            Err(ResolveError::NotFound)
        }
    }

    struct Succeeds;
    impl Resolver for Succeeds {
        fn resolve(&self, _permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
            Ok(msg)
        }
    }

    fn msg() -> InternalMessage {
        InternalMessage::new(Question { name: "example.com".to_string(), qtype: QType::A, qclass: QClass::IN })
    }

    #[test]
    fn first_success_wins() {
        let chain = ChainResolver::new(vec![Box::new(NoReport), Box::new(Succeeds)]);
        let permit = Permit::new();
        assert!(chain.resolve(&permit, msg()).is_ok());
    }

    #[test]
    fn all_no_report_is_chain_exhausted() {
        let chain = ChainResolver::new(vec![Box::new(NoReport), Box::new(NoReport)]);
        let permit = Permit::new();
        assert!(matches!(chain.resolve(&permit, msg()), Err(ResolveError::ChainExhausted)));
    }

    #[test]
    fn empty_chain_fails_immediately_at_resolve() {
        let chain = ChainResolver::new(vec![]);
        let permit = Permit::new();
        assert!(matches!(chain.resolve(&permit, msg()), Err(ResolveError::ChainExhausted)));
    }
}

//! Blacklist resolver (spec.md §4.J).
//!
//! Grounded on `blacklist.go` in `original_source`: a set of sinkholed
//! names, synthesizing a single A record at 127.0.0.1 with maximum TTL on
//! hit, delegating to the child resolver otherwise. The periodic
//! URL-refresh mechanism described there is stubbed (spec.md §9) — this
//! keeps the set fixed at construction and documents the refresh contract
//! instead of implementing a downloader.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::RwLock;

use permit::Permit;

use crate::error::ResolveError;
use crate::internal::InternalMessage;
use crate::resolve::Resolver;
use crate::wire::{QClass, QType, RData, Record};

/// Synthetic TTL used for both the blacklist sinkhole and the static
/// override table (spec.md §4.J): "maximum 32-bit TTL".
pub const MAX_TTL: u32 = u32::MAX;

pub struct BlacklistResolver<R: Resolver> {
    names: RwLock<HashSet<String>>,
    child: R,
}

impl<R: Resolver> BlacklistResolver<R> {
    #[must_use]
    pub fn new(names: HashSet<String>, child: R) -> Self {
        Self {
            names: RwLock::new(names),
            child,
        }
    }

    /// Atomically swap the blacklisted name set. The periodic fetch-and-swap
    /// described in spec.md §9 would call this on a timer; no such timer
    /// is wired up here.
    pub fn replace_names(&self, names: HashSet<String>) {
        *self.names.write().unwrap() = names;
    }
}

impl<R: Resolver> Resolver for BlacklistResolver<R> {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        let hit = self.names.read().unwrap().contains(&msg.question.name);
        if !hit {
            return self.child.resolve(permit, msg);
        }
        let mut reply = msg;
        reply.answer = vec![Record {
            name: reply.question.name.clone(),
            rtype: QType::A,
            rclass: QClass::IN,
            ttl: MAX_TTL,
            rdata: RData::A(Ipv4Addr::new(127, 0, 0, 1)),
        }];
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Question;

    struct AlwaysFails;
    impl Resolver for AlwaysFails {
        fn resolve(&self, _permit: &Permit, _msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
            Err(ResolveError::NotFound)
        }
    }

    fn msg(name: &str) -> InternalMessage {
        InternalMessage::new(Question {
            name: name.to_string(),
            qtype: QType::A,
            qclass: QClass::IN,
        })
    }

    #[test]
    fn blacklisted_name_returns_sinkhole_record() {
        let mut names = HashSet::new();
        names.insert("www.yahoo.com".to_string());
        let resolver = BlacklistResolver::new(names, AlwaysFails);
        let permit = Permit::new();
        let out = resolver.resolve(&permit, msg("www.yahoo.com")).unwrap();
        assert_eq!(out.answer.len(), 1);
        assert!(matches!(out.answer[0].rdata, RData::A(ip) if ip == Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(out.answer[0].ttl, MAX_TTL);
    }

    #[test]
    fn clean_name_passes_through_to_child() {
        let resolver = BlacklistResolver::new(HashSet::new(), AlwaysFails);
        let permit = Permit::new();
        let err = resolver.resolve(&permit, msg("example.com")).unwrap_err();
        assert!(err.is_no_report());
    }
}

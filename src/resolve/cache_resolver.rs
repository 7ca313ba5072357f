//! Cache resolver (spec.md §4.K).
//!
//! Grounded on `CacheResolver.Resolve` in `cache.go` (`original_source`):
//! on hit-unexpired splice the cached Answer into the request; on miss or
//! expired, delegate and memoize.

use permit::Permit;

use crate::cache::{Cache, Lookup};
use crate::error::ResolveError;
use crate::internal::InternalMessage;
use crate::resolve::Resolver;

pub struct CacheResolver<R: Resolver> {
    cache: Cache,
    child: R,
}

impl<R: Resolver> CacheResolver<R> {
    #[must_use]
    pub fn new(child: R) -> Self {
        Self {
            cache: Cache::new(),
            child,
        }
    }
}

impl<R: Resolver> Resolver for CacheResolver<R> {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        let key = msg.key();
        match self.cache.get(&key) {
            Lookup::Fresh(records) => {
                let mut reply = msg;
                reply.answer = records;
                Ok(reply)
            }
            Lookup::Stale(_) | Lookup::Absent => {
                let reply = self.child.resolve(permit, msg)?;
                self.cache.put(key, reply.answer.clone());
                Ok(reply)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{QClass, QType, RData, Question, Record};
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingChild {
        calls: AtomicU32,
    }

    impl Resolver for CountingChild {
        fn resolve(&self, _permit: &Permit, mut msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            msg.answer = vec![Record {
                name: msg.question.name.clone(),
                rtype: QType::A,
                rclass: QClass::IN,
                ttl: 30,
                rdata: RData::A(Ipv4Addr::new(1, 1, 1, 1)),
            }];
            Ok(msg)
        }
    }

    #[test]
    fn second_lookup_within_ttl_hits_cache() {
        let child = CountingChild { calls: AtomicU32::new(0) };
        let resolver = CacheResolver::new(child);
        let permit = Permit::new();
        let q = Question { name: "example.com".to_string(), qtype: QType::A, qclass: QClass::IN };

        resolver.resolve(&permit, InternalMessage::new(q.clone())).unwrap();
        resolver.resolve(&permit, InternalMessage::new(q)).unwrap();
        assert_eq!(resolver.child.calls.load(Ordering::SeqCst), 1);
    }
}

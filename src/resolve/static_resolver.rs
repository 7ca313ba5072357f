//! Static override resolver (spec.md §4.I).
//!
//! Grounded on `static.go` in `original_source`: a compile-time
//! `Question -> records` map, returning the no-report sentinel on miss so
//! the chain resolver passes through silently.

use std::collections::HashMap;

use permit::Permit;

use crate::error::ResolveError;
use crate::internal::{InternalMessage, QuestionKey};
use crate::resolve::Resolver;
use crate::wire::Record;

/// An in-memory, fixed question-to-records override table.
pub struct StaticResolver {
    overrides: HashMap<QuestionKey, Vec<Record>>,
}

impl StaticResolver {
    #[must_use]
    pub fn new(overrides: HashMap<QuestionKey, Vec<Record>>) -> Self {
        Self { overrides }
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, _permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        match self.overrides.get(&msg.key()) {
            Some(records) => {
                let mut reply = msg;
                reply.answer = records.clone();
                Ok(reply)
            }
            None => Err(ResolveError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{QClass, QType, RData};
    use std::net::Ipv4Addr;

    fn question_key(name: &str) -> QuestionKey {
        QuestionKey {
            name: name.to_string(),
            qtype: QType::A.num(),
            qclass: QClass::IN.num(),
        }
    }

    fn msg(name: &str) -> InternalMessage {
        InternalMessage::new(crate::wire::Question {
            name: name.to_string(),
            qtype: QType::A,
            qclass: QClass::IN,
        })
    }

    #[test]
    fn hit_returns_cloned_records() {
        let mut overrides = HashMap::new();
        overrides.insert(
            question_key("ya.ru"),
            vec![Record {
                name: "ya.ru".to_string(),
                rtype: QType::A,
                rclass: QClass::IN,
                ttl: u32::MAX,
                rdata: RData::A(Ipv4Addr::new(5, 255, 255, 70)),
            }],
        );
        let resolver = StaticResolver::new(overrides);
        let permit = Permit::new();
        let out = resolver.resolve(&permit, msg("ya.ru")).unwrap();
        assert_eq!(out.answer.len(), 1);
    }

    #[test]
    fn miss_is_no_report() {
        let resolver = StaticResolver::new(HashMap::new());
        let permit = Permit::new();
        let err = resolver.resolve(&permit, msg("example.com")).unwrap_err();
        assert!(err.is_no_report());
    }
}

//! Iterative resolver (spec.md §4.H): referral/glue/CNAME walk from a
//! random root hint.
//!
//! Grounded on `cycle()` in `lookup.go` (`original_source`) — the
//! referral/glue/CNAME state machine is a direct port of that function's
//! branching, expressed as recursive calls the way the Go original itself
//! recurses for CNAME chasing and NS-name resolution.

use permit::Permit;

use crate::error::ResolveError;
use crate::forwarder::StubForwarder;
use crate::internal::InternalMessage;
use crate::resolve::Resolver;
use crate::roots::RootHints;
use crate::wire::{Header, Message, OpCode, QClass, QType, RCode, RData};

pub struct IterativeResolver {
    roots: RootHints,
    stub: StubForwarder,
}

impl Default for IterativeResolver {
    fn default() -> Self {
        Self::new(RootHints::default(), StubForwarder::default())
    }
}

impl IterativeResolver {
    #[must_use]
    pub fn new(roots: RootHints, stub: StubForwarder) -> Self {
        Self { roots, stub }
    }

    fn build_query(name: &str, qtype: QType) -> Message {
        Message {
            header: Header {
                id: 1,
                is_response: false,
                op_code: OpCode::Query,
                authoritative_answer: false,
                truncated: false,
                recursion_desired: false,
                recursion_available: false,
                response_code: RCode::NoError,
                question_count: 1,
                answer_count: 0,
                name_server_count: 0,
                additional_count: 0,
            },
            questions: vec![crate::wire::Question {
                name: name.to_string(),
                qtype,
                qclass: QClass::IN,
            }],
            answers: vec![],
            name_servers: vec![],
            additional: vec![],
        }
    }

    /// Walk the hierarchy for `(name, qtype)` starting at `next_server`,
    /// returning the wire response once a usable answer (or a terminal
    /// NXDOMAIN/empty response) is reached.
    fn cycle(&self, permit: &Permit, name: &str, qtype: QType, mut next_server: String) -> Result<Message, ResolveError> {
        loop {
            if permit.is_revoked() {
                return Err(ResolveError::DeadlineExceeded);
            }

            let query = Self::build_query(name, qtype);
            let response = self.stub.exchange(permit, &next_server, &query)?;

            let usable = !response.answers.is_empty() && response.header.response_code != RCode::ServerFailure;
            if usable {
                if response.answers.iter().any(|r| r.rtype == qtype) {
                    return Ok(response);
                }
                if qtype != QType::CNAME {
                    if let Some(cname) = response.answers.iter().find(|r| r.rtype == QType::CNAME) {
                        if let RData::Name(target) = &cname.rdata {
                            let target = target.clone();
                            let root = self.roots.random_pick().to_string();
                            let mut recursive = self.cycle(permit, &target, QType::A, root)?;
                            let mut combined = response;
                            combined.answers.append(&mut recursive.answers);
                            return Ok(combined);
                        }
                    }
                }
                return Ok(response);
            }

            if let Some(glue) = response.additional.iter().find_map(|r| match (r.rtype, &r.rdata) {
                (QType::A, RData::A(ip)) => Some(*ip),
                _ => None,
            }) {
                next_server = glue.to_string();
                continue;
            }

            let ns_name = response
                .name_servers
                .iter()
                .find(|r| r.rtype == QType::NS)
                .and_then(|r| match &r.rdata {
                    RData::Name(n) => Some(n.clone()),
                    _ => None,
                });

            if let Some(ns_name) = ns_name {
                let root = self.roots.random_pick().to_string();
                let ns_response = self.cycle(permit, &ns_name, QType::A, root)?;
                if let Some(ip) = ns_response.answers.iter().find_map(|r| match &r.rdata {
                    RData::A(ip) => Some(*ip),
                    _ => None,
                }) {
                    next_server = ip.to_string();
                    continue;
                }
                return Ok(response);
            }

            return Ok(response);
        }
    }
}

impl Resolver for IterativeResolver {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        let start = self.roots.random_pick().to_string();
        let response = self.cycle(permit, &msg.question.name, msg.question.qtype, start)?;
        Ok(InternalMessage {
            question: msg.question,
            response_code: response.header.response_code,
            answer: response.answers,
            authority: response.name_servers,
            additional: response.additional,
        })
    }
}

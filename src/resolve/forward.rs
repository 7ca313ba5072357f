//! Forward-mode resolver: wraps the multiplexed forwarder as a pipeline
//! stage (supplements spec.md's distilled design — see SPEC_FULL.md §P).
//!
//! `AdvancedForwardUDPResolver` in `original_source` already implements the
//! `Resolver` interface directly; this module gives it the same shape so
//! `mode = "forward"` can be selected instead of the iterative resolver.

use permit::Permit;

use crate::error::ResolveError;
use crate::forwarder::MultiplexedForwarder;
use crate::internal::InternalMessage;
use crate::resolve::Resolver;
use crate::wire::{Header, Message, OpCode, RCode};

pub struct ForwardResolver {
    forwarder: MultiplexedForwarder,
}

impl ForwardResolver {
    #[must_use]
    pub fn new(forwarder: MultiplexedForwarder) -> Self {
        Self { forwarder }
    }
}

impl Resolver for ForwardResolver {
    fn resolve(&self, permit: &Permit, msg: InternalMessage) -> Result<InternalMessage, ResolveError> {
        let query = Message {
            header: Header {
                id: 0, // overwritten by the forwarder's sender thread with the reserved ID.
                is_response: false,
                op_code: OpCode::Query,
                authoritative_answer: false,
                truncated: false,
                recursion_desired: true,
                recursion_available: false,
                response_code: RCode::NoError,
                question_count: 1,
                answer_count: 0,
                name_server_count: 0,
                additional_count: 0,
            },
            questions: vec![msg.question.clone()],
            answers: vec![],
            name_servers: vec![],
            additional: vec![],
        };
        let reply = self.forwarder.resolve(permit, query)?;
        Ok(InternalMessage {
            question: msg.question,
            response_code: reply.header.response_code,
            answer: reply.answers,
            authority: reply.name_servers,
            additional: reply.additional,
        })
    }
}

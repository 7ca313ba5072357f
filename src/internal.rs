//! The reduced internal message shape the resolver pipeline operates on
//! (spec.md §3): exactly one Question, plus the three record sections.
//! Header fields (ID, flags, counts) belong to the listener.
//!
//! Grounded on `internal.go` in `original_source` (`InternalMessage`,
//! `FromProtoMessage`/`ToProtoMessage`).

use crate::wire::{Header, Message, OpCode, Question, RCode, Record};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct QuestionKey {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl From<&Question> for QuestionKey {
    fn from(q: &Question) -> Self {
        Self {
            name: q.name.clone(),
            qtype: q.qtype.num(),
            qclass: q.qclass.num(),
        }
    }
}

/// The shape every resolver stage consumes and produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InternalMessage {
    pub question: Question,
    pub response_code: RCode,
    pub answer: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
}

impl InternalMessage {
    #[must_use]
    pub fn new(question: Question) -> Self {
        Self {
            question,
            response_code: RCode::NoError,
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Lift the single question out of a decoded wire message (spec.md §6).
    pub fn from_wire_query(msg: &Message) -> Result<Self, crate::error::CodecError> {
        Ok(Self::new(msg.single_question()?.clone()))
    }

    /// Re-lower into wire form, copying ID/flags from the original request
    /// per spec.md §6's listener contract.
    #[must_use]
    pub fn into_wire_response(self, request_id: u16, request_rd: bool) -> Message {
        Message {
            header: Header {
                id: request_id,
                is_response: true,
                op_code: OpCode::Query,
                authoritative_answer: false,
                truncated: false,
                recursion_desired: request_rd,
                recursion_available: true,
                response_code: self.response_code,
                question_count: 1,
                answer_count: self.answer.len() as u16,
                name_server_count: self.authority.len() as u16,
                additional_count: self.additional.len() as u16,
            },
            questions: vec![self.question],
            answers: self.answer,
            name_servers: self.authority,
            additional: self.additional,
        }
    }

    #[must_use]
    pub fn key(&self) -> QuestionKey {
        QuestionKey::from(&self.question)
    }
}

//! Full wire message — spec.md §3, §4.C.
//!
//! Grounded on `dns_message.rs` in the teacher (section layout, `answer_response`
//! / `error_response` helpers), completed against `pkg/proto/decode.go` /
//! `encode.go` (the teacher's `write` leaves RDATA encoding as `todo!()`
//! for anything but an empty question list; this version fully implements it).

use crate::error::CodecError;
use crate::wire::cursor::{ReadCursor, WriteCursor};
use crate::wire::header::Header;
use crate::wire::name::NameIndex;
use crate::wire::question::Question;
use crate::wire::record::Record;
use crate::wire::types::{OpCode, RCode};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub name_servers: Vec<Record>,
    pub additional: Vec<Record>,
}

impl Message {
    pub fn parse(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = ReadCursor::new(data);
        let header = Header::parse(&mut r)?;

        let mut questions = Vec::with_capacity(usize::from(header.question_count));
        for _ in 0..header.question_count {
            questions.push(Question::parse(&mut r)?);
        }
        let answers = parse_records(&mut r, header.answer_count)?;
        let name_servers = parse_records(&mut r, header.name_server_count)?;
        let additional = parse_records(&mut r, header.additional_count)?;

        Ok(Self {
            header,
            questions,
            answers,
            name_servers,
            additional,
        })
    }

    pub fn write(&self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let mut header = self.header;
        header.question_count = self.questions.len() as u16;
        header.answer_count = self.answers.len() as u16;
        header.name_server_count = self.name_servers.len() as u16;
        header.additional_count = self.additional.len() as u16;

        let mut w = WriteCursor::new(buf);
        header.write(&mut w)?;

        let mut index = NameIndex::new();
        for q in &self.questions {
            q.write(&mut w, &mut index)?;
        }
        for r in self.answers.iter().chain(&self.name_servers).chain(&self.additional) {
            r.write(&mut w, &mut index)?;
        }
        Ok(w.bytes_written())
    }

    /// The single question the resolver pipeline expects (spec.md §3).
    pub fn single_question(&self) -> Result<&Question, CodecError> {
        match self.questions.as_slice() {
            [] => Err(CodecError::NoQuestion),
            [q] => Ok(q),
            _ => Err(CodecError::MultipleQuestions),
        }
    }

    /// Build a reply header: copy ID from `self`, set QR=1, RA=1, echo RD.
    pub fn reply_header(&self, response_code: RCode) -> Header {
        Header {
            id: self.header.id,
            is_response: true,
            op_code: OpCode::Query,
            authoritative_answer: false,
            truncated: false,
            recursion_desired: self.header.recursion_desired,
            recursion_available: true,
            response_code,
            question_count: 0,
            answer_count: 0,
            name_server_count: 0,
            additional_count: 0,
        }
    }

    /// Build a server-failure response carrying only the original question.
    pub fn error_response(&self, response_code: RCode) -> Self {
        Self {
            header: self.reply_header(response_code),
            questions: self.questions.clone(),
            answers: Vec::new(),
            name_servers: Vec::new(),
            additional: Vec::new(),
        }
    }
}

fn parse_records(r: &mut ReadCursor, count: u16) -> Result<Vec<Record>, CodecError> {
    let mut out = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        out.push(Record::parse(r)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::record::RData;
    use crate::wire::types::{QClass, QType};
    use std::net::Ipv4Addr;

    fn query_header(id: u16) -> Header {
        Header {
            id,
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
        }
    }

    #[test]
    fn round_trips_a_query() {
        let msg = Message {
            header: query_header(5140),
            questions: vec![Question {
                name: "google.com".to_string(),
                qtype: QType::A,
                qclass: QClass::IN,
            }],
            answers: vec![],
            name_servers: vec![],
            additional: vec![],
        };
        let mut buf = [0u8; 512];
        let n = msg.write(&mut buf).unwrap();
        let decoded = Message::parse(&buf[..n]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn round_trips_six_answer_response() {
        let mut header = query_header(5140);
        header.is_response = true;
        header.recursion_available = true;
        let answers: Vec<Record> = (0..6)
            .map(|i| Record {
                name: "google.com".to_string(),
                rtype: QType::A,
                rclass: QClass::IN,
                ttl: 63,
                rdata: RData::A(Ipv4Addr::new(172, 217, 14, 200 + i)),
            })
            .collect();
        let msg = Message {
            header,
            questions: vec![Question {
                name: "google.com".to_string(),
                qtype: QType::A,
                qclass: QClass::IN,
            }],
            answers,
            name_servers: vec![],
            additional: vec![],
        };
        let mut buf = [0u8; 512];
        let n = msg.write(&mut buf).unwrap();
        let decoded = Message::parse(&buf[..n]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn single_question_rejects_multiple() {
        let mut msg = Message {
            header: query_header(1),
            questions: vec![
                Question { name: "a.com".to_string(), qtype: QType::A, qclass: QClass::IN },
                Question { name: "b.com".to_string(), qtype: QType::A, qclass: QClass::IN },
            ],
            answers: vec![],
            name_servers: vec![],
            additional: vec![],
        };
        assert!(matches!(
            msg.single_question(),
            Err(CodecError::MultipleQuestions)
        ));
        msg.questions.clear();
        assert!(matches!(msg.single_question(), Err(CodecError::NoQuestion)));
    }
}

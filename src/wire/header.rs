//! Message header bit-packing — spec.md §4.C, RFC 1035 §4.1.1.
//!
//! Grounded on `dns_message_header.rs` in the teacher (field layout and doc
//! comments), corrected against `pkg/proto/encode.go`'s `encodeHeader`:
//! the teacher combines flag bits with `&`, which cannot ever set a bit;
//! this is a latent bug in the reference copy, not something to repeat.

use crate::error::BufferError;
use crate::wire::cursor::{ReadCursor, WriteCursor};
use crate::wire::types::{OpCode, RCode};

/// The 12-byte fixed header shared by every DNS message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    pub is_response: bool,
    pub op_code: OpCode,
    pub authoritative_answer: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: RCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub name_server_count: u16,
    pub additional_count: u16,
}

impl Header {
    pub fn parse(r: &mut ReadCursor) -> Result<Self, BufferError> {
        let id = r.take_u16()?;
        let flags_hi = r.take_u8()?;
        let flags_lo = r.take_u8()?;
        let question_count = r.take_u16()?;
        let answer_count = r.take_u16()?;
        let name_server_count = r.take_u16()?;
        let additional_count = r.take_u16()?;
        Ok(Self {
            id,
            is_response: flags_hi & 0x80 != 0,
            op_code: OpCode::new((flags_hi >> 3) & 0x0F),
            authoritative_answer: flags_hi & 0x04 != 0,
            truncated: flags_hi & 0x02 != 0,
            recursion_desired: flags_hi & 0x01 != 0,
            recursion_available: flags_lo & 0x80 != 0,
            // bits 4-6 of flags_lo are Z, always zero on emit and ignored on parse.
            response_code: RCode::new(flags_lo & 0x0F),
            question_count,
            answer_count,
            name_server_count,
            additional_count,
        })
    }

    pub fn write(&self, w: &mut WriteCursor) -> Result<(), BufferError> {
        w.put_u16(self.id)?;
        let flags_hi = ((self.is_response as u8) << 7)
            | (self.op_code.num() << 3)
            | ((self.authoritative_answer as u8) << 2)
            | ((self.truncated as u8) << 1)
            | (self.recursion_desired as u8);
        let flags_lo = ((self.recursion_available as u8) << 7) | self.response_code.num();
        w.put_u8(flags_hi)?;
        w.put_u8(flags_lo)?;
        w.put_u16(self.question_count)?;
        w.put_u16(self.answer_count)?;
        w.put_u16(self.name_server_count)?;
        w.put_u16(self.additional_count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_all_flags() {
        let header = Header {
            id: 0x1234,
            is_response: true,
            op_code: OpCode::Status,
            authoritative_answer: true,
            truncated: true,
            recursion_desired: true,
            recursion_available: true,
            response_code: RCode::NameError,
            question_count: 1,
            answer_count: 6,
            name_server_count: 13,
            additional_count: 15,
        };
        let mut buf = [0u8; 12];
        {
            let mut w = WriteCursor::new(&mut buf);
            header.write(&mut w).unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        assert_eq!(Header::parse(&mut r).unwrap(), header);
    }

    #[test]
    fn zero_flags_round_trip() {
        let header = Header {
            id: 5140,
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
        };
        let mut buf = [0u8; 12];
        let mut w = WriteCursor::new(&mut buf);
        header.write(&mut w).unwrap();
        assert_eq!(buf, [0x14, 0x14, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
    }
}

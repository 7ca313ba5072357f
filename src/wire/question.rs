//! Question section — spec.md §3, §4.C.
//!
//! Grounded on `dns_question.rs` in the teacher (name + type + class shape),
//! generalized from its A/AAAA/CNAME-only class check to the full QCLASS
//! table and to use the compression-aware name codec.

use crate::error::NameError;
use crate::wire::cursor::{ReadCursor, WriteCursor};
use crate::wire::name::{self, NameIndex};
use crate::wire::types::{QClass, QType};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub name: String,
    pub qtype: QType,
    pub qclass: QClass,
}

impl Question {
    pub fn parse(r: &mut ReadCursor) -> Result<Self, NameError> {
        let name = name::decode(r)?;
        let qtype = QType::new(r.take_u16().map_err(NameError::from)?);
        let qclass = QClass::new(r.take_u16().map_err(NameError::from)?);
        Ok(Self { name, qtype, qclass })
    }

    pub fn write(&self, w: &mut WriteCursor, index: &mut NameIndex) -> Result<(), NameError> {
        index.encode(w, &self.name)?;
        w.put_u16(self.qtype.num())?;
        w.put_u16(self.qclass.num())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let q = Question {
            name: "google.com".to_string(),
            qtype: QType::A,
            qclass: QClass::IN,
        };
        let mut buf = [0u8; 32];
        let mut index = NameIndex::new();
        {
            let mut w = WriteCursor::new(&mut buf);
            q.write(&mut w, &mut index).unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        assert_eq!(Question::parse(&mut r).unwrap(), q);
    }
}

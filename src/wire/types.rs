//! TYPE/CLASS/RCODE/OPCODE enumerations (spec.md §3).
//!
//! Grounded on the teacher's `dns_type.rs`/`dns_op_code.rs`/
//! `dns_response_code.rs` (new/num round-tripping enums), extended with
//! the full QTYPE/QCLASS table from `pkg/proto/proto.go` in
//! `original_source` — the teacher only modeled A/AAAA/CNAME.

/// QTYPE/TYPE values recognized by name (spec.md §3).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QType {
    A,
    NS,
    MD,
    MF,
    CNAME,
    SOA,
    MB,
    MG,
    MR,
    NULL,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    AAAA,
    AXFR,
    MAILB,
    MAILA,
    ALL,
    Unknown(u16),
}

impl QType {
    #[must_use]
    pub fn new(value: u16) -> Self {
        match value {
            1 => QType::A,
            2 => QType::NS,
            3 => QType::MD,
            4 => QType::MF,
            5 => QType::CNAME,
            6 => QType::SOA,
            7 => QType::MB,
            8 => QType::MG,
            9 => QType::MR,
            10 => QType::NULL,
            11 => QType::WKS,
            12 => QType::PTR,
            13 => QType::HINFO,
            14 => QType::MINFO,
            15 => QType::MX,
            16 => QType::TXT,
            28 => QType::AAAA,
            252 => QType::AXFR,
            253 => QType::MAILB,
            254 => QType::MAILA,
            255 => QType::ALL,
            other => QType::Unknown(other),
        }
    }

    #[must_use]
    pub fn num(self) -> u16 {
        match self {
            QType::A => 1,
            QType::NS => 2,
            QType::MD => 3,
            QType::MF => 4,
            QType::CNAME => 5,
            QType::SOA => 6,
            QType::MB => 7,
            QType::MG => 8,
            QType::MR => 9,
            QType::NULL => 10,
            QType::WKS => 11,
            QType::PTR => 12,
            QType::HINFO => 13,
            QType::MINFO => 14,
            QType::MX => 15,
            QType::TXT => 16,
            QType::AAAA => 28,
            QType::AXFR => 252,
            QType::MAILB => 253,
            QType::MAILA => 254,
            QType::ALL => 255,
            QType::Unknown(other) => other,
        }
    }
}

/// QCLASS values (spec.md §3).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QClass {
    IN,
    CS,
    CH,
    HS,
    ANY,
    Unknown(u16),
}

impl QClass {
    #[must_use]
    pub fn new(value: u16) -> Self {
        match value {
            1 => QClass::IN,
            2 => QClass::CS,
            3 => QClass::CH,
            4 => QClass::HS,
            255 => QClass::ANY,
            other => QClass::Unknown(other),
        }
    }

    #[must_use]
    pub fn num(self) -> u16 {
        match self {
            QClass::IN => 1,
            QClass::CS => 2,
            QClass::CH => 3,
            QClass::HS => 4,
            QClass::ANY => 255,
            QClass::Unknown(other) => other,
        }
    }
}

/// RCODE values (spec.md §3).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(u8),
}

impl RCode {
    #[must_use]
    pub fn new(value: u8) -> Self {
        match value & 0x0F {
            0 => RCode::NoError,
            1 => RCode::FormatError,
            2 => RCode::ServerFailure,
            3 => RCode::NameError,
            4 => RCode::NotImplemented,
            5 => RCode::Refused,
            other => RCode::Reserved(other),
        }
    }

    #[must_use]
    pub fn num(self) -> u8 {
        match self {
            RCode::NoError => 0,
            RCode::FormatError => 1,
            RCode::ServerFailure => 2,
            RCode::NameError => 3,
            RCode::NotImplemented => 4,
            RCode::Refused => 5,
            RCode::Reserved(other) => other,
        }
    }
}

/// OPCODE values (spec.md §3).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OpCode {
    Query,
    InverseQuery,
    Status,
    Reserved(u8),
}

impl OpCode {
    #[must_use]
    pub fn new(value: u8) -> Self {
        match value & 0x0F {
            0 => OpCode::Query,
            1 => OpCode::InverseQuery,
            2 => OpCode::Status,
            other => OpCode::Reserved(other),
        }
    }

    #[must_use]
    pub fn num(self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::InverseQuery => 1,
            OpCode::Status => 2,
            OpCode::Reserved(other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qtype_round_trips() {
        for n in [1u16, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 28, 252, 253, 254, 255]
        {
            assert_eq!(QType::new(n).num(), n);
        }
        assert_eq!(QType::new(9999).num(), 9999);
    }

    #[test]
    fn rcode_masks_to_four_bits() {
        assert_eq!(RCode::new(0xF3).num(), 0x3);
    }
}

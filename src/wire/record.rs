//! Resource records and type-specific RDATA handling — spec.md §4.C.
//!
//! Grounded on `dns_record.rs` in the teacher (the record-as-enum shape,
//! custom `Debug`), extended from its A/AAAA/CNAME-only coverage to the
//! full RDATA table in `pkg/proto/decode.go`/`encode.go` (`decodeResourceData`
//! / `encodeResourceData`), including the HINFO character-string pair and
//! the opaque-copy fallback for SOA/NULL/WKS/MINFO/MX/TXT/others.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::NameError;
use crate::wire::cursor::{ReadCursor, WriteCursor};
use crate::wire::name::{self, NameIndex};
use crate::wire::types::{QClass, QType};

/// A decoded resource record. RDATA is interpreted according to `rtype`
/// where the type is understood; everything else is carried as opaque
/// bytes, matching the original source's default-case handling.
#[derive(Clone, Eq, PartialEq)]
pub struct Record {
    pub name: String,
    pub rtype: QType,
    pub rclass: QClass,
    pub ttl: u32,
    pub rdata: RData,
}

#[derive(Clone, Eq, PartialEq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Name(String),
    HInfo { cpu: String, os: String },
    Opaque(Vec<u8>),
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("rtype", &self.rtype)
            .field("rclass", &self.rclass)
            .field("ttl", &self.ttl)
            .field("rdata", &self.rdata)
            .finish()
    }
}

impl fmt::Debug for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(ip) => write!(f, "A({ip})"),
            RData::Aaaa(ip) => write!(f, "AAAA({ip})"),
            RData::Name(n) => write!(f, "Name({n})"),
            RData::HInfo { cpu, os } => write!(f, "HInfo({cpu}|{os})"),
            RData::Opaque(bytes) => write!(f, "Opaque({} bytes)", bytes.len()),
        }
    }
}

fn is_compressed_name_type(t: QType) -> bool {
    matches!(
        t,
        QType::NS | QType::CNAME | QType::PTR | QType::MD | QType::MF | QType::MB | QType::MG | QType::MR
    )
}

impl Record {
    pub fn parse(r: &mut ReadCursor) -> Result<Self, NameError> {
        let name = name::decode(r)?;
        let rtype = QType::new(r.take_u16().map_err(NameError::from)?);
        let rclass = QClass::new(r.take_u16().map_err(NameError::from)?);
        let ttl = r.take_u32().map_err(NameError::from)?;
        let rdlength = r.take_u16().map_err(NameError::from)?;
        let rdata_start = r.pos();

        let rdata = match rtype {
            QType::A => {
                let bytes = r.take_exact(4).map_err(NameError::from)?;
                RData::A(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]))
            }
            QType::AAAA => {
                let bytes = r.take_exact(16).map_err(NameError::from)?;
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                RData::Aaaa(Ipv6Addr::from(octets))
            }
            t if is_compressed_name_type(t) => {
                let decoded = name::decode(r)?;
                r.seek(rdata_start + usize::from(rdlength));
                RData::Name(decoded)
            }
            QType::HINFO => {
                let cpu = read_character_string(r)?;
                let os = read_character_string(r)?;
                RData::HInfo { cpu, os }
            }
            _ => {
                let bytes = r.take_exact(usize::from(rdlength)).map_err(NameError::from)?;
                RData::Opaque(bytes.to_vec())
            }
        };

        Ok(Self { name, rtype, rclass, ttl, rdata })
    }

    pub fn write(&self, w: &mut WriteCursor, index: &mut NameIndex) -> Result<(), NameError> {
        index.encode(w, &self.name)?;
        w.put_u16(self.rtype.num())?;
        w.put_u16(self.rclass.num())?;
        w.put_u32(self.ttl)?;

        let rdlength_pos = w.pos();
        w.put_u16(0)?;
        let rdata_start = w.pos();

        match &self.rdata {
            RData::A(ip) => w.put_bytes(&ip.octets())?,
            RData::Aaaa(ip) => w.put_bytes(&ip.octets())?,
            RData::Name(n) => index.encode(w, n)?,
            RData::HInfo { cpu, os } => {
                write_character_string(w, cpu)?;
                write_character_string(w, os)?;
            }
            RData::Opaque(bytes) => w.put_bytes(bytes)?,
        }

        let rdlength = w.pos() - rdata_start;
        w.patch_u16(rdlength_pos, rdlength as u16)?;
        Ok(())
    }
}

fn read_character_string(r: &mut ReadCursor) -> Result<String, NameError> {
    let len = r.take_u8().map_err(NameError::from)?;
    let bytes = r.take_exact(usize::from(len)).map_err(NameError::from)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn write_character_string(w: &mut WriteCursor, s: &str) -> Result<(), NameError> {
    w.put_u8(s.len() as u8)?;
    w.put_bytes(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_record_round_trips() {
        let rec = Record {
            name: "google.com".to_string(),
            rtype: QType::A,
            rclass: QClass::IN,
            ttl: 63,
            rdata: RData::A(Ipv4Addr::new(172, 217, 14, 206)),
        };
        let mut buf = [0u8; 64];
        let mut index = NameIndex::new();
        {
            let mut w = WriteCursor::new(&mut buf);
            rec.write(&mut w, &mut index).unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        assert_eq!(Record::parse(&mut r).unwrap(), rec);
    }

    #[test]
    fn hinfo_joins_on_pipe_in_debug() {
        let rdata = RData::HInfo {
            cpu: "INTEL".to_string(),
            os: "LINUX".to_string(),
        };
        assert_eq!(format!("{rdata:?}"), "HInfo(INTEL|LINUX)");
    }

    #[test]
    fn cname_rdata_uses_compressed_name() {
        let rec = Record {
            name: "www.example.com".to_string(),
            rtype: QType::CNAME,
            rclass: QClass::IN,
            ttl: 300,
            rdata: RData::Name("example.com".to_string()),
        };
        let mut buf = [0u8; 64];
        let mut index = NameIndex::new();
        {
            let mut w = WriteCursor::new(&mut buf);
            rec.write(&mut w, &mut index).unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        assert_eq!(Record::parse(&mut r).unwrap(), rec);
    }

    #[test]
    fn opaque_fallback_preserves_bytes() {
        let rec = Record {
            name: "example.com".to_string(),
            rtype: QType::TXT,
            rclass: QClass::IN,
            ttl: 10,
            rdata: RData::Opaque(vec![5, b'h', b'e', b'l', b'l', b'o']),
        };
        let mut buf = [0u8; 64];
        let mut index = NameIndex::new();
        {
            let mut w = WriteCursor::new(&mut buf);
            rec.write(&mut w, &mut index).unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        assert_eq!(Record::parse(&mut r).unwrap(), rec);
    }
}

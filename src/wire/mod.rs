//! DNS wire codec (spec.md §4.A–§4.C): byte cursor, name compression, and
//! message encode/decode.

pub mod cursor;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod types;

pub use cursor::{ReadCursor, WriteCursor};
pub use header::Header;
pub use message::Message;
pub use question::Question;
pub use record::{RData, Record};
pub use types::{OpCode, QClass, QType, RCode};

//! Compression pointer table (encode) and jump-limited pointer follower
//! (decode) — spec.md §4.B.
//!
//! Grounded on `pkg/proto/compression.go` in `original_source`: the
//! longest-suffix-match index on encode, and the "fix the return position
//! at the first pointer" rule on decode. The teacher's `dns_name.rs` only
//! ever reads/writes flat, uncompressed labels (no pointer support at all),
//! so the pointer machinery here has no teacher counterpart to adapt — it
//! is new code written in the teacher's validation-and-bounds-check style.

use std::collections::HashMap;

use crate::error::NameError;
use crate::wire::cursor::{ReadCursor, WriteCursor};

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;
const MAX_JUMPS: u32 = 5;
const POINTER_FLAG: u8 = 0xC0;

/// Maps a dotted name (no trailing dot) to the offset it was first written
/// at, so later names can back-reference the longest known suffix.
#[derive(Default)]
pub struct NameIndex {
    offsets: HashMap<String, u16>,
}

impl NameIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `name` at the cursor's current position, recording any new
    /// suffixes in the index for later back-references.
    pub fn encode(&mut self, w: &mut WriteCursor, name: &str) -> Result<(), NameError> {
        let labels = split_labels(name)?;
        let mut suffix_starts = Vec::with_capacity(labels.len());

        for start in 0..labels.len() {
            let suffix = labels[start..].join(".");
            if let Some(&offset) = self.offsets.get(&suffix) {
                for &label_start in &suffix_starts {
                    self.record_if_fits(&labels[label_start..], w.pos())?;
                }
                write_labels(w, &labels[..start])?;
                w.put_u16(u16::from(POINTER_FLAG) << 8 | offset)
                    .map_err(NameError::from)?;
                return Ok(());
            }
            suffix_starts.push(start);
        }

        for &label_start in &suffix_starts {
            self.record_if_fits(&labels[label_start..], w.pos())?;
        }
        write_labels(w, &labels)?;
        w.put_u8(0).map_err(NameError::from)?;
        Ok(())
    }

    fn record_if_fits(&mut self, labels: &[&str], pos: usize) -> Result<(), NameError> {
        if pos <= 0x3FFF {
            self.offsets
                .entry(labels.join("."))
                .or_insert(pos as u16);
        }
        Ok(())
    }
}

fn split_labels(name: &str) -> Result<Vec<&str>, NameError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let labels: Vec<&str> = trimmed.split('.').collect();
    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(NameError::LabelTooLong((*label).to_string()));
        }
    }
    let wire_len: usize = labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1;
    if wire_len > MAX_NAME_LEN {
        return Err(NameError::NameTooLong);
    }
    Ok(labels)
}

fn write_labels(w: &mut WriteCursor, labels: &[&str]) -> Result<(), NameError> {
    for label in labels {
        w.put_u8(label.len() as u8).map_err(NameError::from)?;
        w.put_bytes(label.as_bytes()).map_err(NameError::from)?;
    }
    Ok(())
}

/// Decode a name starting at the cursor's current position, following
/// compression pointers as needed. Leaves the cursor positioned just past
/// the first pointer (or past the terminal zero byte, if there was none).
pub fn decode(r: &mut ReadCursor) -> Result<String, NameError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = r.pos();
    let mut jumps = 0u32;
    let mut return_pos: Option<usize> = None;

    loop {
        let len = r.index(pos)?;
        if len & POINTER_FLAG == POINTER_FLAG {
            if jumps >= MAX_JUMPS {
                return Err(NameError::JumpLimit);
            }
            jumps += 1;
            let next = r.index(pos + 1)?;
            if return_pos.is_none() {
                return_pos = Some(pos + 2);
            }
            pos = (usize::from(len & !POINTER_FLAG) << 8) | usize::from(next);
            continue;
        }
        if len == 0 {
            pos += 1;
            break;
        }
        let label_len = usize::from(len);
        let bytes = r.take_range(pos + 1, label_len)?;
        let label = std::str::from_utf8(bytes).map_err(|_| NameError::InvalidLabel)?;
        labels.push(label.to_string());
        pos += 1 + label_len;
    }

    r.seek(return_pos.unwrap_or(pos));
    Ok(labels.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips_simple_name() {
        let mut buf = [0u8; 64];
        let mut idx = NameIndex::new();
        {
            let mut w = WriteCursor::new(&mut buf);
            idx.encode(&mut w, "google.com").unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        assert_eq!(decode(&mut r).unwrap(), "google.com");
    }

    #[test]
    fn shares_suffixes_across_names() {
        let mut buf = [0u8; 128];
        let mut idx = NameIndex::new();
        let (p1, p2, p3);
        {
            let mut w = WriteCursor::new(&mut buf);
            p1 = w.pos();
            idx.encode(&mut w, "F.ISI.ARPA").unwrap();
            p2 = w.pos();
            idx.encode(&mut w, "FOO.BAR.F.ISI.ARPA").unwrap();
            p3 = w.pos();
            idx.encode(&mut w, "BAR.F.ISI.ARPA").unwrap();
        }
        let mut r = ReadCursor::new(&buf);
        r.seek(p1);
        assert_eq!(decode(&mut r).unwrap(), "F.ISI.ARPA");
        r.seek(p2);
        assert_eq!(decode(&mut r).unwrap(), "FOO.BAR.F.ISI.ARPA");
        r.seek(p3);
        assert_eq!(decode(&mut r).unwrap(), "BAR.F.ISI.ARPA");
    }

    #[test]
    fn cyclic_pointer_hits_jump_limit() {
        // offset 0 points to itself.
        let buf = [0xC0u8, 0x00, 0, 0];
        let mut r = ReadCursor::new(&buf);
        let err = decode(&mut r).unwrap_err();
        assert!(matches!(err, NameError::JumpLimit));
    }

    #[test]
    fn rejects_oversized_label() {
        let mut buf = [0u8; 128];
        let mut w = WriteCursor::new(&mut buf);
        let long = "a".repeat(64);
        let mut idx = NameIndex::new();
        assert!(matches!(
            idx.encode(&mut w, &long),
            Err(NameError::LabelTooLong(_))
        ));
    }
}

//! TTL-bounded answer cache (spec.md §4.K).
//!
//! Grounded on `cache.go` in `original_source` (`RecordsCache.Get` returning
//! `(list, expired, found)` rather than dropping stale entries silently) and
//! on the teacher's habit of wrapping shared maps in a single `Mutex`
//! (`dns_server.rs`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::internal::QuestionKey;
use crate::wire::Record;

struct Entry {
    records: Vec<Record>,
    expiry: Instant,
}

/// Outcome of a cache lookup: present-and-fresh, present-but-stale, or
/// simply absent. An expired entry is still reported, never silently
/// dropped on read (spec.md §3's cache-entry invariant).
pub enum Lookup {
    Fresh(Vec<Record>),
    Stale(Vec<Record>),
    Absent,
}

pub struct Cache {
    entries: Mutex<HashMap<QuestionKey, Entry>>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &QuestionKey) -> Lookup {
        let entries = self.entries.lock().unwrap();
        match entries.get(key) {
            None => Lookup::Absent,
            Some(entry) if entry.expiry > Instant::now() => Lookup::Fresh(entry.records.clone()),
            Some(entry) => Lookup::Stale(entry.records.clone()),
        }
    }

    /// Store `records` under `key`, expiring at `now + min(TTL)`. Empty
    /// lists are not cached.
    pub fn put(&self, key: QuestionKey, records: Vec<Record>) {
        if records.is_empty() {
            return;
        }
        let min_ttl = records.iter().map(|r| r.ttl).min().unwrap_or(0);
        let expiry = Instant::now() + Duration::from_secs(u64::from(min_ttl));
        self.entries.lock().unwrap().insert(key, Entry { records, expiry });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{QClass, QType, RData};
    use std::net::Ipv4Addr;

    fn key() -> QuestionKey {
        QuestionKey {
            name: "example.com".to_string(),
            qtype: QType::A.num(),
            qclass: QClass::IN.num(),
        }
    }

    fn record(ttl: u32) -> Record {
        Record {
            name: "example.com".to_string(),
            rtype: QType::A,
            rclass: QClass::IN,
            ttl,
            rdata: RData::A(Ipv4Addr::new(1, 2, 3, 4)),
        }
    }

    #[test]
    fn fresh_entry_is_returned_within_ttl() {
        let cache = Cache::new();
        cache.put(key(), vec![record(10)]);
        assert!(matches!(cache.get(&key()), Lookup::Fresh(_)));
    }

    #[test]
    fn expired_entry_is_reported_stale_not_dropped() {
        let cache = Cache::new();
        cache.put(key(), vec![record(0)]);
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(matches!(cache.get(&key()), Lookup::Stale(_)));
    }

    #[test]
    fn empty_record_list_is_not_cached() {
        let cache = Cache::new();
        cache.put(key(), vec![]);
        assert!(matches!(cache.get(&key()), Lookup::Absent));
    }
}

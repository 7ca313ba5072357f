//! Bounded transaction-ID allocator (spec.md §4.E).
//!
//! Grounded on `IndexAllocator` in `advanced_forward.go`: a monotonic
//! high-water mark plus a LIFO free-list, guarded by a single mutex (the
//! teacher's own style of wrapping small shared state behind `Mutex<T>`,
//! e.g. `dns_server.rs`'s use of `std::sync::Mutex` around server state).

use std::sync::Mutex;

use crate::error::ResolveError;

struct State {
    cur: u32,
    max: u32,
    free: Vec<u16>,
}

/// A pool of `{0..max-1}` 16-bit transaction IDs.
pub struct IdAllocator {
    state: Mutex<State>,
}

impl IdAllocator {
    #[must_use]
    pub fn new(max: u16) -> Self {
        Self {
            state: Mutex::new(State {
                cur: 0,
                max: u32::from(max),
                free: Vec::new(),
            }),
        }
    }

    /// Reserve an unused ID, preferring the most recently freed one.
    pub fn reserve(&self) -> Result<u16, ResolveError> {
        let mut state = self.state.lock().unwrap();
        if let Some(id) = state.free.pop() {
            return Ok(id);
        }
        if state.cur == state.max {
            return Err(ResolveError::PoolExhausted);
        }
        let id = state.cur as u16;
        state.cur += 1;
        Ok(id)
    }

    /// Return IDs to the free-list so the most recently freed is handed
    /// out next.
    pub fn free(&self, ids: &[u16]) {
        let mut state = self.state.lock().unwrap();
        state.free.extend_from_slice(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserves_sequential_ids_until_exhausted() {
        let pool = IdAllocator::new(3);
        assert_eq!(pool.reserve().unwrap(), 0);
        assert_eq!(pool.reserve().unwrap(), 1);
        assert_eq!(pool.reserve().unwrap(), 2);
        assert!(matches!(pool.reserve(), Err(ResolveError::PoolExhausted)));
    }

    #[test]
    fn freed_id_is_reused_lifo() {
        let pool = IdAllocator::new(3);
        pool.reserve().unwrap();
        pool.reserve().unwrap();
        pool.reserve().unwrap();
        pool.free(&[2]);
        assert_eq!(pool.reserve().unwrap(), 2);
    }

    #[test]
    fn freeing_in_order_hands_back_in_reverse() {
        let pool = IdAllocator::new(3);
        pool.reserve().unwrap();
        pool.reserve().unwrap();
        pool.reserve().unwrap();
        pool.free(&[2]);
        pool.free(&[0]);
        pool.free(&[1]);
        assert_eq!(pool.reserve().unwrap(), 1);
        assert_eq!(pool.reserve().unwrap(), 0);
        assert_eq!(pool.reserve().unwrap(), 2);
    }
}

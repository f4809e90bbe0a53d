//! Process-local runtime tier
//!
//! Derived key to last-known value. No expiration, no I/O. Each method takes
//! the lock once, so read-modify-write sequences (add, replace, counters) are
//! atomic within the process.

use parking_lot::Mutex;
use std::collections::HashMap;

use objcache_core::CacheValue;

#[derive(Debug, Default)]
pub(crate) struct RuntimeTier {
    entries: Mutex<HashMap<String, CacheValue>>,
}

impl RuntimeTier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store a value, overwriting any previous one
    pub(crate) fn put(&self, key: &str, value: CacheValue) {
        self.entries.lock().insert(key.to_string(), value);
    }

    /// Independent copy of the stored value
    pub(crate) fn get(&self, key: &str) -> Option<CacheValue> {
        self.entries.lock().get(key).cloned()
    }

    pub(crate) fn remove(&self, key: &str) -> Option<CacheValue> {
        self.entries.lock().remove(key)
    }

    pub(crate) fn clear(&self) {
        self.entries.lock().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Store only if nothing is held under `key`
    pub(crate) fn insert_if_absent(&self, key: &str, value: CacheValue) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(key) {
            return false;
        }
        entries.insert(key.to_string(), value);
        true
    }

    /// Store only if something is already held under `key`
    pub(crate) fn replace_if_present(&self, key: &str, value: CacheValue) -> bool {
        match self.entries.lock().get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to an integer entry, treating an absent entry as 0
    ///
    /// Returns `None` and leaves the entry alone when it holds a non-integer
    /// or the result would overflow.
    pub(crate) fn adjust(&self, key: &str, delta: i64) -> Option<i64> {
        let mut entries = self.entries.lock();
        let current = match entries.get(key) {
            None => 0,
            Some(CacheValue::Int(n)) => *n,
            Some(_) => return None,
        };
        let next = current.checked_add(delta)?;
        entries.insert(key.to_string(), CacheValue::Int(next));
        Some(next)
    }
}

//! In-memory key-value store using DashMap
//!
//! Implements the same primitive command set as a Redis server, including
//! per-record expiration and integer semantics for `incr_by`/`decr_by`.
//! Useful for single-process deployments, for embedding, and as the store in
//! tests.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use objcache_core::{CacheError, KeyValueStore, Result};

/// A stored record
#[derive(Debug, Clone)]
struct Record {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Record {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Command counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// `exists` and `get` calls
    pub reads: u64,
    /// `set`, `set_ex`, `incr_by` and `decr_by` calls
    pub writes: u64,
    /// `del` calls
    pub deletes: u64,
    /// `flush_all` calls
    pub flushes: u64,
}

impl StoreStats {
    /// Total commands received
    pub fn commands(&self) -> u64 {
        self.reads + self.writes + self.deletes + self.flushes
    }
}

/// In-memory store
///
/// Expired records are dropped lazily on access, or in bulk by
/// [`MemoryStore::purge_expired`].
/// Cloning creates a new handle to the SAME underlying store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<DashMap<String, Record>>,
    stats: Arc<RwLock<StoreStats>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.data.iter().filter(|r| !r.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired record and return how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.data.len();
        self.data.retain(|_, record| !record.is_expired(now));
        let removed = before.saturating_sub(self.data.len());
        if removed > 0 {
            tracing::trace!(target: "objcache", removed, "purged expired records");
        }
        removed
    }

    /// Snapshot of the command counters
    pub fn stats(&self) -> StoreStats {
        self.stats.read().clone()
    }

    fn live_value(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        let expired = match self.data.get(key) {
            Some(record) if !record.is_expired(now) => return Some(record.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.data.remove_if(key, |_, record| record.is_expired(now));
        }
        None
    }

    fn adjust(&self, key: &str, delta: i64) -> Result<i64> {
        let now = Instant::now();
        let mut record = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Record::new(b"0".to_vec(), None));
        if record.is_expired(now) {
            *record = Record::new(b"0".to_vec(), None);
        }

        let current = std::str::from_utf8(&record.value)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| CacheError::NotNumeric(key.to_string()))?;
        let next = current.checked_add(delta).ok_or_else(|| {
            CacheError::Backend("increment or decrement would overflow".to_string())
        })?;

        // expiration is kept, as INCRBY does
        record.value = next.to_string().into_bytes();
        Ok(next)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        self.stats.write().reads += 1;
        Ok(self.live_value(key).is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.stats.write().reads += 1;
        Ok(self.live_value(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.stats.write().writes += 1;
        self.data.insert(key.to_string(), Record::new(value, None));
        Ok(())
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()> {
        self.stats.write().writes += 1;
        let record = Record::new(value, Some(Duration::from_secs(ttl_secs)));
        self.data.insert(key.to_string(), record);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u64> {
        self.stats.write().deletes += 1;
        let now = Instant::now();
        match self.data.remove(key) {
            Some((_, record)) if !record.is_expired(now) => Ok(1),
            _ => Ok(0),
        }
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.stats.write().writes += 1;
        self.adjust(key, delta)
    }

    async fn decr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.stats.write().writes += 1;
        let delta = delta.checked_neg().ok_or_else(|| {
            CacheError::Backend("decrement would overflow".to_string())
        })?;
        self.adjust(key, delta)
    }

    async fn flush_all(&self) -> Result<()> {
        self.stats.write().flushes += 1;
        self.data.clear();
        Ok(())
    }
}

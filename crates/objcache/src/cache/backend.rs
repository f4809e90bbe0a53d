//! Backend tier adapter
//!
//! Builds the facade's operations out of the store's primitive commands and
//! absorbs every store or codec error into a failure result. Nothing here
//! touches the runtime tier; mirroring is the facade's job.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use objcache_core::{
    CacheMetrics, CacheOperation, CacheResult, CacheValue, KeyValueStore, Result, ValueCodec,
};
use tracing::warn;

pub(crate) struct BackendTier<St, C, M> {
    store: St,
    codec: C,
    metrics: Arc<M>,
    errors: AtomicU64,
}

impl<St, C, M> BackendTier<St, C, M>
where
    St: KeyValueStore,
    C: ValueCodec,
    M: CacheMetrics,
{
    pub(crate) fn new(store: St, codec: C, metrics: Arc<M>) -> Self {
        Self {
            store,
            codec,
            metrics,
            errors: AtomicU64::new(0),
        }
    }

    /// Errors absorbed so far
    pub(crate) fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    fn absorb<T>(&self, operation: CacheOperation, key: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_backend_error(operation);
                warn!(
                    target: "objcache",
                    operation = operation.as_str(),
                    key = %key,
                    error = %e,
                    "backend error"
                );
                None
            }
        }
    }

    /// Expiration 0 means the record never expires
    async fn write(&self, key: &str, value: &CacheValue, expiration: u64) -> Result<()> {
        let bytes = self.codec.encode(value)?;
        if expiration == 0 {
            self.store.set(key, bytes).await
        } else {
            self.store.set_ex(key, expiration, bytes).await
        }
    }

    /// Write only if no record exists
    ///
    /// The existence check and the write are two commands. Another process
    /// can write in between, in which case both adds report success and the
    /// later write wins.
    pub(crate) async fn add(&self, key: &str, value: &CacheValue, expiration: u64) -> bool {
        let result: Result<bool> = async {
            if self.store.exists(key).await? {
                return Ok(false);
            }
            self.write(key, value, expiration).await?;
            Ok(true)
        }
        .await;
        self.absorb(CacheOperation::Add, key, result)
            .unwrap_or(false)
    }

    /// Write only if a record exists; same check-then-write window as `add`
    pub(crate) async fn replace(&self, key: &str, value: &CacheValue, expiration: u64) -> bool {
        let result: Result<bool> = async {
            if !self.store.exists(key).await? {
                return Ok(false);
            }
            self.write(key, value, expiration).await?;
            Ok(true)
        }
        .await;
        self.absorb(CacheOperation::Replace, key, result)
            .unwrap_or(false)
    }

    pub(crate) async fn set(&self, key: &str, value: &CacheValue, expiration: u64) -> bool {
        let result = self.write(key, value, expiration).await;
        self.absorb(CacheOperation::Set, key, result).is_some()
    }

    /// Existence check, then fetch
    ///
    /// A record that vanishes between the two commands reads as a miss.
    pub(crate) async fn get(&self, key: &str) -> CacheResult<CacheValue> {
        let result: Result<Option<CacheValue>> = async {
            if !self.store.exists(key).await? {
                return Ok(None);
            }
            match self.store.get(key).await? {
                Some(bytes) => self.codec.decode(&bytes).map(Some),
                None => Ok(None),
            }
        }
        .await;
        self.absorb(CacheOperation::Get, key, result)
            .flatten()
            .into()
    }

    /// True when a record was removed
    pub(crate) async fn delete(&self, key: &str) -> bool {
        let result = self.store.del(key).await;
        self.absorb(CacheOperation::Delete, key, result)
            .is_some_and(|removed| removed > 0)
    }

    /// Atomic server-side increment, then a fresh read of the record
    ///
    /// The counter command only answers with the new number; the re-read is
    /// what the runtime tier mirrors, since other writers may have touched
    /// the record too.
    pub(crate) async fn increment(
        &self,
        key: &str,
        offset: i64,
    ) -> Option<(i64, CacheResult<CacheValue>)> {
        let result = self.store.incr_by(key, offset).await;
        let value = self.absorb(CacheOperation::Increment, key, result)?;
        Some((value, self.get(key).await))
    }

    /// Atomic server-side decrement, then a fresh read of the record
    pub(crate) async fn decrement(
        &self,
        key: &str,
        offset: i64,
    ) -> Option<(i64, CacheResult<CacheValue>)> {
        let result = self.store.decr_by(key, offset).await;
        let value = self.absorb(CacheOperation::Decrement, key, result)?;
        Some((value, self.get(key).await))
    }

    /// Drop every record in the backend database
    pub(crate) async fn flush(&self) -> bool {
        let result = self.store.flush_all().await;
        self.absorb(CacheOperation::Flush, "*", result).is_some()
    }
}

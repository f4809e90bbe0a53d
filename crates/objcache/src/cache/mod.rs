//! Object cache facade

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

use objcache_core::{
    CacheKey, CacheMetrics, CacheOperation, CacheResult, CacheStats, CacheTier, CacheValue,
    GroupClassifier, IntoGroupNames, KeyBuilder, KeyValueStore, NoopMetrics, ScopePrefix,
    ValueCodec, WireCodec,
};
use tracing::{debug, info};

use crate::CacheConfig;

mod backend;
use backend::BackendTier;

mod runtime;
use runtime::RuntimeTier;

mod group;
pub use group::CacheGroup;

mod read_through;
pub use read_through::Loader;

/// Derived key plus the routing decision for one call
struct Route {
    key: String,
    non_persistent: bool,
}

/// Two-tier object cache
///
/// Groups classified non-persistent live only in the runtime tier and every
/// operation on them succeeds without touching the store. All other groups
/// are written to and read through the store, with the runtime tier
/// mirroring the last value seen so repeated reads in the same process skip
/// the network. Whether a group is global only changes its derived key.
///
/// Build one per process and share it behind an `Arc`.
///
/// Generic over:
/// - `St`: the external key-value store (Redis, in-memory)
/// - `C`: the value codec
/// - `M`: the metrics collector
pub struct ObjectCache<St, C = WireCodec, M = NoopMetrics>
where
    St: KeyValueStore,
    C: ValueCodec,
    M: CacheMetrics,
{
    backend: BackendTier<St, C, M>,
    runtime: RuntimeTier,
    keys: KeyBuilder,
    groups: RwLock<GroupClassifier>,
    metrics: Arc<M>,
    stats: RwLock<CacheStats>,
}

impl<St: KeyValueStore> ObjectCache<St, WireCodec, NoopMetrics> {
    /// Create a cache with the default codec and no metrics
    pub fn new(store: St, config: CacheConfig) -> Self {
        Self::with_codec_and_metrics(store, WireCodec::default(), NoopMetrics, config)
    }
}

#[cfg(feature = "redis")]
impl ObjectCache<objcache_storage::RedisStore, WireCodec, NoopMetrics> {
    /// Connect to Redis and create a cache on top of it
    pub async fn connect(
        redis: objcache_storage::RedisConfig,
        config: CacheConfig,
    ) -> objcache_core::Result<Self> {
        let store = objcache_storage::RedisStore::new(redis).await?;
        Ok(Self::new(store, config))
    }
}

impl<St, C, M> ObjectCache<St, C, M>
where
    St: KeyValueStore,
    C: ValueCodec,
    M: CacheMetrics,
{
    /// Create a cache with a custom codec and metrics
    pub fn with_codec_and_metrics(store: St, codec: C, metrics: M, config: CacheConfig) -> Self {
        let mut groups = GroupClassifier::new();
        groups.add_global_groups(config.global_groups);
        groups.add_non_persistent_groups(config.non_persistent_groups);

        let prefix = ScopePrefix::new(&config.scope, config.shared_global_tables);
        let metrics = Arc::new(metrics);

        Self {
            backend: BackendTier::new(store, codec, metrics.clone()),
            runtime: RuntimeTier::new(),
            keys: KeyBuilder::new(config.salt, prefix),
            groups: RwLock::new(groups),
            metrics,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// Handle bound to one group
    pub fn group(&self, name: impl Into<String>) -> CacheGroup<'_, St, C, M> {
        CacheGroup::new(self, name.into())
    }

    /// Mark groups as shared by every tenant
    pub fn add_global_groups(&self, names: impl IntoGroupNames) {
        self.groups.write().add_global_groups(names);
    }

    /// Mark groups as process-local
    pub fn add_non_persistent_groups(&self, names: impl IntoGroupNames) {
        self.groups.write().add_non_persistent_groups(names);
    }

    pub fn is_global_group(&self, group: &str) -> bool {
        self.groups.read().is_global(group)
    }

    pub fn is_non_persistent_group(&self, group: &str) -> bool {
        self.groups.read().is_non_persistent(group)
    }

    /// Derived storage key for `key` in `group`
    pub fn build_key(&self, key: impl CacheKey, group: &str) -> String {
        self.keys
            .build_key(&key.cache_key(), group, &self.groups.read())
    }

    fn route(&self, key: &impl CacheKey, group: &str) -> Route {
        let groups = self.groups.read();
        Route {
            key: self.keys.build_key(&key.cache_key(), group, &groups),
            non_persistent: groups.is_non_persistent(group),
        }
    }

    fn record_write(&self, ok: bool) {
        if ok {
            self.stats.write().writes += 1;
        }
    }

    fn record_hit(&self, key: &str, tier: CacheTier) {
        {
            let mut stats = self.stats.write();
            match tier {
                CacheTier::Runtime => stats.runtime_hits += 1,
                CacheTier::Backend => stats.backend_hits += 1,
            }
        }
        debug!(target: "objcache", key = %key, tier = tier.as_str(), "cache hit");
        self.metrics.record_hit(key, tier);
    }

    fn record_miss(&self, key: &str) {
        self.stats.write().misses += 1;
        debug!(target: "objcache", key = %key, "cache miss");
        self.metrics.record_miss(key);
    }

    /// Store a value only if the key holds nothing yet
    ///
    /// Returns `false` when a value already exists. For store-backed groups
    /// the check and the write are separate commands, so two processes
    /// racing on the same key can both succeed.
    pub async fn add(
        &self,
        key: impl CacheKey,
        value: impl Into<CacheValue>,
        group: &str,
        expiration: u64,
    ) -> bool {
        let start = Instant::now();
        let route = self.route(&key, group);
        let value = value.into();

        let added = if route.non_persistent {
            self.runtime.insert_if_absent(&route.key, value)
        } else {
            let added = self.backend.add(&route.key, &value, expiration).await;
            if added {
                self.runtime.put(&route.key, value);
            }
            added
        };

        self.record_write(added);
        self.metrics
            .record_latency(CacheOperation::Add, start.elapsed());
        added
    }

    /// Store a value unconditionally
    ///
    /// `expiration` is a TTL in seconds; 0 keeps the value until it is
    /// deleted, flushed or evicted. A failed write drops the runtime copy so
    /// the next read goes back to the store.
    pub async fn set(
        &self,
        key: impl CacheKey,
        value: impl Into<CacheValue>,
        group: &str,
        expiration: u64,
    ) -> bool {
        let start = Instant::now();
        let route = self.route(&key, group);
        let value = value.into();

        let stored = if route.non_persistent {
            self.runtime.put(&route.key, value);
            true
        } else {
            let stored = self.backend.set(&route.key, &value, expiration).await;
            if stored {
                self.runtime.put(&route.key, value);
            } else {
                self.runtime.remove(&route.key);
            }
            stored
        };

        self.record_write(stored);
        self.metrics
            .record_latency(CacheOperation::Set, start.elapsed());
        stored
    }

    /// Store a value only if the key already holds one
    pub async fn replace(
        &self,
        key: impl CacheKey,
        value: impl Into<CacheValue>,
        group: &str,
        expiration: u64,
    ) -> bool {
        let start = Instant::now();
        let route = self.route(&key, group);
        let value = value.into();

        let replaced = if route.non_persistent {
            self.runtime.replace_if_present(&route.key, value)
        } else {
            let replaced = self.backend.replace(&route.key, &value, expiration).await;
            if replaced {
                self.runtime.put(&route.key, value);
            }
            replaced
        };

        self.record_write(replaced);
        self.metrics
            .record_latency(CacheOperation::Replace, start.elapsed());
        replaced
    }

    /// Store several values in one group
    ///
    /// Writes are issued one after another. Returns `true` only if every
    /// write succeeded; writes that succeeded before a failure are kept.
    pub async fn set_multi<K, V, I>(&self, items: I, group: &str, expiration: u64) -> bool
    where
        K: CacheKey,
        V: Into<CacheValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut all_stored = true;
        for (key, value) in items {
            all_stored &= self.set(key, value, group, expiration).await;
        }
        all_stored
    }

    /// Look up a value
    ///
    /// Served from the runtime tier when it holds the key; otherwise
    /// store-backed groups read through the store and mirror the result.
    /// The returned value is the caller's own copy.
    ///
    /// Runtime copies never expire. A value written with a TTL keeps being
    /// served from this process after the store has dropped it; use
    /// [`get_forced`](Self::get_forced) to consult the store.
    pub async fn get(&self, key: impl CacheKey, group: &str) -> CacheResult<CacheValue> {
        let start = Instant::now();
        let route = self.route(&key, group);

        let result = match self.runtime.get(&route.key) {
            Some(value) => {
                self.record_hit(&route.key, CacheTier::Runtime);
                CacheResult::Hit(value)
            }
            None if route.non_persistent => {
                self.record_miss(&route.key);
                CacheResult::Miss
            }
            None => self.read_through(&route.key).await,
        };

        self.metrics
            .record_latency(CacheOperation::Get, start.elapsed());
        result
    }

    /// Look up a value, skipping the runtime tier for store-backed groups
    ///
    /// The runtime copy is refreshed from the store, or dropped on a miss.
    pub async fn get_forced(&self, key: impl CacheKey, group: &str) -> CacheResult<CacheValue> {
        let route = self.route(&key, group);
        if route.non_persistent {
            return self.get(key, group).await;
        }

        let start = Instant::now();
        let result = self.read_through(&route.key).await;
        if result.is_miss() {
            self.runtime.remove(&route.key);
        }
        self.metrics
            .record_latency(CacheOperation::Get, start.elapsed());
        result
    }

    /// Look at the runtime tier only, without any store I/O
    pub fn get_from_runtime(&self, key: impl CacheKey, group: &str) -> CacheResult<CacheValue> {
        let route = self.route(&key, group);
        self.runtime.get(&route.key).into()
    }

    /// Look up several keys in one group, preserving order
    pub async fn get_multi<K, I>(&self, keys: I, group: &str) -> Vec<CacheResult<CacheValue>>
    where
        K: CacheKey,
        I: IntoIterator<Item = K>,
    {
        let mut results = Vec::new();
        for key in keys {
            results.push(self.get(key, group).await);
        }
        results
    }

    async fn read_through(&self, key: &str) -> CacheResult<CacheValue> {
        match self.backend.get(key).await {
            CacheResult::Hit(value) => {
                self.runtime.put(key, value.clone());
                self.record_hit(key, CacheTier::Backend);
                CacheResult::Hit(value)
            }
            CacheResult::Miss => {
                self.record_miss(key);
                CacheResult::Miss
            }
        }
    }

    /// Remove a value
    ///
    /// The runtime copy is always dropped, whatever the store answers.
    /// Returns `true` for non-persistent groups, and for store-backed groups
    /// when the store actually held a record.
    pub async fn delete(&self, key: impl CacheKey, group: &str) -> bool {
        let start = Instant::now();
        let route = self.route(&key, group);

        let deleted = if route.non_persistent {
            self.runtime.remove(&route.key);
            true
        } else {
            let deleted = self.backend.delete(&route.key).await;
            self.runtime.remove(&route.key);
            deleted
        };

        if deleted {
            self.stats.write().deletes += 1;
        }
        self.metrics
            .record_latency(CacheOperation::Delete, start.elapsed());
        deleted
    }

    /// Add `offset` to an integer value, creating it at 0 if absent
    ///
    /// Returns the new value, or `None` when the stored value is not an
    /// integer, the result would overflow, or the store is unreachable.
    pub async fn increment(&self, key: impl CacheKey, offset: i64, group: &str) -> Option<i64> {
        self.adjust(key, offset, group, CacheOperation::Increment)
            .await
    }

    /// Subtract `offset` from an integer value, creating it at 0 if absent
    ///
    /// Values may go negative.
    pub async fn decrement(&self, key: impl CacheKey, offset: i64, group: &str) -> Option<i64> {
        self.adjust(key, offset, group, CacheOperation::Decrement)
            .await
    }

    async fn adjust(
        &self,
        key: impl CacheKey,
        offset: i64,
        group: &str,
        operation: CacheOperation,
    ) -> Option<i64> {
        let start = Instant::now();
        let route = self.route(&key, group);

        let result = if route.non_persistent {
            let delta = match operation {
                CacheOperation::Decrement => offset.checked_neg(),
                _ => Some(offset),
            };
            delta.and_then(|delta| self.runtime.adjust(&route.key, delta))
        } else {
            let adjusted = match operation {
                CacheOperation::Decrement => self.backend.decrement(&route.key, offset).await,
                _ => self.backend.increment(&route.key, offset).await,
            };
            adjusted.map(|(value, current)| {
                match current {
                    CacheResult::Hit(current) => self.runtime.put(&route.key, current),
                    CacheResult::Miss => {
                        self.runtime.remove(&route.key);
                    }
                }
                value
            })
        };

        self.record_write(result.is_some());
        self.metrics.record_latency(operation, start.elapsed());
        result
    }

    /// Clear both tiers
    ///
    /// Waits `delay` first. The store side is a full `FLUSHALL`: it wipes the
    /// whole backend database, including keys that belong to other tenants
    /// and other installations sharing it. The runtime tier is cleared before
    /// the store is asked, so a failed store flush leaves the tiers out of
    /// step; the result is `false` in that case.
    pub async fn flush(&self, delay: Duration) -> bool {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let start = Instant::now();
        self.runtime.clear();
        let flushed = self.backend.flush().await;

        info!(target: "objcache", flushed, "flushed runtime tier and backend database");
        self.metrics
            .record_latency(CacheOperation::Flush, start.elapsed());
        flushed
    }

    /// Counters for this process
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.read().clone();
        stats.runtime_entries = self.runtime.len();
        stats.backend_errors = self.backend.error_count();
        stats
    }
}

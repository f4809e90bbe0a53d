use async_trait::async_trait;
use std::future::Future;

use objcache_core::{
    CacheKey, CacheMetrics, CacheResult, CacheValue, KeyValueStore, Result, ValueCodec,
};

use super::ObjectCache;

/// Source of truth consulted on a cache miss
#[async_trait]
pub trait Loader: Send + Sync {
    /// Load the value for a raw key, or `None` if the source has nothing
    async fn load(&self, key: &str, group: &str) -> Result<Option<CacheValue>>;
}

impl<St, C, M> ObjectCache<St, C, M>
where
    St: KeyValueStore,
    C: ValueCodec,
    M: CacheMetrics,
{
    /// Look up a value, computing and storing it on a miss
    ///
    /// The loaded value is written with `set`; a failed write is not an error
    /// and the loaded value is still returned. Errors come only from `load`.
    /// Concurrent misses on the same key each run their own loader.
    pub async fn get_or_load<K, F, Fut>(
        &self,
        key: K,
        group: &str,
        expiration: u64,
        load: F,
    ) -> Result<CacheResult<CacheValue>>
    where
        K: CacheKey,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<CacheValue>>>,
    {
        if let CacheResult::Hit(value) = self.get(&key, group).await {
            return Ok(CacheResult::Hit(value));
        }

        match load().await? {
            Some(value) => {
                self.set(&key, value.clone(), group, expiration).await;
                Ok(CacheResult::Hit(value))
            }
            None => Ok(CacheResult::Miss),
        }
    }

    /// `get_or_load` backed by a [`Loader`]
    pub async fn get_or_load_with<K, L>(
        &self,
        key: K,
        group: &str,
        expiration: u64,
        loader: &L,
    ) -> Result<CacheResult<CacheValue>>
    where
        K: CacheKey,
        L: Loader + ?Sized,
    {
        let raw = key.cache_key();
        self.get_or_load(&key, group, expiration, || loader.load(&raw, group))
            .await
    }
}

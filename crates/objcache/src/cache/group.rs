use objcache_core::{CacheKey, CacheMetrics, CacheResult, CacheValue, KeyValueStore, ValueCodec};

use super::ObjectCache;

/// A cache view bound to one group
///
/// Routing is looked up on every call, so classifying the group after the
/// handle was created still takes effect.
pub struct CacheGroup<'a, St, C, M>
where
    St: KeyValueStore,
    C: ValueCodec,
    M: CacheMetrics,
{
    cache: &'a ObjectCache<St, C, M>,
    name: String,
}

impl<'a, St, C, M> CacheGroup<'a, St, C, M>
where
    St: KeyValueStore,
    C: ValueCodec,
    M: CacheMetrics,
{
    pub(crate) fn new(cache: &'a ObjectCache<St, C, M>, name: String) -> Self {
        Self { cache, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_global(&self) -> bool {
        self.cache.is_global_group(&self.name)
    }

    pub fn is_non_persistent(&self) -> bool {
        self.cache.is_non_persistent_group(&self.name)
    }

    pub fn build_key(&self, key: impl CacheKey) -> String {
        self.cache.build_key(key, &self.name)
    }

    pub async fn add(&self, key: impl CacheKey, value: impl Into<CacheValue>, expiration: u64) -> bool {
        self.cache.add(key, value, &self.name, expiration).await
    }

    pub async fn set(&self, key: impl CacheKey, value: impl Into<CacheValue>, expiration: u64) -> bool {
        self.cache.set(key, value, &self.name, expiration).await
    }

    pub async fn replace(
        &self,
        key: impl CacheKey,
        value: impl Into<CacheValue>,
        expiration: u64,
    ) -> bool {
        self.cache.replace(key, value, &self.name, expiration).await
    }

    pub async fn get(&self, key: impl CacheKey) -> CacheResult<CacheValue> {
        self.cache.get(key, &self.name).await
    }

    pub async fn delete(&self, key: impl CacheKey) -> bool {
        self.cache.delete(key, &self.name).await
    }

    pub async fn increment(&self, key: impl CacheKey, offset: i64) -> Option<i64> {
        self.cache.increment(key, offset, &self.name).await
    }

    pub async fn decrement(&self, key: impl CacheKey, offset: i64) -> Option<i64> {
        self.cache.decrement(key, offset, &self.name).await
    }
}

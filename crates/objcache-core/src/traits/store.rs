//! External key-value store trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::Result;

/// The primitive command set the facade relies on
///
/// Mirrors what a plain Redis server offers: there is no conditional set and
/// no compare-and-swap, so anything richer (add, replace, increment with a
/// refreshed mirror) is composed from these calls by the backend adapter.
/// Keys passed in are already derived; stores must not rewrite them.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Check whether a record exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Fetch the raw bytes of a record
    ///
    /// Returns `None` if the record does not exist or has expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a record with no expiration
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Write a record that expires after `ttl_secs` seconds
    async fn set_ex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()>;

    /// Remove a record
    ///
    /// Returns the number of records removed (0 or 1).
    async fn del(&self, key: &str) -> Result<u64>;

    /// Atomically add `delta` to an integer record, creating it at 0 first
    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64>;

    /// Atomically subtract `delta` from an integer record, creating it at 0 first
    async fn decr_by(&self, key: &str, delta: i64) -> Result<i64>;

    /// Drop every record in the store, not just this installation's
    async fn flush_all(&self) -> Result<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()> {
        (**self).set_ex(key, ttl_secs, value).await
    }

    async fn del(&self, key: &str) -> Result<u64> {
        (**self).del(key).await
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        (**self).incr_by(key, delta).await
    }

    async fn decr_by(&self, key: &str, delta: i64) -> Result<i64> {
        (**self).decr_by(key, delta).await
    }

    async fn flush_all(&self) -> Result<()> {
        (**self).flush_all().await
    }
}

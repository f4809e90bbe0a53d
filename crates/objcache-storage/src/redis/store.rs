use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use bb8_redis::RedisConnectionManager;
use redis::AsyncCommands;

use objcache_core::{CacheError, KeyValueStore, Result};

use super::config::RedisConfig;

/// Redis store
///
/// A thin pooled wrapper: every trait method is exactly one Redis command on
/// the already-derived key, with no prefixing of its own.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
    config: RedisConfig,
}

impl RedisStore {
    /// Connect and build the connection pool
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let manager = RedisConnectionManager::new(config.url())
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        tracing::debug!(
            target: "objcache",
            host = %config.host,
            port = config.port,
            database = config.database,
            pool_size = config.pool_size,
            "redis store connected"
        );

        Ok(Self { pool, config })
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Get connection from pool
    async fn get_connection(&self) -> Result<PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

fn backend_error(e: redis::RedisError) -> CacheError {
    if e.is_connection_dropped() || e.is_io_error() {
        CacheError::Connection(e.to_string())
    } else {
        CacheError::Backend(e.to_string())
    }
}

/// INCRBY/DECRBY reply "ERR value is not an integer or out of range" on text
fn counter_error(key: &str, e: redis::RedisError) -> CacheError {
    if e.to_string().contains("not an integer") {
        CacheError::NotNumeric(key.to_string())
    } else {
        backend_error(e)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        conn.exists(key).await.map_err(backend_error)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.get_connection().await?;
        conn.get(key).await.map_err(backend_error)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.get_connection().await?;
        conn.set::<_, _, ()>(key, value).await.map_err(backend_error)
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()> {
        let mut conn = self.get_connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(backend_error)
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut conn = self.get_connection().await?;
        conn.del(key).await.map_err(backend_error)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        conn.incr(key, delta)
            .await
            .map_err(|e| counter_error(key, e))
    }

    async fn decr_by(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        conn.decr(key, delta)
            .await
            .map_err(|e| counter_error(key, e))
    }

    async fn flush_all(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        redis::cmd("FLUSHALL")
            .query_async::<()>(&mut *conn)
            .await
            .map_err(backend_error)
    }
}

//! Configuration for the Redis store

use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the Redis store
///
/// Deserializable so the host application can load it from its own
/// configuration files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Server host name or address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logical database index
    pub database: u32,

    /// Optional AUTH password
    pub password: Option<String>,

    /// Connection pool size
    pub pool_size: u32,

    /// How long to wait for a pooled connection
    pub connection_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            database: 0,
            password: None,
            pool_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Create new config for a host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Select the logical database
    pub fn database(mut self, database: u32) -> Self {
        self.database = database;
        self
    }

    /// Set the AUTH password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set pool size
    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the pooled connection checkout timeout
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Connection URL in `redis://[:password@]host:port/db` form
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.database
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        assert_eq!(RedisConfig::default().url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_builder_url() {
        let config = RedisConfig::new("cache.internal", 6380)
            .database(3)
            .password("s3cret")
            .pool_size(4);
        assert_eq!(config.url(), "redis://:s3cret@cache.internal:6380/3");
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: RedisConfig =
            serde_json::from_str(r#"{"host":"10.0.0.5","database":2}"#).unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 6379);
        assert_eq!(config.database, 2);
        assert!(config.password.is_none());
    }
}

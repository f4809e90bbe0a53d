//! Raw cache key trait

use std::fmt::Display;

/// Trait for types that can be used as raw cache keys
///
/// The raw key is combined with a group and the scope prefix to form the
/// derived storage key, so implementations only produce the bare part.
pub trait CacheKey: Send + Sync {
    /// Generate the raw key string
    fn cache_key(&self) -> String;
}

impl CacheKey for str {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl CacheKey for String {
    fn cache_key(&self) -> String {
        self.clone()
    }
}

impl<T: CacheKey + ?Sized> CacheKey for &T {
    fn cache_key(&self) -> String {
        (**self).cache_key()
    }
}

macro_rules! impl_cache_key_for_int {
    ($($t:ty),*) => {
        $(
            impl CacheKey for $t {
                fn cache_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_cache_key_for_int!(i32, i64, u32, u64, usize);

// Tuple implementations for composite keys

impl<T1: Display + Send + Sync, T2: Display + Send + Sync> CacheKey for (T1, T2) {
    fn cache_key(&self) -> String {
        format!("{}:{}", self.0, self.1)
    }
}

impl<T1: Display + Send + Sync, T2: Display + Send + Sync, T3: Display + Send + Sync> CacheKey
    for (T1, T2, T3)
{
    fn cache_key(&self) -> String {
        format!("{}:{}:{}", self.0, self.1, self.2)
    }
}

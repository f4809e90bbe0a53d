//! Cache result type

/// Result of a cache lookup
///
/// A miss is an ordinary outcome, not an error: absent records, expired
/// records and an unreachable backend all read as `Miss`.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// Value found
    Hit(T),
    /// Nothing stored under the key
    Miss,
}

impl<T> CacheResult<T> {
    /// Check if this is a hit
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheResult::Hit(_))
    }

    /// Check if this is a miss
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheResult::Miss)
    }

    /// Extract the value, consuming the result
    pub fn value(self) -> Option<T> {
        match self {
            CacheResult::Hit(value) => Some(value),
            CacheResult::Miss => None,
        }
    }

    /// Borrow the value if present
    pub fn as_ref(&self) -> CacheResult<&T> {
        match self {
            CacheResult::Hit(value) => CacheResult::Hit(value),
            CacheResult::Miss => CacheResult::Miss,
        }
    }

    /// Map the value if present
    pub fn map<U, F>(self, f: F) -> CacheResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            CacheResult::Hit(value) => CacheResult::Hit(f(value)),
            CacheResult::Miss => CacheResult::Miss,
        }
    }
}

impl<T> From<Option<T>> for CacheResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(CacheResult::Miss, CacheResult::Hit)
    }
}

//! Cache statistics

/// Per-process counters kept by the facade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Hits served from the runtime tier
    pub runtime_hits: u64,
    /// Hits read through from the backend
    pub backend_hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Successful writes (add, set, replace, increment, decrement)
    pub writes: u64,
    /// Successful deletes
    pub deletes: u64,
    /// Backend errors absorbed into failure results
    pub backend_errors: u64,
    /// Current number of runtime entries
    pub runtime_entries: usize,
}

impl CacheStats {
    /// Hits from either tier
    pub fn hits(&self) -> u64 {
        self.runtime_hits + self.backend_hits
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    /// Total requests (hits + misses)
    pub fn total_requests(&self) -> u64 {
        self.hits() + self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CacheStats::default();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_hit_ratio() {
        let stats = CacheStats {
            runtime_hits: 60,
            backend_hits: 20,
            misses: 20,
            ..Default::default()
        };
        assert_eq!(stats.total_requests(), 100);
        assert!((stats.hit_ratio() - 0.8).abs() < f64::EPSILON);
    }
}

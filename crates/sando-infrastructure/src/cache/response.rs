//! Read-through response cache backed by Moka

use crate::config::CachePolicy;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of cache entries
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    /// Calculate hit rate from hits and misses
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Per-client response cache
///
/// A disabled policy yields a cache that never stores anything.
#[derive(Clone)]
pub struct ResponseCache {
    cache: Option<Cache<String, Value>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl ResponseCache {
    /// Create a cache for the given policy
    pub fn new(policy: &CachePolicy) -> Self {
        let cache = (policy.enabled && policy.max_entries > 0).then(|| {
            Cache::builder()
                .max_capacity(policy.max_entries)
                .time_to_live(policy.ttl)
                .eviction_policy(EvictionPolicy::lru())
                .build()
        });
        Self {
            cache,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Whether responses are stored
    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Look up a cached response
    pub async fn get(&self, key: &str) -> Option<Value> {
        let cache = self.cache.as_ref()?;
        let value = cache.get(key).await;
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Store a response
    pub async fn insert(&self, key: String, value: Value) {
        if let Some(cache) = &self.cache {
            cache.insert(key, value).await;
        }
    }

    /// Drop every cached response
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    /// Apply pending evictions and invalidations
    pub async fn run_pending_tasks(&self) {
        if let Some(cache) = &self.cache {
            cache.run_pending_tasks().await;
        }
    }

    /// Approximate number of entries
    pub fn entry_count(&self) -> u64 {
        self.cache.as_ref().map_or(0, Cache::entry_count)
    }

    /// Snapshot of hit/miss counters
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entry_count(),
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        stats
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("enabled", &self.is_enabled())
            .field("entries", &self.entry_count())
            .finish_non_exhaustive()
    }
}

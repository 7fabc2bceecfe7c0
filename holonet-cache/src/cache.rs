//! In-memory TTL cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;

/// Cache entry: the value and when it was stored.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        ttl.is_zero() || self.stored_at.elapsed() > ttl
    }
}

/// In-memory cache with a fixed TTL.
///
/// Expired entries are evicted lazily, when a lookup finds them. There is no
/// size bound and no background sweep. Concurrent `set` calls on one key are
/// last-write-wins.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Gets a cached value.
    ///
    /// Returns None if the key was never set or its entry outlived the TTL;
    /// in the latter case the entry is evicted.
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        // Another writer may have refreshed the key in between.
        if entries.get(key).is_some_and(|e| e.is_expired(self.ttl)) {
            entries.remove(key);
        }
        None
    }

    /// Stores a value, replacing any previous entry and its timestamp.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.write().insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(self.ttl)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
    pub ttl_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_set_get() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set("/people/1/", "luke".to_string());
        assert_eq!(cache.get("/people/1/").as_deref(), Some("luke"));
    }

    #[test]
    fn test_cache_miss() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(300));
        assert!(cache.get("nonexistent").is_none());
    }

    #[test]
    fn test_cache_overwrite() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set("key", 1);
        cache.set("key", 2);
        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_clear() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set("key1", "value1");
        cache.set("key2", "value2");
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("key1").is_none());
        assert!(cache.get("key2").is_none());
    }

    #[test]
    fn test_cache_ttl_expiration_evicts() {
        let cache = TtlCache::new(Duration::from_millis(5));
        cache.set("key", "value");
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("key").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cache_zero_ttl_always_misses() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set("key", "value");
        assert!(cache.get("key").is_none());
    }

    #[test]
    fn test_set_resets_timestamp() {
        let cache = TtlCache::new(Duration::from_millis(60));
        cache.set("key", 1);
        std::thread::sleep(Duration::from_millis(40));
        cache.set("key", 2);
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get("key"), Some(2));
    }

    #[test]
    fn test_cache_stats() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set("a", 1);
        cache.set("b", 2);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 2);
        assert_eq!(stats.expired_entries, 0);
        assert_eq!(stats.ttl_seconds, 300);
    }
}

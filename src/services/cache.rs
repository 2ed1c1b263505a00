// src/services/cache.rs
// DOCUMENTATION: In-memory response cache with TTL and single-flight
// PURPOSE: Serve the public aggregate endpoint without refetching within the
// TTL window; concurrent misses for the same key run one fetch

use crate::errors::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// TTL cache for serialized JSON responses
/// DOCUMENTATION: Thread-safe; the flights map is the single-flight guard
pub struct ResponseCache {
    store: RwLock<HashMap<String, CacheEntry<String>>>,
    flights: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    default_ttl: Duration,
}

impl ResponseCache {
    /// Create new cache with default TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            flights: Mutex::new(HashMap::new()),
            default_ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get cached value if present and fresh
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;

        if let Some(entry) = store.get(key) {
            if !entry.is_expired() {
                log::debug!("Cache HIT for key: {}", key);
                return Some(entry.data.clone());
            }
            log::debug!("Cache EXPIRED for key: {}", key);
        } else {
            log::debug!("Cache MISS for key: {}", key);
        }

        None
    }

    /// Set cached value with custom TTL
    pub async fn set_with_ttl(&self, key: String, value: String, ttl: Duration) {
        let mut store = self.store.write().await;
        store.insert(key.clone(), CacheEntry::new(value, ttl));
        log::debug!("Cache SET for key: {} (TTL: {}s)", key, ttl.as_secs());
    }

    /// Get-or-fetch with a per-key single-flight guard
    /// DOCUMENTATION: On a miss, at most one caller runs the fetch; the
    /// others wait on the flight lock and then read the freshly cached value
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<String, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ApiError>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let flight = {
            let mut flights = self.flights.lock().await;
            flights
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        let guard = flight.lock().await;

        // Another caller may have filled the entry while we waited
        let result = match self.get(key).await {
            Some(value) => Ok(value),
            None => {
                let fetched = fetch().await;
                if let Ok(value) = &fetched {
                    self.set_with_ttl(key.to_string(), value.clone(), ttl).await;
                }
                fetched
            }
        };

        // The flight entry must come out on every path, failed fetches
        // included, or the map grows with every unknown key requested
        drop(guard);
        self.flights.lock().await.remove(key);

        result
    }

    /// Drop a single cached entry (on writes to the underlying resource)
    pub async fn invalidate(&self, key: &str) {
        let mut store = self.store.write().await;
        if store.remove(key).is_some() {
            log::debug!("Cache INVALIDATE for key: {}", key);
        }
    }

    /// Drop all entries whose key starts with the prefix
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|key, _| !key.starts_with(prefix));
        let removed = before_count - store.len();

        if removed > 0 {
            log::debug!(
                "Cache INVALIDATE prefix '{}': {} entries removed",
                prefix,
                removed
            );
        }
    }

    /// Clear expired entries
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Cache cleanup: removed {} expired entries ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let total = store.len();
        let expired = store.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
        }
    }

    #[cfg(test)]
    pub(crate) async fn flight_count(&self) -> usize {
        self.flights.lock().await.len()
    }

    /// Clear all cache entries
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        let count = store.len();
        store.clear();
        log::info!("Cache cleared: {} entries removed", count);
    }
}

/// Cache statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries
pub fn start_cleanup_task(cache: Arc<ResponseCache>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = ResponseCache::new(60);

        cache
            .set_with_ttl("k".to_string(), "v".to_string(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.get("k").await, Some("v".to_string()));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn test_cache_expiration() {
        let cache = ResponseCache::new(60);

        cache
            .set_with_ttl("k".to_string(), "v".to_string(), Duration::from_millis(50))
            .await;

        assert!(cache.get("k").await.is_some());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_result() {
        let cache = ResponseCache::new(60);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_fetch("k", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("fetched".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "fetched");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_single_flight() {
        let cache = Arc::new(ResponseCache::new(60));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch("k", Duration::from_secs(60), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // Hold the flight long enough for the others to pile up
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok("fetched".to_string())
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "fetched");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.flight_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = ResponseCache::new(60);

        let result = cache
            .get_or_fetch("k", Duration::from_secs(60), || async {
                Err(ApiError::Database("boom".to_string()))
            })
            .await;
        assert!(result.is_err());

        // The failure must not leave a flight entry behind
        assert_eq!(cache.flight_count().await, 0);

        // Next call fetches again and succeeds
        let value = cache
            .get_or_fetch("k", Duration::from_secs(60), || async {
                Ok("recovered".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "recovered");
        assert_eq!(cache.flight_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_fetches_do_not_accumulate_flights() {
        let cache = ResponseCache::new(60);

        for i in 0..20 {
            let key = format!("public:hotel:{}:all", i);
            let result = cache
                .get_or_fetch(&key, Duration::from_secs(60), || async {
                    Err(ApiError::NotFound("Hotel card not found".to_string()))
                })
                .await;
            assert!(result.is_err());
        }

        assert_eq!(cache.flight_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = ResponseCache::new(60);
        let ttl = Duration::from_secs(60);

        cache
            .set_with_ttl("public:hotel:1:basic".into(), "a".into(), ttl)
            .await;
        cache
            .set_with_ttl("public:hotel:1:all".into(), "b".into(), ttl)
            .await;
        cache
            .set_with_ttl("public:hotel:2:basic".into(), "c".into(), ttl)
            .await;

        cache.invalidate_prefix("public:hotel:1:").await;

        assert!(cache.get("public:hotel:1:basic").await.is_none());
        assert!(cache.get("public:hotel:1:all").await.is_none());
        assert!(cache.get("public:hotel:2:basic").await.is_some());
    }

    #[tokio::test]
    async fn test_cache_cleanup() {
        let cache = ResponseCache::new(60);

        cache
            .set_with_ttl("k1".into(), "v1".into(), Duration::from_millis(10))
            .await;
        cache
            .set_with_ttl("k2".into(), "v2".into(), Duration::from_millis(10))
            .await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.cleanup().await;

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 0);
    }
}

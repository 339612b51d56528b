//! Two-tier result cache: optional Redis in front of an in-process FIFO map.
//!
//! Cache failures never fail a search. Every backend error is logged and
//! treated as a miss or a no-op.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default time-to-live for cached search payloads.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
/// Default local tier capacity.
pub const DEFAULT_CAPACITY: usize = 1000;

/// One cache tier. All operations are infallible at this surface.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, ttl: Duration);
    async fn delete(&self, key: &str);
    async fn clear(&self);
}

/// Remote tier over a reconnecting Redis connection.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Redis GET failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut conn = self.conn.clone();
        let seconds = ttl.as_secs().max(1);
        if let Err(e) = conn.set_ex::<_, _, ()>(key, value, seconds).await {
            tracing::warn!(key, error = %e, "Redis SETEX failed, skipping remote cache");
        }
    }

    async fn delete(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(key).await {
            tracing::warn!(key, error = %e, "Redis DEL failed");
        }
    }

    async fn clear(&self) {
        // Scoped to this cache's keyspace, never the whole database.
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        loop {
            let reply: Result<(u64, Vec<String>), redis::RedisError> = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg("search:*")
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await;

            match reply {
                Ok((next, keys)) => {
                    if !keys.is_empty() {
                        if let Err(e) = conn.del::<_, ()>(keys).await {
                            tracing::warn!(error = %e, "Redis DEL failed during clear");
                            return;
                        }
                    }
                    if next == 0 {
                        return;
                    }
                    cursor = next;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Redis SCAN failed during clear");
                    return;
                }
            }
        }
    }
}

struct CacheEntry {
    value: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

struct LocalState {
    entries: HashMap<String, CacheEntry>,
    // Insertion order for FIFO eviction. Refreshing a key keeps its slot.
    order: VecDeque<String>,
}

/// In-process tier: bounded map with FIFO eviction and lazy TTL expiry.
pub struct LocalBackend {
    state: Mutex<LocalState>,
    capacity: usize,
}

impl LocalBackend {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(LocalState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl CacheBackend for LocalBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let mut state = self.state.lock().await;

        let expired = match state.entries.get(key) {
            Some(entry) if entry.is_expired() => true,
            Some(entry) => return Some(entry.value.clone()),
            None => return None,
        };

        if expired {
            state.entries.remove(key);
            state.order.retain(|k| k != key);
        }
        None
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut state = self.state.lock().await;

        if state.entries.contains_key(key) {
            // Refresh in place, keeping the original insertion slot.
            state.entries.insert(
                key.to_string(),
                CacheEntry {
                    value: value.to_string(),
                    inserted_at: Instant::now(),
                    ttl,
                },
            );
            return;
        }

        if state.entries.len() >= self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
            }
        }

        state.order.push_back(key.to_string());
        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    async fn delete(&self, key: &str) {
        let mut state = self.state.lock().await;
        state.entries.remove(key);
        state.order.retain(|k| k != key);
    }

    async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.order.clear();
    }
}

/// Remote-then-local composition used by the search service.
pub struct SearchCache {
    remote: Option<Arc<dyn CacheBackend>>,
    local: LocalBackend,
}

impl SearchCache {
    pub fn new(remote: Option<Arc<dyn CacheBackend>>) -> Self {
        Self {
            remote,
            local: LocalBackend::default(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(remote) = &self.remote {
            if let Some(value) = remote.get(key).await {
                return Some(value);
            }
        }
        self.local.get(key).await
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Duration) {
        if let Some(remote) = &self.remote {
            remote.set(key, value, ttl).await;
        }
        self.local.set(key, value, ttl).await;
    }

    pub async fn delete(&self, key: &str) {
        if let Some(remote) = &self.remote {
            remote.delete(key).await;
        }
        self.local.delete(key).await;
    }

    pub async fn clear(&self) {
        if let Some(remote) = &self.remote {
            remote.clear().await;
        }
        self.local.clear().await;
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_what_was_set() {
        let cache = LocalBackend::default();
        cache.set("a", "1", DEFAULT_TTL).await;
        assert_eq!(cache.get("a").await.as_deref(), Some("1"));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn test_expired_entries_evict_lazily() {
        let cache = LocalBackend::default();
        cache.set("a", "1", Duration::ZERO).await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_first() {
        let cache = LocalBackend::new(2);
        cache.set("a", "1", DEFAULT_TTL).await;
        cache.set("b", "2", DEFAULT_TTL).await;
        cache.set("c", "3", DEFAULT_TTL).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await.as_deref(), Some("2"));
        assert_eq!(cache.get("c").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_refresh_keeps_insertion_slot() {
        let cache = LocalBackend::new(2);
        cache.set("a", "1", DEFAULT_TTL).await;
        cache.set("b", "2", DEFAULT_TTL).await;
        // Refreshing "a" must not push it to the back of the queue.
        cache.set("a", "updated", DEFAULT_TTL).await;
        cache.set("c", "3", DEFAULT_TTL).await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await.as_deref(), Some("2"));
        assert_eq!(cache.get("c").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_delete_and_clear_are_idempotent() {
        let cache = SearchCache::default();
        cache.set("a", "1", DEFAULT_TTL).await;

        cache.delete("a").await;
        cache.delete("a").await;
        assert_eq!(cache.get("a").await, None);

        cache.clear().await;
        cache.clear().await;
    }

    #[tokio::test]
    async fn test_composed_cache_without_remote_uses_local() {
        let cache = SearchCache::new(None);
        cache.set("a", "1", DEFAULT_TTL).await;
        assert_eq!(cache.get("a").await.as_deref(), Some("1"));
    }
}

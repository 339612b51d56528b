//! Redis-backed cache tests against a disposable container.

use std::sync::Arc;
use std::time::Duration;

use domain_search::{CacheBackend, RedisBackend, SearchCache};
use test_utils::TestRedis;

#[tokio::test]
async fn test_remote_tier_round_trip() {
    let redis = TestRedis::new().await;
    let backend = RedisBackend::new(redis.connection_manager().await);

    backend
        .set("search:abc", "payload", Duration::from_secs(60))
        .await;
    assert_eq!(backend.get("search:abc").await.as_deref(), Some("payload"));

    backend.delete("search:abc").await;
    assert_eq!(backend.get("search:abc").await, None);
}

#[tokio::test]
async fn test_clear_only_touches_search_keys() {
    let redis = TestRedis::new().await;
    let backend = RedisBackend::new(redis.connection_manager().await);

    backend.set("search:one", "1", Duration::from_secs(60)).await;
    backend.set("search:two", "2", Duration::from_secs(60)).await;

    {
        use redis::AsyncCommands;
        let mut conn = redis.connection();
        conn.set::<_, _, ()>("other:key", "kept").await.unwrap();
    }

    backend.clear().await;

    assert_eq!(backend.get("search:one").await, None);
    assert_eq!(backend.get("search:two").await, None);

    use redis::AsyncCommands;
    let mut conn = redis.connection();
    let kept: String = conn.get("other:key").await.unwrap();
    assert_eq!(kept, "kept");
}

#[tokio::test]
async fn test_composed_cache_prefers_remote() {
    let redis = TestRedis::new().await;
    let backend: Arc<dyn CacheBackend> = Arc::new(RedisBackend::new(redis.connection_manager().await));
    let cache = SearchCache::new(Some(backend.clone()));

    cache.set("search:k", "v", Duration::from_secs(60)).await;

    // Visible through the remote tier directly.
    assert_eq!(backend.get("search:k").await.as_deref(), Some("v"));
    assert_eq!(cache.get("search:k").await.as_deref(), Some("v"));

    cache.delete("search:k").await;
    assert_eq!(cache.get("search:k").await, None);
}

//! Response cache tests

use sando_infrastructure::ResponseCache;
use sando_infrastructure::config::CachePolicy;
use serde_json::json;
use std::time::Duration;

fn policy(ttl: Duration, max_entries: u64) -> CachePolicy {
    CachePolicy {
        enabled: true,
        ttl,
        max_entries,
    }
}

#[tokio::test]
async fn test_hit_after_insert() {
    let cache = ResponseCache::new(&policy(Duration::from_secs(60), 10));

    assert!(cache.get("GET /temples").await.is_none());
    cache
        .insert("GET /temples".to_string(), json!([1, 2]))
        .await;
    assert_eq!(cache.get("GET /temples").await, Some(json!([1, 2])));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_disabled_cache_stores_nothing() {
    let cache = ResponseCache::new(&CachePolicy::disabled());
    assert!(!cache.is_enabled());

    cache.insert("k".to_string(), json!(1)).await;
    assert!(cache.get("k").await.is_none());
    assert_eq!(cache.entry_count(), 0);
}

#[tokio::test]
async fn test_entries_expire_after_ttl() {
    let cache = ResponseCache::new(&policy(Duration::from_millis(50), 10));
    cache.insert("k".to_string(), json!(1)).await;
    assert!(cache.get("k").await.is_some());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(cache.get("k").await.is_none());
}

#[tokio::test]
async fn test_capacity_is_bounded() {
    let cache = ResponseCache::new(&policy(Duration::from_secs(60), 3));
    for i in 0..10 {
        cache.insert(format!("k{i}"), json!(i)).await;
        cache.run_pending_tasks().await;
    }
    cache.run_pending_tasks().await;

    assert!(cache.entry_count() <= 3);
    assert_eq!(cache.get("k9").await, Some(json!(9)));
}

#[tokio::test]
async fn test_clear_drops_everything() {
    let cache = ResponseCache::new(&policy(Duration::from_secs(60), 10));
    cache.insert("a".to_string(), json!(1)).await;
    cache.insert("b".to_string(), json!(2)).await;

    cache.clear();
    cache.run_pending_tasks().await;
    assert!(cache.get("a").await.is_none());
    assert!(cache.get("b").await.is_none());
}

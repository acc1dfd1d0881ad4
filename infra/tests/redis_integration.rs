//! Integration tests for the Redis code store and delivery queue
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p vr_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use vr_core::services::verification::{CodeStore, JobQueue};
use vr_infra::cache::{RedisClient, RedisCodeStore};
use vr_infra::queue::RedisJobQueue;
use vr_shared::config::CacheConfig;

fn test_config() -> CacheConfig {
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix("vr_test")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(test_config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_code_store_roundtrip() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let store = RedisCodeStore::new(client);

    let address = "integration@x.com";
    store.store_code(address, "123456", 300).await.unwrap();

    let code = store.get_code(address).await.unwrap();
    assert_eq!(code, Some("123456".to_string()));

    // Re-staging overwrites the previous entry
    store.store_code(address, "654321", 300).await.unwrap();
    let code = store.get_code(address).await.unwrap();
    assert_eq!(code, Some("654321".to_string()));

    assert!(store.remove_code(address).await.unwrap());
    assert_eq!(store.get_code(address).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_code_expires() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let store = RedisCodeStore::new(client);

    let address = "expiry@x.com";
    store.store_code(address, "123456", 1).await.unwrap();
    assert!(store.get_code(address).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.get_code(address).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_queue_pops_in_fifo_order() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let queue = Arc::new(
        RedisJobQueue::new(client, "integration_delivery_queue")
            .await
            .unwrap(),
    );

    queue.enqueue("first@x.com").await.unwrap();
    queue.enqueue("second@x.com").await.unwrap();
    queue.enqueue("third@x.com").await.unwrap();

    for expected in ["first@x.com", "second@x.com", "third@x.com"] {
        let popped = queue.blocking_pop(Duration::from_secs(1)).await.unwrap();
        assert_eq!(popped.as_deref(), Some(expected));
    }
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_empty_queue_pop_times_out() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let queue = RedisJobQueue::new(client, "integration_empty_queue")
        .await
        .unwrap();

    let popped = queue.blocking_pop(Duration::from_secs(1)).await.unwrap();
    assert_eq!(popped, None);
}

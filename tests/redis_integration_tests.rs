//! Redis Integration Tests
//!
//! Most of these need a live Redis server at 127.0.0.1:6379 and are
//! ignored by default. Run them with:
//!
//! ```sh
//! cargo test --test redis_integration_tests -- --ignored
//! ```
//!
//! They use database 15 and flush it, so point them at a disposable
//! instance.

use std::time::Duration;

use serde_json::json;

use kvcache::{CacheError, Expiry, Registry, StoreOptions, REDIS_BACKEND};

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

fn test_options() -> StoreOptions {
    StoreOptions::new()
        .address("127.0.0.1:6379")
        .database(15)
        .max_retries(1)
        .read_timeout(Duration::from_secs(2))
        .write_timeout(Duration::from_secs(2))
}

async fn open_redis_cache() -> kvcache::Cache {
    init_tracing();
    let cache = Registry::new()
        .open(REDIS_BACKEND, test_options())
        .await
        .expect("redis backend should open (is a server running?)");
    cache.flush().await.expect("flush should succeed");
    cache
}

// Runs without a server: an unreachable address must fail construction,
// not hand back a half-built cache.
#[tokio::test]
async fn test_unreachable_server_fails_at_open() {
    init_tracing();
    let options = StoreOptions::new()
        .address("127.0.0.1:1")
        .max_retries(1)
        .read_timeout(Duration::from_millis(500));

    let result = Registry::new().open(REDIS_BACKEND, options).await;
    assert!(matches!(
        result,
        Err(CacheError::Connection(_)) | Err(CacheError::Timeout(_))
    ));
}

#[tokio::test]
#[ignore]
async fn test_put_get_round_trip() {
    let cache = open_redis_cache().await;

    cache
        .put("greeting", json!({"lang": "en", "text": "hello"}), Expiry::after_secs(60))
        .await
        .unwrap();

    assert!(cache.has("greeting").await.unwrap());
    let value = cache.get("greeting").await.unwrap().unwrap();
    assert_eq!(value["text"], json!("hello"));
}

#[tokio::test]
#[ignore]
async fn test_missing_key_is_absent_not_error() {
    let cache = open_redis_cache().await;

    assert_eq!(cache.get("no-such-key").await.unwrap(), None);
    assert!(!cache.has("no-such-key").await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_expiry_enforced_by_server() {
    let cache = open_redis_cache().await;

    cache
        .put("session:1", json!("token"), Expiry::after_secs(1))
        .await
        .unwrap();
    assert!(cache.has("session:1").await.unwrap());

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(!cache.has("session:1").await.unwrap());
    assert_eq!(cache.get("session:1").await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_sub_second_expiry_is_not_rounded_down() {
    let cache = open_redis_cache().await;

    cache
        .put("burst", json!("token"), Expiry::after_millis(1500))
        .await
        .unwrap();

    // Past a whole-seconds truncation point, before the real deadline.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert!(cache.has("burst").await.unwrap());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!cache.has("burst").await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_forever_entry_persists() {
    let cache = open_redis_cache().await;

    cache.forever("pinned", json!("value")).await.unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(cache.get("pinned").await.unwrap(), Some(json!("value")));
}

#[tokio::test]
#[ignore]
async fn test_delete_and_flush() {
    let cache = open_redis_cache().await;

    cache.forever("key1", json!(1)).await.unwrap();
    cache.forever("key2", json!(2)).await.unwrap();

    cache.forget("key1").await.unwrap();
    assert!(!cache.has("key1").await.unwrap());
    // Deleting an absent key stays Ok.
    cache.forget("key1").await.unwrap();

    cache.flush().await.unwrap();
    assert!(!cache.has("key2").await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_compound_operations_over_redis() {
    let cache = open_redis_cache().await;

    let value = cache
        .remember("computed", Expiry::after_secs(60), || json!([1, 2, 3]))
        .await
        .unwrap();
    assert_eq!(value, json!([1, 2, 3]));
    assert!(cache.has("computed").await.unwrap());

    assert_eq!(cache.pull("computed").await.unwrap(), Some(json!([1, 2, 3])));
    assert!(!cache.has("computed").await.unwrap());

    assert!(cache.add("slot", json!("a"), Expiry::Never).await.unwrap());
    assert!(!cache.add("slot", json!("b"), Expiry::Never).await.unwrap());
    assert_eq!(cache.get("slot").await.unwrap(), Some(json!("a")));
}

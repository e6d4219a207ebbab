//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use std::sync::Arc;

use snaplink::analytics::{AccessEvent, AnalyticsLog, RequestMeta};
use snaplink::config::DatabaseConfig;
use snaplink::errors::SnaplinkError;
use snaplink::storage::backend::{SeaOrmStorage, connect_sqlite, run_migrations};
use snaplink::storage::RecordStore;
use tempfile::TempDir;

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };

    let storage = SeaOrmStorage::new(&config)
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

fn meta(user_agent: &str, ip: &str, referrer: &str) -> RequestMeta {
    RequestMeta {
        user_agent: user_agent.to_string(),
        ip_address: ip.to_string(),
        referrer: referrer.to_string(),
    }
}

// =============================================================================
// 连接与迁移
// =============================================================================

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", temp_dir.path().join("m.db").display());

    let db = connect_sqlite(&db_url, 1, 5).await.unwrap();
    run_migrations(&db).await.unwrap();
    run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn test_empty_url_rejected() {
    let config = DatabaseConfig {
        database_url: String::new(),
        ..DatabaseConfig::default()
    };
    let err = SeaOrmStorage::new(&config).await.err().unwrap();
    assert!(matches!(err, SnaplinkError::DatabaseConfig(_)));
}

#[tokio::test]
async fn test_backend_name() {
    let (storage, _dir) = create_temp_storage().await;
    assert_eq!(storage.backend_name(), "sqlite");
}

// =============================================================================
// RecordStore
// =============================================================================

#[tokio::test]
async fn test_insert_and_lookup() {
    let (storage, _dir) = create_temp_storage().await;

    let record = storage
        .insert("abc1234", "https://example.com/page")
        .await
        .unwrap();
    assert!(record.id > 0);
    assert_eq!(record.access_count, 0);
    assert!(record.last_accessed_at.is_none());

    let found = storage.lookup_by_code("abc1234").await.unwrap().unwrap();
    assert_eq!(found.id, record.id);
    assert_eq!(found.original_url, "https://example.com/page");
}

#[tokio::test]
async fn test_lookup_missing_code() {
    let (storage, _dir) = create_temp_storage().await;
    assert!(storage.lookup_by_code("nothere").await.unwrap().is_none());
    assert!(storage.get_stats("nothere").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_code_is_conflict() {
    let (storage, _dir) = create_temp_storage().await;

    storage.insert("dup0001", "https://a.example").await.unwrap();
    let err = storage
        .insert("dup0001", "https://b.example")
        .await
        .unwrap_err();
    assert!(matches!(err, SnaplinkError::Conflict(_)));

    // 原记录不变
    let found = storage.lookup_by_code("dup0001").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://a.example");
}

#[tokio::test]
async fn test_codes_are_case_sensitive() {
    let (storage, _dir) = create_temp_storage().await;

    storage.insert("AbCdEfG", "https://upper.example").await.unwrap();
    storage.insert("abcdefg", "https://lower.example").await.unwrap();

    let upper = storage.lookup_by_code("AbCdEfG").await.unwrap().unwrap();
    let lower = storage.lookup_by_code("abcdefg").await.unwrap().unwrap();
    assert_eq!(upper.original_url, "https://upper.example");
    assert_eq!(lower.original_url, "https://lower.example");
}

#[tokio::test]
async fn test_increment_access_updates_stats() {
    let (storage, _dir) = create_temp_storage().await;
    let record = storage.insert("cnt0001", "https://example.com").await.unwrap();

    storage.increment_access(record.id).await.unwrap();
    storage.increment_access(record.id).await.unwrap();

    let stats = storage.get_stats("cnt0001").await.unwrap().unwrap();
    assert_eq!(stats.access_count, 2);
    assert!(stats.last_accessed_at.is_some());
}

#[tokio::test]
async fn test_increment_missing_row() {
    let (storage, _dir) = create_temp_storage().await;
    let err = storage.increment_access(9999).await.unwrap_err();
    assert!(matches!(err, SnaplinkError::NotFound(_)));
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let (storage, _dir) = create_temp_storage().await;
    let storage = Arc::new(storage);
    let record = storage.insert("race001", "https://example.com").await.unwrap();

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let storage = storage.clone();
            tokio::spawn(async move { storage.increment_access(record.id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = storage.get_stats("race001").await.unwrap().unwrap();
    assert_eq!(stats.access_count, 25);
}

// =============================================================================
// AnalyticsLog
// =============================================================================

#[tokio::test]
async fn test_append_and_read_events() {
    let (storage, _dir) = create_temp_storage().await;
    let record = storage.insert("log0001", "https://example.com").await.unwrap();

    storage
        .append(AccessEvent::new(record.id, meta("curl/8.0", "192.0.2.1", "")))
        .await
        .unwrap();
    storage
        .append(AccessEvent::new(
            record.id,
            meta("Mozilla/5.0", "198.51.100.9", "https://news.example/"),
        ))
        .await
        .unwrap();

    let events = storage.recent_events(record.id, 10).await.unwrap();
    assert_eq!(events.len(), 2);
    // 最新的在前
    assert_eq!(events[0].user_agent, "Mozilla/5.0");
    assert_eq!(events[0].referrer, "https://news.example/");
    assert_eq!(events[1].user_agent, "curl/8.0");
    assert_eq!(events[1].referrer, "");
    assert!(events.iter().all(|e| e.url_id == record.id));
}

#[tokio::test]
async fn test_recent_events_respects_limit() {
    let (storage, _dir) = create_temp_storage().await;
    let record = storage.insert("log0002", "https://example.com").await.unwrap();

    for i in 0..5 {
        storage
            .append(AccessEvent::new(record.id, meta(&format!("agent-{i}"), "", "")))
            .await
            .unwrap();
    }

    let events = storage.recent_events(record.id, 3).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].user_agent, "agent-4");
}

#[tokio::test]
async fn test_append_requires_existing_record() {
    let (storage, _dir) = create_temp_storage().await;
    let err = storage
        .append(AccessEvent::new(4242, RequestMeta::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, SnaplinkError::DatabaseOperation(_)));
}

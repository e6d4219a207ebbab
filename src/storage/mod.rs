use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{UrlRecord, UrlStats};

/// Durable code → URL mapping
///
/// Writes are committed before the returned future resolves.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a fresh record. `Conflict` if `short_code` is taken.
    async fn insert(&self, short_code: &str, original_url: &str) -> Result<UrlRecord>;

    async fn lookup_by_code(&self, code: &str) -> Result<Option<UrlRecord>>;

    /// Bump `access_count` by one and stamp `last_accessed_at`, atomically.
    async fn increment_access(&self, id: i64) -> Result<()>;

    async fn get_stats(&self, code: &str) -> Result<Option<UrlStats>>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let storage = SeaOrmStorage::new(&config.database).await?;
        Ok(Arc::new(storage))
    }
}

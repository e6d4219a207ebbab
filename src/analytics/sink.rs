use super::AccessEvent;
use crate::errors::Result;

/// Append-only access log
///
/// Callers only append events for records they have just resolved; the
/// referenced record must exist.
#[async_trait::async_trait]
pub trait AnalyticsLog: Send + Sync {
    async fn append(&self, event: AccessEvent) -> Result<()>;
}

//! AnalyticsLog implementation for SeaOrmStorage

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{event_to_active_model, model_to_event};
use crate::analytics::{AccessEvent, AnalyticsEvent, AnalyticsLog};
use crate::errors::{Result, SnaplinkError};

use migration::entities::url_analytics;

#[async_trait::async_trait]
impl AnalyticsLog for SeaOrmStorage {
    async fn append(&self, event: AccessEvent) -> Result<()> {
        let url_id = event.url_id;
        event_to_active_model(event)
            .insert(&self.db)
            .await
            .map_err(|e| SnaplinkError::database_operation(format!("写入访问日志失败: {}", e)))?;

        debug!("Access event recorded for record {}", url_id);
        Ok(())
    }
}

impl SeaOrmStorage {
    /// 最近的访问事件，按写入顺序倒序
    pub async fn recent_events(&self, url_id: i64, limit: u64) -> Result<Vec<AnalyticsEvent>> {
        let models = url_analytics::Entity::find()
            .filter(url_analytics::Column::UrlId.eq(url_id))
            .order_by_desc(url_analytics::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SnaplinkError::database_operation(format!("查询访问日志失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_event).collect())
    }
}

//! RecordStore implementation for SeaOrmStorage

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, SqlErr, sea_query::Expr,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_record, new_record_active_model};
use crate::errors::{Result, SnaplinkError};
use crate::storage::{RecordStore, UrlRecord, UrlStats};

use migration::entities::url_record;

#[async_trait]
impl RecordStore for SeaOrmStorage {
    async fn insert(&self, short_code: &str, original_url: &str) -> Result<UrlRecord> {
        let model = new_record_active_model(short_code, original_url)
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    SnaplinkError::conflict(format!("Short code already exists: {}", short_code))
                }
                _ => SnaplinkError::database_operation(format!("插入短链接失败: {}", e)),
            })?;

        debug!("Inserted record {} for {}", model.id, model.short_code);
        Ok(model_to_record(model))
    }

    async fn lookup_by_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        let model = url_record::Entity::find()
            .filter(url_record::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| SnaplinkError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(model.map(model_to_record))
    }

    async fn increment_access(&self, id: i64) -> Result<()> {
        // 单条 UPDATE 完成自增，并发访问不会丢失计数
        let result = url_record::Entity::update_many()
            .col_expr(
                url_record::Column::AccessCount,
                Expr::col(url_record::Column::AccessCount).add(1i64),
            )
            .col_expr(url_record::Column::LastAccessedAt, Expr::val(Utc::now()).into())
            .filter(url_record::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SnaplinkError::database_operation(format!("更新访问计数失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(SnaplinkError::not_found(format!("Record not found: {}", id)));
        }

        debug!("Access count incremented for record {}", id);
        Ok(())
    }

    async fn get_stats(&self, code: &str) -> Result<Option<UrlStats>> {
        Ok(self.lookup_by_code(code).await?.map(UrlStats::from))
    }
}

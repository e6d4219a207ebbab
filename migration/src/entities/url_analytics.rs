//! Access log entity, one row per successful redirect

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "url_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// References urls.id
    pub url_id: i64,
    pub accessed_at: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,
    pub ip_address: String,
    #[sea_orm(column_type = "Text")]
    pub referrer: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! 访问日志表迁移
//!
//! 每次成功跳转写入一行，记录：
//! - 访问时间
//! - 用户代理 (user_agent)
//! - IP 地址
//! - 来源 (referrer)

use sea_orm_migration::prelude::*;

use crate::m20261016_000001_urls_table::Urls;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UrlAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlAnalytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlAnalytics::UrlId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UrlAnalytics::AccessedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UrlAnalytics::UserAgent)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UrlAnalytics::IpAddress)
                            .string_len(45)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UrlAnalytics::Referrer)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_analytics_url_id")
                            .from(UrlAnalytics::Table, UrlAnalytics::UrlId)
                            .to(Urls::Table, Urls::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // url_id 索引（单链接查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_analytics_url_id")
                    .table(UrlAnalytics::Table)
                    .col(UrlAnalytics::UrlId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_url_analytics_url_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UrlAnalytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlAnalytics {
    Table,
    Id,
    UrlId,
    AccessedAt,
    UserAgent,
    IpAddress,
    Referrer,
}

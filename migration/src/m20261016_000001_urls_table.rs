use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 urls 表
        manager
            .create_table(urls_table(manager.get_database_backend()))
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_urls_created_at")
                    .table(Urls::Table)
                    .col(Urls::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_urls_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Urls::Table).to_owned())
            .await
    }
}

/// `urls` 表定义
///
/// Codes are case-sensitive. MySQL/MariaDB compare strings with a
/// case-insensitive collation by default, so the column gets a binary one.
fn urls_table(backend: DatabaseBackend) -> TableCreateStatement {
    let mut short_code = ColumnDef::new(Urls::ShortCode);
    short_code.string_len(16).not_null().unique_key();
    if matches!(backend, DatabaseBackend::MySql) {
        short_code.extra("COLLATE utf8mb4_bin");
    }

    Table::create()
        .table(Urls::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Urls::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(short_code)
        .col(ColumnDef::new(Urls::OriginalUrl).text().not_null())
        .col(
            ColumnDef::new(Urls::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Urls::AccessCount)
                .big_integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Urls::LastAccessedAt)
                .timestamp_with_time_zone()
                .null(),
        )
        .to_owned()
}

#[derive(DeriveIden)]
pub(crate) enum Urls {
    Table,
    Id,
    ShortCode,
    OriginalUrl,
    CreatedAt,
    AccessCount,
    LastAccessedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sql(backend: DatabaseBackend) -> String {
        backend.build(&urls_table(backend)).sql
    }

    #[test]
    fn test_mysql_short_code_is_binary_collated() {
        let sql = create_sql(DatabaseBackend::MySql);
        assert!(sql.contains("COLLATE utf8mb4_bin"), "{sql}");
    }

    #[test]
    fn test_other_backends_keep_default_collation() {
        for backend in [DatabaseBackend::Sqlite, DatabaseBackend::Postgres] {
            let sql = create_sql(backend);
            assert!(!sql.contains("COLLATE"), "{sql}");
            assert!(sql.contains("short_code"), "{sql}");
        }
    }
}

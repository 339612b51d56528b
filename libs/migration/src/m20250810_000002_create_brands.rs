use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(pk_uuid(Brands::Id))
                    .col(
                        ColumnDef::new(Brands::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(string(Brands::Status).default("active"))
                    .col(
                        timestamp_with_time_zone(Brands::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Pattern search path matches brand names case-insensitively
        manager
            .create_index(
                Index::create()
                    .name("idx_brands_name")
                    .table(Brands::Table)
                    .col(Brands::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
}

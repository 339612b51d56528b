use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string(Products::Title))
                    .col(text(Products::Description))
                    .col(double(Products::Price))
                    .col(double_null(Products::DiscountedPrice))
                    .col(json_binary(Products::Images).default(Expr::cust("'[]'::jsonb")))
                    .col(uuid_null(Products::CategoryId))
                    .col(uuid_null(Products::BrandId))
                    .col(uuid(Products::SellerId))
                    .col(double(Products::RatingsAverage).default(0.0))
                    .col(integer(Products::RatingsQuantity).default(0))
                    .col(integer(Products::Sold).default(0))
                    .col(boolean(Products::IsApproved).default(false))
                    .col(boolean(Products::IsActive).default(true))
                    .col(string(Products::Status).default("available"))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_brand")
                            .from(Products::Table, Products::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_seller")
                            .from(Products::Table, Products::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_brand_id")
                    .table(Products::Table)
                    .col(Products::BrandId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_seller_id")
                    .table(Products::Table)
                    .col(Products::SellerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_price")
                    .table(Products::Table)
                    .col(Products::Price)
                    .to_owned(),
            )
            .await?;

        // Full-text search index over title + description.
        // The search query builder probes pg_indexes for this name at startup.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_products_fulltext ON products
                    USING GIN (to_tsvector('english', title || ' ' || description))
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER products_touch_updated_at
                    BEFORE UPDATE ON products
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS products_touch_updated_at ON products")
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Title,
    Description,
    Price,
    DiscountedPrice,
    Images,
    CategoryId,
    BrandId,
    SellerId,
    RatingsAverage,
    RatingsQuantity,
    Sold,
    IsApproved,
    IsActive,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

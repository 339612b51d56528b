use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(pk_uuid(Complaints::Id))
                    .col(uuid(Complaints::UserId))
                    .col(uuid_null(Complaints::OrderId))
                    .col(string(Complaints::Subject))
                    .col(text(Complaints::Body))
                    .col(string(Complaints::Status).default("open"))
                    .col(text_null(Complaints::Resolution))
                    .col(
                        timestamp_with_time_zone(Complaints::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Complaints::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_user")
                            .from(Complaints::Table, Complaints::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_order")
                            .from(Complaints::Table, Complaints::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_user_id")
                    .table(Complaints::Table)
                    .col(Complaints::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_status")
                    .table(Complaints::Table)
                    .col(Complaints::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER complaints_touch_updated_at
                    BEFORE UPDATE ON complaints
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
            .execute_unprepared("DROP TRIGGER IF EXISTS complaints_touch_updated_at ON complaints")
            .await?;

        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    UserId,
    OrderId,
    Subject,
    Body,
    Status,
    Resolution,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

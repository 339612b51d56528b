use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{NotificationError, NotificationResult};
use crate::models::{CreateNotification, Notification};
use crate::repository::NotificationRepository;

fn internal(e: sea_orm::DbErr) -> NotificationError {
    NotificationError::Internal(format!("Database error: {}", e))
}

#[derive(Clone)]
pub struct PgNotificationRepository {
    db: DatabaseConnection,
}

impl PgNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification> {
        let notification = Notification::new(input);
        let active_model: entity::ActiveModel = (&notification).into();

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::debug!(notification_id = %model.id, user_id = %model.user_id, "Created notification");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> NotificationResult<(Vec<Notification>, u64)> {
        let total = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(internal)?;

        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn count_unread(&self, user_id: Uuid) -> NotificationResult<u64> {
        entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::Read.eq(false))
            .count(&self.db)
            .await
            .map_err(internal)
    }

    async fn mark_read(&self, id: Uuid) -> NotificationResult<Notification> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(NotificationError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.read = Set(true);

        let updated = active_model.update(&self.db).await.map_err(internal)?;
        Ok(updated.into())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> NotificationResult<u64> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Read, sea_orm::sea_query::Expr::value(true))
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> NotificationResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected > 0)
    }
}

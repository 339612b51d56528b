use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderStatus};
use crate::repository::OrderRepository;

fn internal(e: sea_orm::DbErr) -> OrderError {
    OrderError::Internal(format!("Database error: {}", e))
}

pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        let active_model: entity::ActiveModel = (&order).into();
        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(order_id = %model.id, total = model.total, "Created order");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
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
    ) -> OrderResult<(Vec<Order>, u64)> {
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

    async fn list_all(&self, skip: u64, limit: u64) -> OrderResult<(Vec<Order>, u64)> {
        let total = entity::Entity::find()
            .count(&self.db)
            .await
            .map_err(internal)?;

        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<Order> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(OrderError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.status = Set(status.to_string());
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model.update(&self.db).await.map_err(internal)?;

        tracing::info!(order_id = %id, status = %status, "Updated order status");
        Ok(updated.into())
    }
}

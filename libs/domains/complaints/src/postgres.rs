use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{ComplaintError, ComplaintResult};
use crate::models::{Complaint, ComplaintStatus};
use crate::repository::ComplaintRepository;

fn internal(e: sea_orm::DbErr) -> ComplaintError {
    ComplaintError::Internal(format!("Database error: {}", e))
}

pub struct PgComplaintRepository {
    db: DatabaseConnection,
}

impl PgComplaintRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ComplaintRepository for PgComplaintRepository {
    async fn create(&self, complaint: Complaint) -> ComplaintResult<Complaint> {
        let active_model: entity::ActiveModel = (&complaint).into();
        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(complaint_id = %model.id, "Filed complaint");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ComplaintResult<Option<Complaint>> {
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
    ) -> ComplaintResult<(Vec<Complaint>, u64)> {
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

    async fn list_all(
        &self,
        status: Option<ComplaintStatus>,
        skip: u64,
        limit: u64,
    ) -> ComplaintResult<(Vec<Complaint>, u64)> {
        let mut count_query = entity::Entity::find();
        let mut page_query = entity::Entity::find();
        if let Some(status) = status {
            count_query = count_query.filter(entity::Column::Status.eq(status.to_string()));
            page_query = page_query.filter(entity::Column::Status.eq(status.to_string()));
        }

        let total = count_query.count(&self.db).await.map_err(internal)?;

        let models = page_query
            .order_by_desc(entity::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
        resolution: Option<String>,
    ) -> ComplaintResult<Complaint> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(ComplaintError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.status = Set(status.to_string());
        if let Some(resolution) = resolution {
            active_model.resolution = Set(Some(resolution));
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model.update(&self.db).await.map_err(internal)?;

        tracing::info!(complaint_id = %id, status = %status, "Updated complaint status");
        Ok(updated.into())
    }
}

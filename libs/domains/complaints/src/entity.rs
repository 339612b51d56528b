use crate::models::{Complaint, ComplaintStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Option<Uuid>,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub resolution: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Complaint {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            order_id: model.order_id,
            subject: model.subject,
            body: model.body,
            status: ComplaintStatus::from_str(&model.status).unwrap_or_default(),
            resolution: model.resolution,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<&Complaint> for ActiveModel {
    fn from(complaint: &Complaint) -> Self {
        ActiveModel {
            id: Set(complaint.id),
            user_id: Set(complaint.user_id),
            order_id: Set(complaint.order_id),
            subject: Set(complaint.subject.clone()),
            body: Set(complaint.body.clone()),
            status: Set(complaint.status.to_string()),
            resolution: Set(complaint.resolution.clone()),
            created_at: Set(complaint.created_at.into()),
            updated_at: Set(complaint.updated_at.into()),
        }
    }
}

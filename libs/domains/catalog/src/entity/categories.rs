use crate::models::{Category, EntityStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: EntityStatus::from_str(&model.status).unwrap_or_default(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            status: Set(category.status.to_string()),
            created_at: Set(category.created_at.into()),
        }
    }
}

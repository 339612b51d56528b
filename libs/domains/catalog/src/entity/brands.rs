use crate::models::{Brand, EntityStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brands")]
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

impl From<Model> for Brand {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: EntityStatus::from_str(&model.status).unwrap_or_default(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<&Brand> for ActiveModel {
    fn from(brand: &Brand) -> Self {
        ActiveModel {
            id: Set(brand.id),
            name: Set(brand.name.clone()),
            status: Set(brand.status.to_string()),
            created_at: Set(brand.created_at.into()),
        }
    }
}

use crate::models::{Notification, NotificationKind};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Notification {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            body: model.body,
            kind: NotificationKind::from_str(&model.kind).unwrap_or_default(),
            read: model.read,
            created_at: model.created_at.into(),
        }
    }
}

impl From<&Notification> for ActiveModel {
    fn from(notification: &Notification) -> Self {
        ActiveModel {
            id: Set(notification.id),
            user_id: Set(notification.user_id),
            title: Set(notification.title.clone()),
            body: Set(notification.body.clone()),
            kind: Set(notification.kind.to_string()),
            read: Set(notification.read),
            created_at: Set(notification.created_at.into()),
        }
    }
}

use crate::models::{Order, OrderItem, OrderStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Json,
    pub total: f64,
    pub status: String,
    pub shipping_address: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        let items: Vec<OrderItem> = serde_json::from_value(model.items.clone()).unwrap_or_default();

        Self {
            id: model.id,
            user_id: model.user_id,
            items,
            total: model.total,
            status: OrderStatus::from_str(&model.status).unwrap_or_default(),
            shipping_address: model.shipping_address,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<&Order> for ActiveModel {
    fn from(order: &Order) -> Self {
        ActiveModel {
            id: Set(order.id),
            user_id: Set(order.user_id),
            items: Set(serde_json::json!(order.items)),
            total: Set(order.total),
            status: Set(order.status.to_string()),
            shipping_address: Set(order.shipping_address.clone()),
            created_at: Set(order.created_at.into()),
            updated_at: Set(order.updated_at.into()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Legal forward transitions. Cancellation is handled separately and
    /// is only allowed while pending.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Paid, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

/// Snapshot of a product at order time. Later edits to the product do not
/// rewrite order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub title: String,
    /// Unit price charged (discounted price when one was set)
    pub price: f64,
    pub quantity: u32,
}

/// Customer order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Requested line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItem {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: u32,
}

/// DTO for placing an order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(length(min = 1, max = 100), nested)]
    pub items: Vec<CreateOrderItem>,
    pub shipping_address: Option<serde_json::Value>,
}

/// DTO for an admin status change
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

impl Order {
    pub fn new(
        user_id: Uuid,
        items: Vec<OrderItem>,
        shipping_address: Option<serde_json::Value>,
    ) -> Self {
        let total = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            user_id,
            items,
            total,
            status: OrderStatus::Pending,
            shipping_address,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_item_lines() {
        let order = Order::new(
            Uuid::now_v7(),
            vec![
                OrderItem {
                    product_id: Uuid::now_v7(),
                    title: "Mug".to_string(),
                    price: 8.0,
                    quantity: 2,
                },
                OrderItem {
                    product_id: Uuid::now_v7(),
                    title: "Poster".to_string(),
                    price: 12.5,
                    quantity: 1,
                },
            ],
            None,
        );

        assert_eq!(order.total, 28.5);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_nested_item_validation_reports_bad_quantity() {
        let order = CreateOrder {
            items: vec![CreateOrderItem {
                product_id: Uuid::now_v7(),
                quantity: 0,
            }],
            shipping_address: None,
        };

        assert!(order.validate().is_err());

        let order = CreateOrder {
            items: Vec::new(),
            shipping_address: None,
        };
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Paid));
    }
}

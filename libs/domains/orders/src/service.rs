use axum_helpers::{AuthUser, PageQuery};
use domain_catalog::repository::ProductRepository;
use domain_notifications::{CreateNotification, NotificationKind, NotificationSink};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderItem, OrderStatus, UpdateOrderStatus};
use crate::repository::OrderRepository;

/// Service layer for order business logic
#[derive(Clone)]
pub struct OrderService<R: OrderRepository, P: ProductRepository> {
    repository: Arc<R>,
    products: Arc<P>,
    notifications: Arc<dyn NotificationSink>,
}

impl<R: OrderRepository, P: ProductRepository> OrderService<R, P> {
    pub fn new(repository: R, products: Arc<P>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            repository: Arc::new(repository),
            products,
            notifications,
        }
    }

    /// Place an order. Product titles and prices are snapshotted into the
    /// order items so later catalog edits do not rewrite history.
    pub async fn create_order(&self, input: CreateOrder, caller: &AuthUser) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let product = self
                .products
                .get_by_id(line.product_id)
                .await
                .map_err(|e| OrderError::Internal(e.to_string()))?
                .filter(|p| p.is_visible())
                .ok_or(OrderError::ProductUnavailable(line.product_id))?;

            items.push(OrderItem {
                product_id: product.id,
                title: product.title,
                price: product.discounted_price.unwrap_or(product.price),
                quantity: line.quantity,
            });
        }

        let order = self
            .repository
            .create(Order::new(caller.id, items, input.shipping_address))
            .await?;

        self.notifications
            .notify(CreateNotification {
                user_id: caller.id,
                title: "Order placed".to_string(),
                body: format!("Order {} was placed, total {:.2}", order.id, order.total),
                kind: NotificationKind::Order,
            })
            .await;

        Ok(order)
    }

    /// List orders: admins see everything, everyone else their own.
    pub async fn list_orders(
        &self,
        caller: &AuthUser,
        page: &PageQuery,
    ) -> OrderResult<(Vec<Order>, u64)> {
        if caller.is_admin() {
            self.repository.list_all(page.skip(), page.limit()).await
        } else {
            self.repository
                .list_by_user(caller.id, page.skip(), page.limit())
                .await
        }
    }

    /// Get an order as its owner or an admin.
    pub async fn get_order(&self, id: Uuid, caller: &AuthUser) -> OrderResult<Order> {
        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if !caller.can_access(order.user_id) {
            return Err(OrderError::Forbidden(id));
        }

        Ok(order)
    }

    /// Move an order through its lifecycle (admin only). Illegal jumps are
    /// rejected with a conflict.
    pub async fn update_status(
        &self,
        id: Uuid,
        input: UpdateOrderStatus,
        caller: &AuthUser,
    ) -> OrderResult<Order> {
        caller
            .require_admin()
            .map_err(|_| OrderError::Forbidden(id))?;

        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if !order.status.can_transition_to(input.status) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: input.status,
            });
        }

        let updated = self.repository.update_status(id, input.status).await?;

        self.notifications
            .notify(CreateNotification {
                user_id: updated.user_id,
                title: format!("Order {}", updated.status),
                body: format!("Order {} is now {}", updated.id, updated.status),
                kind: NotificationKind::Order,
            })
            .await;

        Ok(updated)
    }

    /// Cancel an order as its owner, only while it is still pending.
    pub async fn cancel_order(&self, id: Uuid, caller: &AuthUser) -> OrderResult<Order> {
        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if order.user_id != caller.id {
            return Err(OrderError::Forbidden(id));
        }

        if order.status != OrderStatus::Pending {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }

        let cancelled = self
            .repository
            .update_status(id, OrderStatus::Cancelled)
            .await?;

        self.notifications
            .notify(CreateNotification {
                user_id: cancelled.user_id,
                title: "Order cancelled".to_string(),
                body: format!("Order {} was cancelled", cancelled.id),
                kind: NotificationKind::Order,
            })
            .await;

        Ok(cancelled)
    }
}

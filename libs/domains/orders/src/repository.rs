use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderStatus};

/// Repository trait for order persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a fully assembled order (snapshots and total precomputed).
    async fn create(&self, order: Order) -> OrderResult<Order>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> OrderResult<(Vec<Order>, u64)>;

    async fn list_all(&self, skip: u64, limit: u64) -> OrderResult<(Vec<Order>, u64)>;

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<Order>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, total = order.total, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> OrderResult<(Vec<Order>, u64)> {
        let orders = self.orders.read().await;

        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u64;
        let page = result
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn list_all(&self, skip: u64, limit: u64) -> OrderResult<(Vec<Order>, u64)> {
        let orders = self.orders.read().await;

        let mut result: Vec<Order> = orders.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u64;
        let page = result
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;

        order.status = status;
        order.updated_at = chrono::Utc::now();

        tracing::info!(order_id = %id, status = %status, "Updated order status");
        Ok(order.clone())
    }
}

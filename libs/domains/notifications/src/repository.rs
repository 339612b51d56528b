use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{NotificationError, NotificationResult};
use crate::models::{CreateNotification, Notification};

/// Repository trait for notification persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification>;

    async fn get_by_id(&self, id: Uuid) -> NotificationResult<Option<Notification>>;

    /// List a user's notifications, newest first, with the total count.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> NotificationResult<(Vec<Notification>, u64)>;

    async fn count_unread(&self, user_id: Uuid) -> NotificationResult<u64>;

    async fn mark_read(&self, id: Uuid) -> NotificationResult<Notification>;

    /// Returns the number of notifications flipped to read.
    async fn mark_all_read(&self, user_id: Uuid) -> NotificationResult<u64>;

    async fn delete(&self, id: Uuid) -> NotificationResult<bool>;
}

/// In-memory implementation of NotificationRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification> {
        let mut notifications = self.notifications.write().await;
        let notification = Notification::new(input);
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn get_by_id(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> NotificationResult<(Vec<Notification>, u64)> {
        let notifications = self.notifications.read().await;

        let mut result: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
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

    async fn count_unread(&self, user_id: Uuid) -> NotificationResult<u64> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.read)
            .count() as u64)
    }

    async fn mark_read(&self, id: Uuid) -> NotificationResult<Notification> {
        let mut notifications = self.notifications.write().await;
        let notification = notifications
            .get_mut(&id)
            .ok_or(NotificationError::NotFound(id))?;

        notification.read = true;
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> NotificationResult<u64> {
        let mut notifications = self.notifications.write().await;

        let mut flipped = 0;
        for notification in notifications.values_mut() {
            if notification.user_id == user_id && !notification.read {
                notification.read = true;
                flipped += 1;
            }
        }

        Ok(flipped)
    }

    async fn delete(&self, id: Uuid) -> NotificationResult<bool> {
        let mut notifications = self.notifications.write().await;
        Ok(notifications.remove(&id).is_some())
    }
}

use async_trait::async_trait;
use axum_helpers::{AuthUser, PageQuery};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{NotificationError, NotificationResult};
use crate::models::{CreateNotification, Notification};
use crate::repository::NotificationRepository;

/// Outbound port for other domains that raise notifications.
///
/// Infallible at the call site: a failed write is logged, never surfaced,
/// so order and complaint flows cannot break on notification persistence.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, input: CreateNotification);
}

/// Service layer for notification business logic
#[derive(Clone)]
pub struct NotificationService<R: NotificationRepository> {
    repository: Arc<R>,
}

impl<R: NotificationRepository> NotificationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List the caller's notifications with the total and unread counts.
    pub async fn list_for_user(
        &self,
        caller: &AuthUser,
        page: &PageQuery,
    ) -> NotificationResult<(Vec<Notification>, u64, u64)> {
        let (notifications, total) = self
            .repository
            .list_by_user(caller.id, page.skip(), page.limit())
            .await?;
        let unread = self.repository.count_unread(caller.id).await?;

        Ok((notifications, total, unread))
    }

    /// Mark one of the caller's notifications as read.
    ///
    /// Another user's notification is reported as missing rather than
    /// forbidden, so ids cannot be probed.
    pub async fn mark_read(&self, id: Uuid, caller: &AuthUser) -> NotificationResult<Notification> {
        let notification = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        if notification.user_id != caller.id {
            return Err(NotificationError::NotFound(id));
        }

        self.repository.mark_read(id).await
    }

    /// Mark all of the caller's notifications as read.
    pub async fn mark_all_read(&self, caller: &AuthUser) -> NotificationResult<u64> {
        self.repository.mark_all_read(caller.id).await
    }

    /// Delete one of the caller's notifications.
    pub async fn delete(&self, id: Uuid, caller: &AuthUser) -> NotificationResult<()> {
        let notification = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        if notification.user_id != caller.id {
            return Err(NotificationError::NotFound(id));
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(NotificationError::NotFound(id));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: NotificationRepository> NotificationSink for NotificationService<R> {
    async fn notify(&self, input: CreateNotification) {
        if let Err(e) = input.validate() {
            tracing::warn!("Dropping malformed notification: {}", e);
            return;
        }

        if let Err(e) = self.repository.create(input).await {
            tracing::warn!("Failed to persist notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use crate::repository::MockNotificationRepository;
    use axum_helpers::Role;

    fn user(id: Uuid) -> AuthUser {
        AuthUser {
            id,
            role: Role::User,
        }
    }

    fn sample_notification(user_id: Uuid) -> Notification {
        Notification::new(CreateNotification {
            user_id,
            title: "Order delivered".to_string(),
            body: "Enjoy!".to_string(),
            kind: NotificationKind::Order,
        })
    }

    #[tokio::test]
    async fn test_mark_read_rejects_foreign_notification() {
        let owner_id = Uuid::now_v7();
        let notification = sample_notification(owner_id);
        let notification_id = notification.id;

        let mut mock_repo = MockNotificationRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(notification.clone())));

        let service = NotificationService::new(mock_repo);
        let stranger = user(Uuid::now_v7());

        let result = service.mark_read(notification_id, &stranger).await;
        assert!(matches!(result, Err(NotificationError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sink_swallows_repository_errors() {
        let mut mock_repo = MockNotificationRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(NotificationError::Internal("connection lost".to_string())));

        let service = NotificationService::new(mock_repo);

        // Must not panic or propagate
        service
            .notify(CreateNotification {
                user_id: Uuid::now_v7(),
                title: "Hello".to_string(),
                body: "World".to_string(),
                kind: NotificationKind::System,
            })
            .await;
    }

    #[test]
    fn test_service_over_postgres_is_clone_for_shared_wiring() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<NotificationService<crate::postgres::PgNotificationRepository>>();
    }

    #[tokio::test]
    async fn test_list_includes_unread_count() {
        let caller_id = Uuid::now_v7();
        let notification = sample_notification(caller_id);

        let mut mock_repo = MockNotificationRepository::new();
        mock_repo
            .expect_list_by_user()
            .returning(move |_, _, _| Ok((vec![notification.clone()], 1)));
        mock_repo.expect_count_unread().returning(|_| Ok(1));

        let service = NotificationService::new(mock_repo);
        let caller = user(caller_id);

        let (list, total, unread) = service
            .list_for_user(&caller, &PageQuery::default())
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(total, 1);
        assert_eq!(unread, 1);
    }
}

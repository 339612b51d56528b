use axum_helpers::{AuthUser, PageQuery};
use domain_notifications::{CreateNotification, NotificationKind, NotificationSink};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ComplaintError, ComplaintResult};
use crate::models::{Complaint, ComplaintStatus, CreateComplaint, UpdateComplaintStatus};
use crate::repository::ComplaintRepository;

/// Service layer for complaint business logic
#[derive(Clone)]
pub struct ComplaintService<R: ComplaintRepository> {
    repository: Arc<R>,
    notifications: Arc<dyn NotificationSink>,
}

impl<R: ComplaintRepository> ComplaintService<R> {
    pub fn new(repository: R, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            repository: Arc::new(repository),
            notifications,
        }
    }

    /// File a complaint on behalf of the caller.
    pub async fn create_complaint(
        &self,
        input: CreateComplaint,
        caller: &AuthUser,
    ) -> ComplaintResult<Complaint> {
        input
            .validate()
            .map_err(|e| ComplaintError::Validation(e.to_string()))?;

        self.repository
            .create(Complaint::new(caller.id, input))
            .await
    }

    /// List complaints: admins see everything (optionally filtered by
    /// status), everyone else their own.
    pub async fn list_complaints(
        &self,
        caller: &AuthUser,
        status: Option<ComplaintStatus>,
        page: &PageQuery,
    ) -> ComplaintResult<(Vec<Complaint>, u64)> {
        if caller.is_admin() {
            self.repository
                .list_all(status, page.skip(), page.limit())
                .await
        } else {
            self.repository
                .list_by_user(caller.id, page.skip(), page.limit())
                .await
        }
    }

    /// Get a complaint as its owner or an admin.
    pub async fn get_complaint(&self, id: Uuid, caller: &AuthUser) -> ComplaintResult<Complaint> {
        let complaint = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ComplaintError::NotFound(id))?;

        if !caller.can_access(complaint.user_id) {
            return Err(ComplaintError::Forbidden(id));
        }

        Ok(complaint)
    }

    /// Triage or close a complaint (admin only). The complainant is told
    /// about every status change.
    pub async fn update_status(
        &self,
        id: Uuid,
        input: UpdateComplaintStatus,
        caller: &AuthUser,
    ) -> ComplaintResult<Complaint> {
        caller
            .require_admin()
            .map_err(|_| ComplaintError::Forbidden(id))?;

        let complaint = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ComplaintError::NotFound(id))?;

        if !complaint.status.can_transition_to(input.status) {
            return Err(ComplaintError::InvalidTransition {
                from: complaint.status,
                to: input.status,
            });
        }

        let updated = self
            .repository
            .update_status(id, input.status, input.resolution)
            .await?;

        self.notifications
            .notify(CreateNotification {
                user_id: updated.user_id,
                title: format!("Complaint {}", updated.status),
                body: updated
                    .resolution
                    .clone()
                    .unwrap_or_else(|| format!("Complaint {} is now {}", updated.id, updated.status)),
                kind: NotificationKind::Complaint,
            })
            .await;

        Ok(updated)
    }
}

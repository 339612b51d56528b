use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ComplaintError, ComplaintResult};
use crate::models::{Complaint, ComplaintStatus};

/// Repository trait for complaint persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create(&self, complaint: Complaint) -> ComplaintResult<Complaint>;

    async fn get_by_id(&self, id: Uuid) -> ComplaintResult<Option<Complaint>>;

    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> ComplaintResult<(Vec<Complaint>, u64)>;

    async fn list_all(
        &self,
        status: Option<ComplaintStatus>,
        skip: u64,
        limit: u64,
    ) -> ComplaintResult<(Vec<Complaint>, u64)>;

    /// Set the status, and the resolution text when one is provided.
    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
        resolution: Option<String>,
    ) -> ComplaintResult<Complaint>;
}

/// In-memory implementation of ComplaintRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryComplaintRepository {
    complaints: Arc<RwLock<HashMap<Uuid, Complaint>>>,
}

impl InMemoryComplaintRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn create(&self, complaint: Complaint) -> ComplaintResult<Complaint> {
        let mut complaints = self.complaints.write().await;
        complaints.insert(complaint.id, complaint.clone());

        tracing::info!(complaint_id = %complaint.id, "Filed complaint");
        Ok(complaint)
    }

    async fn get_by_id(&self, id: Uuid) -> ComplaintResult<Option<Complaint>> {
        let complaints = self.complaints.read().await;
        Ok(complaints.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> ComplaintResult<(Vec<Complaint>, u64)> {
        let complaints = self.complaints.read().await;

        let mut result: Vec<Complaint> = complaints
            .values()
            .filter(|c| c.user_id == user_id)
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

    async fn list_all(
        &self,
        status: Option<ComplaintStatus>,
        skip: u64,
        limit: u64,
    ) -> ComplaintResult<(Vec<Complaint>, u64)> {
        let complaints = self.complaints.read().await;

        let mut result: Vec<Complaint> = complaints
            .values()
            .filter(|c| status.is_none_or(|s| c.status == s))
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

    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
        resolution: Option<String>,
    ) -> ComplaintResult<Complaint> {
        let mut complaints = self.complaints.write().await;
        let complaint = complaints.get_mut(&id).ok_or(ComplaintError::NotFound(id))?;

        complaint.status = status;
        if resolution.is_some() {
            complaint.resolution = resolution;
        }
        complaint.updated_at = chrono::Utc::now();

        tracing::info!(complaint_id = %id, status = %status, "Updated complaint status");
        Ok(complaint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateComplaint;

    fn complaint(user_id: Uuid) -> Complaint {
        Complaint::new(
            user_id,
            CreateComplaint {
                order_id: None,
                subject: "Wrong item".to_string(),
                body: "Received a different model".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_list_by_user_scopes_to_owner() {
        let repo = InMemoryComplaintRepository::new();
        let owner = Uuid::now_v7();
        repo.create(complaint(owner)).await.unwrap();
        repo.create(complaint(Uuid::now_v7())).await.unwrap();

        let (page, total) = repo.list_by_user(owner, 0, 20).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].user_id, owner);
    }

    #[tokio::test]
    async fn test_list_all_filters_by_status() {
        let repo = InMemoryComplaintRepository::new();
        let first = repo.create(complaint(Uuid::now_v7())).await.unwrap();
        repo.create(complaint(Uuid::now_v7())).await.unwrap();

        repo.update_status(first.id, ComplaintStatus::InReview, None)
            .await
            .unwrap();

        let (page, total) = repo
            .list_all(Some(ComplaintStatus::InReview), 0, 20)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].id, first.id);

        let (_, all) = repo.list_all(None, 0, 20).await.unwrap();
        assert_eq!(all, 2);
    }

    #[tokio::test]
    async fn test_update_status_keeps_resolution_when_absent() {
        let repo = InMemoryComplaintRepository::new();
        let filed = repo.create(complaint(Uuid::now_v7())).await.unwrap();

        repo.update_status(
            filed.id,
            ComplaintStatus::InReview,
            Some("Escalated to support".to_string()),
        )
        .await
        .unwrap();

        let updated = repo
            .update_status(filed.id, ComplaintStatus::Resolved, None)
            .await
            .unwrap();
        assert_eq!(updated.resolution.as_deref(), Some("Escalated to support"));
    }
}

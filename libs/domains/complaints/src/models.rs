use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Complaint lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Open,
    InReview,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    /// Legal lifecycle moves. A complaint is triaged before it is closed,
    /// and closed complaints never reopen.
    pub fn can_transition_to(self, next: ComplaintStatus) -> bool {
        matches!(
            (self, next),
            (ComplaintStatus::Open, ComplaintStatus::InReview)
                | (ComplaintStatus::InReview, ComplaintStatus::Resolved)
                | (ComplaintStatus::InReview, ComplaintStatus::Rejected)
        )
    }

    pub fn is_closed(self) -> bool {
        matches!(self, ComplaintStatus::Resolved | ComplaintStatus::Rejected)
    }
}

/// A user complaint, optionally tied to an order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Option<Uuid>,
    pub subject: String,
    pub body: String,
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for filing a complaint
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComplaint {
    pub order_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

/// DTO for moving a complaint through its lifecycle (admin)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateComplaintStatus {
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
}

impl Complaint {
    pub fn new(user_id: Uuid, input: CreateComplaint) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            order_id: input.order_id,
            subject: input.subject,
            body: input.body,
            status: ComplaintStatus::Open,
            resolution: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triage_transitions() {
        assert!(ComplaintStatus::Open.can_transition_to(ComplaintStatus::InReview));
        assert!(ComplaintStatus::InReview.can_transition_to(ComplaintStatus::Resolved));
        assert!(ComplaintStatus::InReview.can_transition_to(ComplaintStatus::Rejected));
    }

    #[test]
    fn test_closed_complaints_never_reopen() {
        for closed in [ComplaintStatus::Resolved, ComplaintStatus::Rejected] {
            assert!(closed.is_closed());
            assert!(!closed.can_transition_to(ComplaintStatus::Open));
            assert!(!closed.can_transition_to(ComplaintStatus::InReview));
        }
        // resolution requires triage first
        assert!(!ComplaintStatus::Open.can_transition_to(ComplaintStatus::Resolved));
    }

    #[test]
    fn test_new_complaint_starts_open() {
        let complaint = Complaint::new(
            Uuid::now_v7(),
            CreateComplaint {
                order_id: None,
                subject: "Damaged packaging".to_string(),
                body: "The box arrived crushed".to_string(),
            },
        );
        assert_eq!(complaint.status, ComplaintStatus::Open);
        assert!(complaint.resolution.is_none());
    }
}

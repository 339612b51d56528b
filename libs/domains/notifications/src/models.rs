use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Source domain of a notification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Product,
    Complaint,
    #[default]
    System,
}

/// In-app notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a notification (internal; produced by other domains)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNotification {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
    #[serde(default)]
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(input: CreateNotification) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            title: input.title,
            body: input.body,
            kind: input.kind,
            read: false,
            created_at: Utc::now(),
        }
    }
}

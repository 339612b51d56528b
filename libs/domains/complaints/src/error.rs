use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ComplaintStatus;

#[derive(Debug, Error)]
pub enum ComplaintError {
    #[error("Complaint not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Cannot move complaint from {from} to {to}")]
    InvalidTransition {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    #[error("Access denied to complaint {0}")]
    Forbidden(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ComplaintResult<T> = Result<T, ComplaintError>;

impl From<ComplaintError> for AppError {
    fn from(err: ComplaintError) -> Self {
        match err {
            ComplaintError::NotFound(id) => {
                AppError::NotFound(format!("Complaint {} not found", id))
            }
            ComplaintError::Validation(msg) => AppError::BadRequest(msg),
            ComplaintError::InvalidTransition { from, to } => {
                AppError::Conflict(format!("Cannot move complaint from {} to {}", from, to))
            }
            ComplaintError::Forbidden(id) => {
                AppError::Forbidden(format!("Access denied to complaint {}", id))
            }
            ComplaintError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ComplaintError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

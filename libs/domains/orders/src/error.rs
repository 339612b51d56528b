use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::OrderStatus;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Product unavailable: {0}")]
    ProductUnavailable(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Access denied to order {0}")]
    Forbidden(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::ProductUnavailable(id) => {
                AppError::BadRequest(format!("Product {} is not available", id))
            }
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::InvalidTransition { from, to } => {
                AppError::Conflict(format!("Cannot move order from {} to {}", from, to))
            }
            OrderError::Forbidden(id) => {
                AppError::Forbidden(format!("Access denied to order {}", id))
            }
            OrderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

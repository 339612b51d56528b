use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The store refused or cannot run a full-text query. The executor
    /// retries these once on the pattern path.
    #[error("Full-text search is not available")]
    TextSearchUnsupported,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(msg) => AppError::BadRequest(msg),
            SearchError::TextSearchUnsupported => {
                AppError::InternalServerError("Search is temporarily unavailable".to_string())
            }
            SearchError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

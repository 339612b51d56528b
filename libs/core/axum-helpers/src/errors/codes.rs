//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error codes used across the application.
//! Each code carries a string identifier for clients, an integer code for
//! logging and monitoring, and a default human-readable message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in path or query parameter
    InvalidUuid,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// Authenticated user lacks sufficient permissions
    Forbidden,

    /// Request conflicts with current resource state
    Conflict,

    // Server errors (1900s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Database query returned no results
    DatabaseNotFound,

    /// Database connection or query error
    DatabaseError,

    /// Database migration failed
    MigrationError,
}

impl ErrorCode {
    /// String identifier for client consumption
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseNotFound => "DATABASE_NOT_FOUND",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::MigrationError => "MIGRATION_ERROR",
        }
    }

    /// Integer code for logging and monitoring
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidUuid => 1002,
            ErrorCode::JsonExtraction => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::Unauthorized => 1005,
            ErrorCode::Forbidden => 1006,
            ErrorCode::Conflict => 1007,
            ErrorCode::InternalError => 1900,
            ErrorCode::ServiceUnavailable => 1901,
            ErrorCode::DatabaseNotFound => 2001,
            ErrorCode::DatabaseError => 2002,
            ErrorCode::MigrationError => 2003,
        }
    }

    /// Default human-readable message
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::JsonExtraction => "Invalid JSON in request body",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Unauthorized => "Authentication required",
            ErrorCode::Forbidden => "Access forbidden",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::DatabaseNotFound => "Requested record not found",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::MigrationError => "Database migration failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_identifiers() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(
            ErrorCode::ValidationError.default_message(),
            "Request validation failed"
        );
    }

    #[test]
    fn test_error_code_ranges() {
        // Client errors stay in the 1000s, database errors in the 2000s
        assert!(ErrorCode::NotFound.code() < 2000);
        assert!(ErrorCode::DatabaseError.code() >= 2000);
    }
}

//! # Axum Helpers
//!
//! Shared utilities for the marketplace HTTP services.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//! - **[`pagination`]**: Page/limit query parsing and pagination metadata
//! - **[`auth`]**: JWT bearer verification and role guards
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: Cross-cutting middleware (CORS, security headers)

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export pagination helpers
pub use pagination::{PageQuery, Pagination};

// Re-export auth types
pub use auth::{authenticate, authenticate_optional, AuthUser, JwtClaims, JwtVerifier, Role};

// Re-export server types
pub use server::{
    close_postgres, close_redis, create_app, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

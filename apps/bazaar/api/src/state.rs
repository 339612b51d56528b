use axum_helpers::JwtVerifier;
use redis::aio::ConnectionManager;
use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state. Domain routers extract what they need and hold
/// their own Arc-wrapped services; this struct only carries connections and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub redis: Option<ConnectionManager>,
    pub verifier: JwtVerifier,
    /// Resolved once at startup from the search repository's index probe.
    pub supports_text_search: bool,
}

//! Application-specific health check handlers with real database/redis checks.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

/// Readiness check endpoint that actually checks service dependencies.
///
/// Redis is optional (the search cache degrades to in-process only), so it
/// participates in the readiness report only when configured.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            state
                .db
                .ping()
                .await
                .map_err(|e| format!("Database ping failed: {}", e))
        }),
    )];

    if let Some(redis) = state.redis.clone() {
        checks.push((
            "redis",
            Box::pin(async move {
                let mut redis = redis;
                redis::cmd("PING")
                    .query_async::<String>(&mut redis)
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("Redis ping failed: {}", e))
            }),
        ));
    }

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

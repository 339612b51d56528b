use redis::aio::ConnectionManager;

use crate::common::{DatabaseError, DatabaseResult};

/// Check Redis health with a PING round trip
pub async fn check_health(manager: &ConnectionManager) -> DatabaseResult<()> {
    let mut conn = manager.clone();
    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::common::{DatabaseError, DatabaseResult};

/// Check database health with a trivial round-trip query
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await
    .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}

//! Datastore liveness probe

use async_trait::async_trait;
use sqlx::PgPool;

use dineflow_core::error::DomainError;
use dineflow_core::repositories::HealthCheck;

use super::map_db_error;

pub struct PgHealthCheck {
    pool: PgPool,
}

impl PgHealthCheck {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for PgHealthCheck {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("pinging database", e))?;
        Ok(())
    }
}

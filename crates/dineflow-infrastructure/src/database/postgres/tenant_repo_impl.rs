// ============================================================================
// DineFlow Infrastructure - PostgreSQL Tenant Repository
// File: crates/dineflow-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use dineflow_core::domain::Tenant;
use dineflow_core::error::DomainError;
use dineflow_core::repositories::TenantRepository;

use super::map_db_error;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub allowed_origins: Vec<String>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            is_active: row.is_active,
            is_verified: row.is_verified,
            allowed_origins: row.allowed_origins,
        }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, is_active, is_verified, allowed_origins
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("finding tenant by id", e))?;

        Ok(row.map(|r| r.into()))
    }
}

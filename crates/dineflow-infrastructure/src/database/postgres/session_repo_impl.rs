// ============================================================================
// DineFlow Infrastructure - PostgreSQL Session Repository
// File: crates/dineflow-infrastructure/src/database/postgres/session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use dineflow_core::domain::Session;
use dineflow_core::error::DomainError;
use dineflow_core::repositories::SessionRepository;

use super::map_db_error;

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub token_hash: String,
    pub origin: Option<String>,
    pub locale: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            tenant_id: row.tenant_id,
            token_hash: row.token_hash,
            origin: row.origin,
            locale: row.locale,
            created_at: row.created_at,
            last_seen_at: row.last_seen_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, DomainError> {
        let row: SessionRow = sqlx::query_as(
            r#"
            INSERT INTO widget_sessions (
                id, tenant_id, token_hash, origin, locale, created_at, last_seen_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, tenant_id, token_hash, origin, locale, created_at, last_seen_at
            "#,
        )
        .bind(session.id)
        .bind(session.tenant_id)
        .bind(&session.token_hash)
        .bind(&session.origin)
        .bind(&session.locale)
        .bind(session.created_at)
        .bind(session.last_seen_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("creating session", e))?;

        debug!("Session stored: {}", row.id);
        Ok(row.into())
    }

    async fn find_by_token(&self, tenant_id: &Uuid, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, token_hash, origin, locale, created_at, last_seen_at
            FROM widget_sessions
            WHERE tenant_id = $1 AND token_hash = $2
            "#,
        )
        .bind(tenant_id)
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("finding session by token", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn touch(&self, id: &Uuid, seen_at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE widget_sessions SET last_seen_at = $2 WHERE id = $1")
            .bind(id)
            .bind(seen_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("touching session", e))?;

        Ok(())
    }
}

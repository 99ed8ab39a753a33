// ============================================================================
// DineFlow Infrastructure - PostgreSQL Menu Repository
// File: crates/dineflow-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use dineflow_core::domain::MenuItem;
use dineflow_core::error::DomainError;
use dineflow_core::repositories::MenuRepository;

use super::map_db_error;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub menu: Option<String>,
    pub section: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub tags: Vec<String>,
    pub is_available: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            tenant_id: row.tenant_id,
            menu: row.menu,
            section: row.section,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            currency: row.currency.trim_end().to_string(),
            tags: row.tags,
            is_available: row.is_available,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn list_items(
        &self,
        tenant_id: &Uuid,
        menu: Option<String>,
        available_only: bool,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, tenant_id, menu, section, name, description,
                price_cents, currency, tags, is_available, version,
                created_at, updated_at
            FROM menu_items
            WHERE tenant_id = $1
              AND ($2::TEXT IS NULL OR menu = $2)
              AND (NOT $3 OR is_available)
            ORDER BY created_at, id
            "#,
        )
        .bind(tenant_id)
        .bind(menu)
        .bind(available_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("listing menu items", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_item(&self, tenant_id: &Uuid, item_id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, tenant_id, menu, section, name, description,
                price_cents, currency, tags, is_available, version,
                created_at, updated_at
            FROM menu_items
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("finding menu item", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_item(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: MenuItemRow = sqlx::query_as(
            r#"
            INSERT INTO menu_items (
                id, tenant_id, menu, section, name, description,
                price_cents, currency, tags, is_available, version,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING
                id, tenant_id, menu, section, name, description,
                price_cents, currency, tags, is_available, version,
                created_at, updated_at
            "#,
        )
        .bind(item.id)
        .bind(item.tenant_id)
        .bind(&item.menu)
        .bind(&item.section)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(&item.currency)
        .bind(&item.tags)
        .bind(item.is_available)
        .bind(item.version)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("creating menu item", e))?;

        info!("Menu item stored: {}", row.id);
        Ok(row.into())
    }

    async fn update_item(&self, item: &MenuItem, expected_version: i32) -> Result<MenuItem, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            UPDATE menu_items
            SET
                name = $4,
                description = $5,
                price_cents = $6,
                currency = $7,
                tags = $8,
                is_available = $9,
                version = $10,
                updated_at = $11
            WHERE id = $1 AND tenant_id = $2 AND version = $3
            RETURNING
                id, tenant_id, menu, section, name, description,
                price_cents, currency, tags, is_available, version,
                created_at, updated_at
            "#,
        )
        .bind(item.id)
        .bind(item.tenant_id)
        .bind(expected_version)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(&item.currency)
        .bind(&item.tags)
        .bind(item.is_available)
        .bind(item.version)
        .bind(item.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("updating menu item", e))?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                warn!("Menu item {} changed concurrently (expected version {})", item.id, expected_version);
                Err(DomainError::Conflict(format!(
                    "menu item {} is no longer at version {}",
                    item.id, expected_version
                )))
            }
        }
    }
}

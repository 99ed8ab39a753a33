// ============================================================================
// DineFlow Infrastructure - In-Memory Store
// File: crates/dineflow-infrastructure/src/database/memory.rs
// ============================================================================
//! Process-local implementation of every repository port. Used by the HTTP
//! integration tests and by `database.backend = "memory"` for local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use dineflow_core::domain::{MenuItem, Session, Tenant};
use dineflow_core::error::DomainError;
use dineflow_core::repositories::{HealthCheck, MenuRepository, SessionRepository, TenantRepository};

#[derive(Default)]
struct Tables {
    tenants: RwLock<HashMap<Uuid, Tenant>>,
    sessions: RwLock<Vec<Session>>,
    /// Insertion order is menu order.
    items: RwLock<Vec<MenuItem>>,
}

/// Cheap to clone; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_tenant(&self, tenant: Tenant) {
        self.tables.tenants.write().await.insert(tenant.id, tenant);
    }

    /// Seeds an item without the duplicate-name check.
    pub async fn insert_item(&self, item: MenuItem) {
        self.tables.items.write().await.push(item);
    }

    pub async fn session_count(&self) -> usize {
        self.tables.sessions.read().await.len()
    }
}

fn same_slot(a: &MenuItem, b: &MenuItem) -> bool {
    a.id != b.id
        && a.tenant_id == b.tenant_id
        && a.menu == b.menu
        && a.name.to_lowercase() == b.name.to_lowercase()
}

#[async_trait]
impl TenantRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tables.tenants.read().await.get(id).cloned())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> Result<Session, DomainError> {
        let mut sessions = self.tables.sessions.write().await;
        if sessions
            .iter()
            .any(|s| s.tenant_id == session.tenant_id && s.token_hash == session.token_hash)
        {
            return Err(DomainError::Conflict("session token already issued".to_string()));
        }
        sessions.push(session.clone());
        debug!("Session stored in memory: {}", session.id);
        Ok(session.clone())
    }

    async fn find_by_token(&self, tenant_id: &Uuid, token_hash: &str) -> Result<Option<Session>, DomainError> {
        Ok(self
            .tables
            .sessions
            .read()
            .await
            .iter()
            .find(|s| s.tenant_id == *tenant_id && s.token_hash == token_hash)
            .cloned())
    }

    async fn touch(&self, id: &Uuid, seen_at: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(session) = self.tables.sessions.write().await.iter_mut().find(|s| s.id == *id) {
            session.last_seen_at = seen_at;
        }
        Ok(())
    }
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn list_items(
        &self,
        tenant_id: &Uuid,
        menu: Option<String>,
        available_only: bool,
    ) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self
            .tables
            .items
            .read()
            .await
            .iter()
            .filter(|item| item.tenant_id == *tenant_id)
            .filter(|item| menu.is_none() || item.menu == menu)
            .filter(|item| !available_only || item.is_available)
            .cloned()
            .collect())
    }

    async fn find_item(&self, tenant_id: &Uuid, item_id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        Ok(self
            .tables
            .items
            .read()
            .await
            .iter()
            .find(|item| item.tenant_id == *tenant_id && item.id == *item_id)
            .cloned())
    }

    async fn create_item(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut items = self.tables.items.write().await;
        if items.iter().any(|existing| same_slot(existing, item)) {
            return Err(DomainError::Conflict(format!("menu item {:?} already exists", item.name)));
        }
        items.push(item.clone());
        Ok(item.clone())
    }

    async fn update_item(&self, item: &MenuItem, expected_version: i32) -> Result<MenuItem, DomainError> {
        let mut items = self.tables.items.write().await;
        if items.iter().any(|existing| same_slot(existing, item)) {
            return Err(DomainError::Conflict(format!("menu item {:?} already exists", item.name)));
        }

        let stored = items
            .iter_mut()
            .find(|existing| existing.tenant_id == item.tenant_id && existing.id == item.id)
            .ok_or_else(|| DomainError::not_found("MenuItem", item.id))?;
        if stored.version != expected_version {
            return Err(DomainError::Conflict(format!(
                "menu item {} is no longer at version {}",
                item.id, expected_version
            )));
        }

        *stored = item.clone();
        Ok(item.clone())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

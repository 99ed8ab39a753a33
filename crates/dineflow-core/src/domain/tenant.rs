// ============================================================================
// DineFlow Core - Tenant Entity
// File: crates/dineflow-core/src/domain/tenant.rs
// Description: Restaurant account, the unit of data isolation
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant id that passed the canonical-form check in
/// [`crate::services::tenant_context::resolve_tenant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(Uuid);

impl TenantId {
    pub(crate) fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Restaurant account. Created at onboarding; read-only for the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub is_verified: bool,
    /// Widget origins permitted to call the public routes.
    /// Empty means every origin is permitted.
    pub allowed_origins: Vec<String>,
}

impl Tenant {
    pub fn is_origin_restricted(&self) -> bool {
        !self.allowed_origins.is_empty()
    }

    pub fn allows_origin(&self, candidate: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == candidate)
    }
}

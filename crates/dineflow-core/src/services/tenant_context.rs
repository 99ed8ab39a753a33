//! Tenant context resolution
//!
//! Pure syntax check of the tenant id a request claims to act for. Whether the
//! tenant exists is left to the operation that follows.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Tenant, TenantId};
use crate::error::DomainError;
use crate::repositories::TenantRepository;
use crate::validation::raw_str;

/// Canonical 8-4-4-4-12 form, RFC 4122 versions 1-5, variant `10xx`.
static CANONICAL_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("canonical uuid pattern compiles")
});

const MAX_ECHOED_ID_LENGTH: usize = 64;

pub fn resolve_tenant(raw: &str) -> Result<TenantId, DomainError> {
    if !CANONICAL_UUID.is_match(raw) {
        return Err(invalid(raw));
    }
    Uuid::parse_str(raw)
        .map(TenantId::from_uuid)
        .map_err(|_| invalid(raw))
}

/// Reads `tenantId` (or `tenant_id`) from a body or query payload.
pub fn tenant_id_from_payload(payload: &Value) -> Result<TenantId, DomainError> {
    match raw_str(payload, "tenantId") {
        Some(raw) => resolve_tenant(raw),
        None => Err(DomainError::InvalidTenantId(String::new())),
    }
}

/// Loads a resolved tenant; unknown ids are `NotFound`.
pub async fn load_tenant(
    tenants: &dyn TenantRepository,
    tenant_id: &TenantId,
) -> Result<Tenant, DomainError> {
    tenants
        .find_by_id(tenant_id.as_uuid())
        .await?
        .ok_or_else(|| DomainError::not_found("Tenant", tenant_id))
}

fn invalid(raw: &str) -> DomainError {
    DomainError::InvalidTenantId(raw.chars().take(MAX_ECHOED_ID_LENGTH).collect())
}

// ============================================================================
// DineFlow Core - Origin/Session Guard
// File: crates/dineflow-core/src/services/guard.rs
// ============================================================================
//! Authorizes a widget request against its tenant.
//!
//! Origins are fail-open: a tenant with an empty allowlist accepts any origin
//! until it configures one. A session whose recorded origin differs from the
//! current request is tolerated because redirect chains legitimately change
//! `Origin`/`Referer`.

use std::sync::Arc;

use tracing::{debug, warn};

use dineflow_security::hash_token;
use dineflow_shared::utils::mask_token;

use crate::domain::{Session, Tenant};
use crate::error::DomainError;
use crate::repositories::SessionRepository;

#[derive(Debug, Clone)]
pub struct Authorized {
    /// Present when the request carried a valid session token.
    pub session: Option<Session>,
}

pub struct OriginGuard {
    sessions: Arc<dyn SessionRepository>,
}

impl OriginGuard {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn authorize(
        &self,
        tenant: &Tenant,
        origin: Option<&str>,
        session_token: Option<&str>,
    ) -> Result<Authorized, DomainError> {
        check_tenant_origin(tenant, origin)?;

        let token = match session_token {
            Some(token) => token,
            None => return Ok(Authorized { session: None }),
        };

        let session = self
            .sessions
            .find_by_token(&tenant.id, &hash_token(token))
            .await?
            .ok_or_else(|| {
                warn!("Unknown session token {} for tenant {}", mask_token(token), tenant.id);
                DomainError::SessionInvalid
            })?;

        if session.origin_differs(origin) {
            warn!(
                "Session {} origin mismatch: recorded {:?}, request {:?}",
                session.id, session.origin, origin
            );
        }

        debug!("Session {} authorized for tenant {}", session.id, tenant.id);
        Ok(Authorized { session: Some(session) })
    }
}

/// Steps that need no datastore access: tenant activity and origin allowlist.
pub fn check_tenant_origin(tenant: &Tenant, origin: Option<&str>) -> Result<(), DomainError> {
    if !tenant.is_active {
        warn!("Rejected request for inactive tenant {}", tenant.id);
        return Err(DomainError::TenantInactive(tenant.id));
    }

    if tenant.is_origin_restricted() {
        let allowed = origin
            .map(|o| origin_candidates(o).into_iter().any(|c| tenant.allows_origin(c)))
            .unwrap_or(false);
        if !allowed {
            warn!("Origin {:?} not allowed for tenant {}", origin, tenant.id);
            return Err(DomainError::OriginNotAllowed(origin.unwrap_or("<none>").to_string()));
        }
    }

    Ok(())
}

/// `{origin, origin without one trailing slash}`
pub fn origin_candidates(origin: &str) -> Vec<&str> {
    let mut candidates = vec![origin];
    if let Some(stripped) = origin.strip_suffix('/') {
        candidates.push(stripped);
    }
    candidates
}

/// Origin of a request: the `Origin` header, else `scheme://host[:port]` of the
/// `Referer`. Browsers send the literal `null` for opaque origins.
pub fn request_origin(origin_header: Option<&str>, referer: Option<&str>) -> Option<String> {
    if let Some(origin) = origin_header.map(str::trim).filter(|o| !o.is_empty() && *o != "null") {
        return Some(origin.to_string());
    }

    let referer = referer?.trim();
    let scheme_end = referer.find("://")?;
    let rest = &referer[scheme_end + 3..];
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if host_end == 0 {
        return None;
    }
    Some(format!("{}://{}", &referer[..scheme_end], &rest[..host_end]))
}

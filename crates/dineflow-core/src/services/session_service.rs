// ============================================================================
// DineFlow Core - Session Service
// File: crates/dineflow-core/src/services/session_service.rs
// ============================================================================
//! Starts widget chat sessions

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use dineflow_security::SessionToken;

use crate::domain::Session;
use crate::error::DomainError;
use crate::inputs::CreateSessionInput;
use crate::repositories::{SessionRepository, TenantRepository};
use crate::services::guard::OriginGuard;
use crate::services::tenant_context::{load_tenant, tenant_id_from_payload};
use crate::validation::validate;

/// Returned once; only the token hash is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub session_id: Uuid,
    pub session_token: String,
}

pub struct SessionService {
    tenants: Arc<dyn TenantRepository>,
    sessions: Arc<dyn SessionRepository>,
    guard: OriginGuard,
}

impl SessionService {
    pub fn new(tenants: Arc<dyn TenantRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        let guard = OriginGuard::new(sessions.clone());
        Self {
            tenants,
            sessions,
            guard,
        }
    }

    pub async fn start(
        &self,
        payload: &Value,
        origin: Option<&str>,
    ) -> Result<SessionGrant, DomainError> {
        // 1. Resolve and load the tenant
        let tenant_id = tenant_id_from_payload(payload)?;
        let tenant = load_tenant(self.tenants.as_ref(), &tenant_id).await?;

        // 2. Tenant must be active and the origin allowed
        self.guard.authorize(&tenant, origin, None).await?;

        // 3. Validate the rest of the payload
        let input = validate::<CreateSessionInput>(payload)?.into_inner();

        // 4. Issue a token and persist its hash
        let token = SessionToken::generate();
        let session = Session::new(
            tenant.id,
            token.hash(),
            origin.map(str::to_string),
            input.locale,
        );
        let stored = self.sessions.create(&session).await?;

        info!("Session {} started for tenant {}", stored.id, tenant.id);

        Ok(SessionGrant {
            session_id: stored.id,
            session_token: token.into_inner(),
        })
    }
}

// ============================================================================
// DineFlow Core - Chat Service
// File: crates/dineflow-core/src/services/chat_service.rs
// ============================================================================
//! Answers widget chat messages from the tenant's menu.
//!
//! Only resolver, guard and validator rejections reach the caller. Datastore
//! trouble degrades the reply instead of failing it.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Tenant, TenantId};
use crate::error::DomainError;
use crate::inputs::ChatInput;
use crate::repositories::{MenuRepository, SessionRepository, TenantRepository};
use crate::services::guard::{Authorized, OriginGuard};
use crate::services::reply::{ChatReply, ReplyDispatcher};
use crate::services::tenant_context::{load_tenant, tenant_id_from_payload};
use crate::validation::{raw_str, validate};

pub struct ChatService {
    tenants: Arc<dyn TenantRepository>,
    sessions: Arc<dyn SessionRepository>,
    menus: Arc<dyn MenuRepository>,
    guard: OriginGuard,
}

impl ChatService {
    pub fn new(
        tenants: Arc<dyn TenantRepository>,
        sessions: Arc<dyn SessionRepository>,
        menus: Arc<dyn MenuRepository>,
    ) -> Self {
        let guard = OriginGuard::new(sessions.clone());
        Self {
            tenants,
            sessions,
            menus,
            guard,
        }
    }

    pub async fn reply(&self, payload: &Value, origin: Option<&str>) -> Result<ChatReply, DomainError> {
        // 1. Tenant
        let tenant_id = tenant_id_from_payload(payload)?;

        // 2. Guard. A missing token is left to the validator below; the token
        //    is trimmed the same way the validator trims it.
        let token = raw_str(payload, "sessionToken").map(str::trim);
        let authorized = match self.authorize(&tenant_id, origin, token).await {
            Ok(authorized) => Some(authorized),
            Err(e) if e.is_internal() => {
                warn!("Could not authorize chat for tenant {}, degrading reply: {}", tenant_id, e);
                None
            }
            Err(e) => return Err(e),
        };

        // 3. Payload
        let input = validate::<ChatInput>(payload)?.into_inner();

        let (tenant, authorized) = match authorized {
            Some(found) => found,
            None => return Ok(ReplyDispatcher::reply(&input.message, &[])),
        };

        if let Some(session) = authorized.session {
            if let Err(e) = self.sessions.touch(&session.id, Utc::now()).await {
                warn!("Failed to refresh session {}: {}", session.id, e);
            }
        }

        // 4. Menu, degrading to an empty list
        let items = match self.menus.list_items(&tenant.id, None, true).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Menu unavailable for tenant {}, replying without cards: {}", tenant.id, e);
                Vec::new()
            }
        };

        let reply = ReplyDispatcher::reply(&input.message, &items);
        debug!("Chat reply for tenant {} with {} card(s)", tenant.id, reply.cards.len());
        Ok(reply)
    }

    async fn authorize(
        &self,
        tenant_id: &TenantId,
        origin: Option<&str>,
        token: Option<&str>,
    ) -> Result<(Tenant, Authorized), DomainError> {
        let tenant = load_tenant(self.tenants.as_ref(), tenant_id).await?;
        let authorized = self.guard.authorize(&tenant, origin, token).await?;
        Ok((tenant, authorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuItem, Session, Tenant};
    use crate::error::ErrorCode;
    use crate::repositories::{MockMenuRepository, MockSessionRepository, MockTenantRepository};
    use dineflow_security::hash_token;
    use serde_json::json;
    use uuid::Uuid;

    const TENANT: &str = "3f2b8c1e-9a4d-4c7e-8b21-5d6f7a8b9c0d";

    fn tenant() -> Tenant {
        Tenant {
            id: Uuid::parse_str(TENANT).unwrap(),
            name: "Trattoria".to_string(),
            is_active: true,
            is_verified: true,
            allowed_origins: vec![],
        }
    }

    fn item(name: &str) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: Uuid::new_v4(),
            tenant_id: tenant().id,
            menu: None,
            section: None,
            name: name.to_string(),
            description: None,
            price_cents: 1299,
            currency: "EUR".to_string(),
            tags: vec![],
            is_available: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn tenants() -> Arc<MockTenantRepository> {
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(|_| Ok(Some(tenant())));
        Arc::new(tenants)
    }

    fn sessions_knowing(token: &'static str) -> MockSessionRepository {
        let session = Session::new(tenant().id, hash_token(token), None, None);
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().returning(move |_, hash| {
            Ok((hash == session.token_hash).then(|| session.clone()))
        });
        sessions
    }

    #[tokio::test]
    async fn test_italian_question() {
        let mut sessions = sessions_knowing("tok");
        sessions.expect_touch().times(1).returning(|_, _| Ok(()));

        let mut menus = MockMenuRepository::new();
        menus
            .expect_list_items()
            .withf(|_, menu, available_only| menu.is_none() && *available_only)
            .returning(|_, _, _| Ok(vec![item("Margherita Pizza"), item("Side Salad")]));

        let service = ChatService::new(tenants(), Arc::new(sessions), Arc::new(menus));
        let reply = service
            .reply(
                &json!({"tenantId": TENANT, "sessionToken": "tok", "message": "Italian dishes?"}),
                None,
            )
            .await
            .unwrap();

        assert_eq!(reply.cards.len(), 1);
        assert_eq!(reply.cards[0].name, "Margherita Pizza");
    }

    #[tokio::test]
    async fn test_menu_failure_degrades_to_no_cards() {
        let mut sessions = sessions_knowing("tok");
        sessions.expect_touch().returning(|_, _| Ok(()));

        let mut menus = MockMenuRepository::new();
        menus
            .expect_list_items()
            .returning(|_, _, _| Err(DomainError::DatabaseError("connection reset".into())));

        let service = ChatService::new(tenants(), Arc::new(sessions), Arc::new(menus));
        let reply = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "tok", "message": "pizza"}), None)
            .await
            .unwrap();

        assert!(reply.cards.is_empty());
        assert!(!reply.text.is_empty());
    }

    #[tokio::test]
    async fn test_touch_failure_is_not_surfaced() {
        let mut sessions = sessions_knowing("tok");
        sessions
            .expect_touch()
            .returning(|_, _| Err(DomainError::DatabaseError("timeout".into())));

        let mut menus = MockMenuRepository::new();
        menus.expect_list_items().returning(|_, _, _| Ok(vec![]));

        let service = ChatService::new(tenants(), Arc::new(sessions), Arc::new(menus));
        let result = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "tok", "message": "hello"}), None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_token_is_session_invalid() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_items().never();

        let service = ChatService::new(tenants(), Arc::new(sessions_knowing("tok")), Arc::new(menus));
        let err = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "other", "message": "hi"}), None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SessionInvalid);
    }

    #[tokio::test]
    async fn test_missing_token_is_bad_request() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().never();

        let service = ChatService::new(tenants(), Arc::new(sessions), Arc::new(MockMenuRepository::new()));
        let err = service
            .reply(&json!({"tenantId": TENANT, "message": "hi"}), None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.issues()[0].path, "sessionToken");
    }

    #[tokio::test]
    async fn test_tenant_lookup_failure_degrades_reply() {
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_find_by_id()
            .returning(|_| Err(DomainError::DatabaseError("connection refused".into())));
        let mut menus = MockMenuRepository::new();
        menus.expect_list_items().never();

        let service = ChatService::new(
            Arc::new(tenants),
            Arc::new(MockSessionRepository::new()),
            Arc::new(menus),
        );
        let reply = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "tok", "message": "pizza"}), None)
            .await
            .unwrap();
        assert!(reply.cards.is_empty());
        assert!(!reply.chips.is_empty());
    }

    #[tokio::test]
    async fn test_session_lookup_failure_degrades_reply() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(|_, _| Err(DomainError::DatabaseError("timeout".into())));
        sessions.expect_touch().never();

        let service = ChatService::new(tenants(), Arc::new(sessions), Arc::new(MockMenuRepository::new()));
        let reply = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "tok", "message": "hi"}), None)
            .await
            .unwrap();
        assert!(reply.cards.is_empty());
    }

    #[tokio::test]
    async fn test_degraded_reply_still_validates_payload() {
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_find_by_id()
            .returning(|_| Err(DomainError::DatabaseError("connection refused".into())));

        let service = ChatService::new(
            Arc::new(tenants),
            Arc::new(MockSessionRepository::new()),
            Arc::new(MockMenuRepository::new()),
        );
        let err = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "tok"}), None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.issues()[0].path, "message");
    }

    #[tokio::test]
    async fn test_padded_token_matches_trimmed_hash() {
        let mut sessions = sessions_knowing("tok");
        sessions.expect_touch().times(1).returning(|_, _| Ok(()));
        let mut menus = MockMenuRepository::new();
        menus.expect_list_items().returning(|_, _, _| Ok(vec![]));

        let service = ChatService::new(tenants(), Arc::new(sessions), Arc::new(menus));
        let result = service
            .reply(&json!({"tenantId": TENANT, "sessionToken": "  tok ", "message": "hi"}), None)
            .await;
        assert!(result.is_ok());
    }
}

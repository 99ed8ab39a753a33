// ============================================================================
// DineFlow Core - Menu Service
// File: crates/dineflow-core/src/services/menu_service.rs
// ============================================================================
//! Public menu browsing and owner-side menu management

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use dineflow_security::OwnerClaims;

use crate::domain::{MenuItem, MenuSection, Tenant, TenantId};
use crate::error::{DomainError, Issue};
use crate::inputs::{CreateMenuItemInput, MenuQuery, UpdateMenuItemInput};
use crate::repositories::{MenuRepository, TenantRepository};
use crate::services::tenant_context::{load_tenant, tenant_id_from_payload};
use crate::validation::validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub tenant_id: Uuid,
    pub menu: Option<String>,
    pub sections: Vec<MenuSection>,
}

pub struct MenuService {
    tenants: Arc<dyn TenantRepository>,
    menus: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(tenants: Arc<dyn TenantRepository>, menus: Arc<dyn MenuRepository>) -> Self {
        Self { tenants, menus }
    }

    /// Available items of an active tenant, grouped by section.
    pub async fn browse(&self, query: &Value) -> Result<MenuView, DomainError> {
        let tenant_id = tenant_id_from_payload(query)?;
        let tenant = load_tenant(self.tenants.as_ref(), &tenant_id).await?;
        // Reads are not origin-restricted
        if !tenant.is_active {
            return Err(DomainError::TenantInactive(tenant.id));
        }

        let query = validate::<MenuQuery>(query)?.into_inner();
        let items = self
            .menus
            .list_items(&tenant.id, query.menu.clone(), true)
            .await?;

        Ok(MenuView {
            tenant_id: tenant.id,
            menu: query.menu,
            sections: MenuSection::group(items),
        })
    }

    pub async fn create_item(
        &self,
        claims: &OwnerClaims,
        payload: &Value,
    ) -> Result<MenuItem, DomainError> {
        let tenant = self.owned_tenant(claims, payload).await?;
        let input = validate::<CreateMenuItemInput>(payload)?.into_inner();

        let item = self.menus.create_item(&MenuItem::from_input(input)).await?;
        info!("Menu item {} created for tenant {} by {}", item.id, tenant.id, claims.sub);
        Ok(item)
    }

    pub async fn update_item(
        &self,
        claims: &OwnerClaims,
        item_id: &str,
        payload: &Value,
    ) -> Result<MenuItem, DomainError> {
        let tenant = self.owned_tenant(claims, payload).await?;

        let item_id = Uuid::parse_str(item_id)
            .map_err(|_| DomainError::Validation(vec![Issue::new("itemId", "must be a UUID")]))?;
        let changes = validate::<UpdateMenuItemInput>(payload)?.into_inner();

        let mut item = self
            .menus
            .find_item(&tenant.id, &item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("MenuItem", item_id))?;

        if item.version != changes.version {
            warn!(
                "Stale update of menu item {}: client version {}, stored {}",
                item_id, changes.version, item.version
            );
            return Err(DomainError::Conflict(format!(
                "menu item {} is at version {}",
                item_id, item.version
            )));
        }

        let expected_version = item.version;
        item.apply(changes);
        let item = self.menus.update_item(&item, expected_version).await?;
        info!("Menu item {} updated to version {} by {}", item.id, item.version, claims.sub);
        Ok(item)
    }

    /// The payload tenant must be the one the owner token was issued for.
    async fn owned_tenant(&self, claims: &OwnerClaims, payload: &Value) -> Result<Tenant, DomainError> {
        let tenant_id: TenantId = tenant_id_from_payload(payload)?;
        if claims.tenant_id != *tenant_id.as_uuid() {
            warn!("Owner {} attempted to manage tenant {}", claims.sub, tenant_id);
            return Err(DomainError::Forbidden("token was issued for another tenant".to_string()));
        }

        let tenant = load_tenant(self.tenants.as_ref(), &tenant_id).await?;
        if !tenant.is_active {
            return Err(DomainError::TenantInactive(tenant.id));
        }
        Ok(tenant)
    }
}

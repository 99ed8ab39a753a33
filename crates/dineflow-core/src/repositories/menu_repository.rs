//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::MenuItem;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Items in menu order. `menu = None` returns every menu.
    async fn list_items(
        &self,
        tenant_id: &Uuid,
        menu: Option<String>,
        available_only: bool,
    ) -> Result<Vec<MenuItem>, DomainError>;

    async fn find_item(&self, tenant_id: &Uuid, item_id: &Uuid) -> Result<Option<MenuItem>, DomainError>;

    /// Fails with `DomainError::Conflict` when the name is taken in the same menu.
    async fn create_item(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;

    /// Writes `item` only if the stored row still has `expected_version`;
    /// otherwise fails with `DomainError::Conflict`.
    async fn update_item(&self, item: &MenuItem, expected_version: i32) -> Result<MenuItem, DomainError>;
}

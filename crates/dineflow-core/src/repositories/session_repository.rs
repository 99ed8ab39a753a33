//! Session repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::Session;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, DomainError>;
    async fn find_by_token(&self, tenant_id: &Uuid, token_hash: &str) -> Result<Option<Session>, DomainError>;
    /// Refreshes `last_seen_at`; the only mutation a session ever sees.
    async fn touch(&self, id: &Uuid, seen_at: DateTime<Utc>) -> Result<(), DomainError>;
}

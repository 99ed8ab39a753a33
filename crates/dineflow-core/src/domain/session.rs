//! Widget session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One widget page load. Looked up by `(tenant_id, token_hash)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub token_hash: String,
    pub origin: Option<String>,
    pub locale: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        tenant_id: Uuid,
        token_hash: String,
        origin: Option<String>,
        locale: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            token_hash,
            origin,
            locale,
            created_at: now,
            last_seen_at: now,
        }
    }

    /// True when the session recorded an origin and `origin` differs from it.
    pub fn origin_differs(&self, origin: Option<&str>) -> bool {
        match (&self.origin, origin) {
            (Some(recorded), Some(current)) => {
                recorded.trim_end_matches('/') != current.trim_end_matches('/')
            }
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

//! PostgreSQL repository implementations

pub mod tenant_repo_impl;
pub mod session_repo_impl;
pub mod menu_repo_impl;
pub mod health_impl;

pub use tenant_repo_impl::PgTenantRepository;
pub use session_repo_impl::PgSessionRepository;
pub use menu_repo_impl::PgMenuRepository;
pub use health_impl::PgHealthCheck;

use dineflow_core::error::DomainError;
use tracing::error;

/// Unique violations become `Conflict`; everything else is a database fault.
pub(crate) fn map_db_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::Conflict(format!("{}: {}", context, db.message()));
        }
    }
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

//! Repository traits (ports)

pub mod tenant_repository;
pub mod session_repository;
pub mod menu_repository;
pub mod health;

pub use tenant_repository::TenantRepository;
pub use session_repository::SessionRepository;
pub use menu_repository::MenuRepository;
pub use health::HealthCheck;

#[cfg(test)]
pub use tenant_repository::MockTenantRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;

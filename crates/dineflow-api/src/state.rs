use std::sync::Arc;

use dineflow_core::repositories::{HealthCheck, MenuRepository, SessionRepository, TenantRepository};
use dineflow_core::services::{ChatService, MenuService, SessionService};
use dineflow_security::JwtService;
use dineflow_shared::config::AppConfig;

/// Repository ports chosen by the binary (Postgres or in-memory).
#[derive(Clone)]
pub struct Repositories {
    pub tenants: Arc<dyn TenantRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub menus: Arc<dyn MenuRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    /// All ports backed by one store.
    pub fn from_store<S>(store: S) -> Self
    where
        S: TenantRepository + SessionRepository + MenuRepository + HealthCheck + Clone + 'static,
    {
        Self {
            tenants: Arc::new(store.clone()),
            sessions: Arc::new(store.clone()),
            menus: Arc::new(store.clone()),
            health: Arc::new(store),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub chat_service: Arc<ChatService>,
    pub menu_service: Arc<MenuService>,
    pub jwt: Arc<JwtService>,
    pub health: Arc<dyn HealthCheck>,
    /// Production error rendering: fixed messages, no details.
    pub hardened: bool,
    pub session_cookie_name: String,
}

impl AppState {
    pub fn new(config: &AppConfig, repos: Repositories) -> Self {
        Self {
            session_service: Arc::new(SessionService::new(repos.tenants.clone(), repos.sessions.clone())),
            chat_service: Arc::new(ChatService::new(
                repos.tenants.clone(),
                repos.sessions.clone(),
                repos.menus.clone(),
            )),
            menu_service: Arc::new(MenuService::new(repos.tenants, repos.menus)),
            jwt: Arc::new(JwtService::new(config.security.jwt_secret.clone())),
            health: repos.health,
            hardened: config.is_production(),
            session_cookie_name: config.security.session_cookie_name.clone(),
        }
    }
}

//! Shared fixtures for the HTTP tests: an in-memory store, a router and a few
//! request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use dineflow_api::{build_router, AppState, Repositories};
use dineflow_core::domain::{MenuItem, Tenant};
use dineflow_core::error::DomainError;
use dineflow_core::repositories::{MenuRepository, TenantRepository};
use dineflow_infrastructure::MemoryStore;
use dineflow_security::JwtService;
use dineflow_shared::config::{
    AppConfig, AppSettings, DatabaseBackend, DatabaseSettings, LogSettings, SecuritySettings,
};

pub const SECRET: &str = "test-secret";
pub const TENANT: &str = "3f2b8c1e-9a4d-4c7e-8b21-5d6f7a8b9c0d";
pub const LOCKED_TENANT: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
pub const CLOSED_TENANT: &str = "9b2d7f40-1c3e-4a5b-8d6f-0e1a2b3c4d5e";
pub const ALLOWED_ORIGIN: &str = "https://trattoria.example";

pub fn config(env: &str) -> AppConfig {
    AppConfig {
        app: AppSettings {
            env: env.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            name: "dineflow-test".to_string(),
        },
        database: DatabaseSettings {
            backend: DatabaseBackend::Memory,
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            run_migrations: false,
        },
        security: SecuritySettings {
            jwt_secret: SECRET.to_string(),
            session_cookie_name: "dineflow_session".to_string(),
        },
        log: LogSettings {
            directory: None,
            file_prefix: "test.log".to_string(),
        },
    }
}

pub fn tenant_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

pub fn menu_item(tenant: &str, name: &str, section: Option<&str>, tags: &[&str]) -> MenuItem {
    let now = Utc::now();
    MenuItem {
        id: Uuid::new_v4(),
        tenant_id: tenant_id(tenant),
        menu: None,
        section: section.map(str::to_string),
        name: name.to_string(),
        description: None,
        price_cents: 1450,
        currency: "EUR".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_available: true,
        version: 1,
        created_at: now,
        updated_at: now,
    }
}

/// Three tenants: an open one with a small menu, one restricted to
/// [`ALLOWED_ORIGIN`] and an inactive one.
pub async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    for (id, active, origins) in [
        (TENANT, true, vec![]),
        (LOCKED_TENANT, true, vec![ALLOWED_ORIGIN.to_string()]),
        (CLOSED_TENANT, false, vec![]),
    ] {
        store
            .insert_tenant(Tenant {
                id: tenant_id(id),
                name: "Trattoria".to_string(),
                is_active: active,
                is_verified: true,
                allowed_origins: origins,
            })
            .await;
    }

    store.insert_item(menu_item(TENANT, "Margherita Pizza", Some("Mains"), &["popular"])).await;
    store.insert_item(menu_item(TENANT, "Side Salad", None, &[])).await;
    store
}

pub fn app(store: MemoryStore) -> Router {
    app_with(config("development"), Repositories::from_store(store))
}

pub fn app_with(config: AppConfig, repos: Repositories) -> Router {
    build_router(AppState::new(&config, repos))
}

pub fn owner_token(tenant: &str) -> String {
    JwtService::new(SECRET.to_string())
        .issue(&Uuid::new_v4(), &tenant_id(tenant), "owner", 3600)
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse { status, headers, body }
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_header(mut request: Request<Body>, name: header::HeaderName, value: &str) -> Request<Body> {
    request.headers_mut().insert(name, value.parse().unwrap());
    request
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Menu store whose reads always fail.
pub struct BrokenMenus;

#[async_trait]
impl MenuRepository for BrokenMenus {
    async fn list_items(&self, _: &Uuid, _: Option<String>, _: bool) -> Result<Vec<MenuItem>, DomainError> {
        Err(DomainError::DatabaseError("connection refused (os error 111)".to_string()))
    }

    async fn find_item(&self, _: &Uuid, _: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        Err(DomainError::DatabaseError("connection refused (os error 111)".to_string()))
    }

    async fn create_item(&self, _: &MenuItem) -> Result<MenuItem, DomainError> {
        Err(DomainError::DatabaseError("connection refused (os error 111)".to_string()))
    }

    async fn update_item(&self, _: &MenuItem, _: i32) -> Result<MenuItem, DomainError> {
        Err(DomainError::DatabaseError("connection refused (os error 111)".to_string()))
    }
}

/// Tenant store that panics on lookup.
pub struct PanickingTenants;

#[async_trait]
impl TenantRepository for PanickingTenants {
    async fn find_by_id(&self, _: &Uuid) -> Result<Option<Tenant>, DomainError> {
        panic!("tenant table exploded");
    }
}

/// Tenant store that cannot be reached.
pub struct OfflineTenants;

#[async_trait]
impl TenantRepository for OfflineTenants {
    async fn find_by_id(&self, _: &Uuid) -> Result<Option<Tenant>, DomainError> {
        Err(DomainError::DatabaseError("connection refused (os error 111)".to_string()))
    }
}

pub fn repos_with_offline_tenants(store: MemoryStore) -> Repositories {
    Repositories {
        tenants: Arc::new(OfflineTenants),
        ..Repositories::from_store(store)
    }
}

pub fn repos_with_broken_menus(store: MemoryStore) -> Repositories {
    Repositories {
        menus: Arc::new(BrokenMenus),
        ..Repositories::from_store(store)
    }
}

pub fn repos_with_panicking_tenants(store: MemoryStore) -> Repositories {
    Repositories {
        tenants: Arc::new(PanickingTenants),
        ..Repositories::from_store(store)
    }
}

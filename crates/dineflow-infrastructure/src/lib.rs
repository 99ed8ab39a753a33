//! # DineFlow Infrastructure
//!
//! Datastore adapters for the core repository ports: PostgreSQL through sqlx,
//! plus an in-memory store for tests and local runs.

pub mod database;

pub use database::{
    create_pool, run_migrations, MemoryStore, PgHealthCheck, PgMenuRepository,
    PgSessionRepository, PgTenantRepository,
};

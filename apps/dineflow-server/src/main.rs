use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use dineflow_api::{build_router, AppState, Repositories};
use dineflow_infrastructure::{
    create_pool, run_migrations, MemoryStore, PgHealthCheck, PgMenuRepository, PgSessionRepository,
    PgTenantRepository,
};
use dineflow_shared::config::{AppConfig, DatabaseBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = dineflow_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting in {} mode...", config.app.name, config.app.env);

    let repos = match config.database.backend {
        DatabaseBackend::Postgres => {
            info!("Connecting to database...");
            let pool = match create_pool(&config.database).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    return Err(e.into());
                }
            };
            info!("Database connection established.");

            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }

            Repositories {
                tenants: Arc::new(PgTenantRepository::new(pool.clone())),
                sessions: Arc::new(PgSessionRepository::new(pool.clone())),
                menus: Arc::new(PgMenuRepository::new(pool.clone())),
                health: Arc::new(PgHealthCheck::new(pool)),
            }
        }
        DatabaseBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Repositories::from_store(MemoryStore::new())
        }
    };

    let state = AppState::new(&config, repos);
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

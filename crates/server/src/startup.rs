use std::sync::Arc;

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::{AppConfig, DEV_JWT_SECRET};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::car::{repo::seaorm::SeaOrmCarRepository, repository::CarRepository};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`); when that fails, assemble the
/// config from environment variables alone.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => AppConfig::from_env()
            .map_err(|e| StartupError::InvalidConfig(format!("{e} (config file: {file_err})"))),
    }
}

/// Connect the pool, apply migrations if enabled, and wire the car service.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!("database migrations applied");
    }

    let repo: Arc<dyn CarRepository> = Arc::new(SeaOrmCarRepository { db });
    Ok(ServerState::new(repo, &cfg.auth.jwt_secret))
}

/// Router for an already-built state, with the default CORS policy.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    init_logging(LogFormat::parse(&cfg.logging.format));

    if cfg.auth.jwt_secret == DEV_JWT_SECRET {
        warn!("JWT_SECRET not configured; using the development secret");
    }

    let state = build_state(&cfg).await?;
    let router = app(state);

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting car rental server");
    axum::serve(listener, router).await?;
    Ok(())
}

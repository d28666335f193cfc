mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod recommend;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::provider::{CatalogProvider, PgCatalogProvider, StaticCatalogProvider};
use crate::catalog::seed::seed_database;
use crate::catalog::store::CatalogStore;
use crate::config::{CatalogSource, Config};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::users::store::PgUserStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerCraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    // Load the catalog. An invalid career definition aborts startup.
    let provider: Arc<dyn CatalogProvider> = match config.catalog_source {
        CatalogSource::Database => {
            if config.seed_catalog {
                seed_database(&db).await?;
            }
            Arc::new(PgCatalogProvider::new(db.clone()))
        }
        CatalogSource::Static => Arc::new(StaticCatalogProvider::seeded()?),
    };
    let catalog = CatalogStore::load(provider).await?;

    let state = AppState {
        config: config.clone(),
        catalog,
        users: Arc::new(PgUserStore::new(db)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

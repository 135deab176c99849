//! encore-gateway server entry point.
//!
//! Connects to PostgreSQL, applies migrations, seeds the catalog, and
//! starts the Axum HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use encore_gateway::api;
use encore_gateway::app_state::AppState;
use encore_gateway::config::{AppConfig, LogFormat};
use encore_gateway::persistence::seed::{default_catalog, seed_if_empty};
use encore_gateway::persistence::{ConcertStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting encore-gateway");

    // Build persistence layer
    let store = PostgresStore::connect(&config)
        .await
        .context("failed to connect to database")?;
    store.migrate().await.context("failed to apply migrations")?;

    if config.seed_on_startup {
        seed_if_empty(&store, &default_catalog())
            .await
            .context("failed to seed concert catalog")?;
    }

    let store: Arc<dyn ConcertStore> = Arc::new(store);

    // Build application state
    let app_state = AppState::new(store);

    // Build router and middleware
    let app = api::build_app(app_state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

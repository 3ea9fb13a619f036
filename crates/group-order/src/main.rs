//! # Group Order Service
//!
//! Reads configuration from the environment (and `.env`), opens the store,
//! restores every actor from it and serves the HTTP API until Ctrl-C.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required; `postgres://...` or `memory://` |
//! | `LISTEN_ADDR` | `0.0.0.0:5000` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |

use anyhow::Context;
use group_order::api::{self, AppState};
use group_order::config::{Config, DatabaseUrl};
use group_order::lifecycle::{setup_tracing, OrderSystem};
use group_order::store::{MemoryStore, PgStore, SharedStore};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = Config::from_env()?;
    info!(addr = %config.listen_addr, "Starting group order service");

    let store: SharedStore = match &config.database_url {
        DatabaseUrl::Postgres(url) => Arc::new(
            PgStore::connect(url, config.max_connections)
                .await
                .context("failed to open database")?,
        ),
        DatabaseUrl::Memory => {
            warn!("Using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let system = OrderSystem::start(store)
        .await
        .context("failed to load stored state")?;
    let app = api::router(AppState::new(&system));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

//! # quire-server
//!
//! HTTP backend for the Quire personal CMS.
//!
//! This binary provides:
//! - **REST API** (axum) over content, categories and media
//! - **Schema validation** of every create/patch body before it reaches
//!   the store
//! - **Health check** at `/health`
//!
//! All data lives in memory and is lost on restart. Static assets for the
//! browser editor are served by a separate layer.

mod api;
mod config;
mod error;
mod handlers;

use tracing::info;
use tracing_subscriber::EnvFilter;

use quire_shared::{Category, Content};
use quire_store::Store;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quire_server=debug")),
        )
        .init();

    info!("Starting Quire server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Build the store
    // -----------------------------------------------------------------------
    let store = if config.seed_sample_data {
        Store::seeded()
    } else {
        Store::new()
    };
    info!(
        instance = %config.instance_name,
        categories = store.collection::<Category>().len(),
        content = store.collection::<Content>().len(),
        "Store ready"
    );

    let http_addr = config.http_addr;
    let app_state = AppState::new(store, config);

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

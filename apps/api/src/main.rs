mod catalog;
mod config;
mod errors;
mod filtering;
mod models;
mod routes;
mod session;
mod state;
mod store;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageConfig};
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;
use crate::store::{FileBackend, KvBackend, MemoryBackend, PersistentStore, RedisBackend};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board API v{}", env!("CARGO_PKG_VERSION"));

    let store = PersistentStore::new(open_backend(&config.storage).await);

    // Nothing is served until saved state and the baseline dataset are loaded
    let session = Session::bootstrap(store, &config.dataset_source).await;

    let state = AppState::new(session, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Opens the configured key-value medium, falling back to memory if it cannot be opened.
async fn open_backend(storage: &StorageConfig) -> Arc<dyn KvBackend> {
    let opened: Result<Arc<dyn KvBackend>> = match storage {
        StorageConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
        StorageConfig::File { dir } => FileBackend::open(dir.clone())
            .await
            .map(|b| Arc::new(b) as Arc<dyn KvBackend>),
        StorageConfig::Redis { url, prefix } => redis::Client::open(url.as_str())
            .map(|client| Arc::new(RedisBackend::new(client, prefix.clone())) as Arc<dyn KvBackend>)
            .map_err(Into::into),
    };

    match opened {
        Ok(backend) => {
            info!("Storage backend: {}", storage.label());
            backend
        }
        Err(e) => {
            error!(
                "Could not open {} storage ({e:#}); keeping data in memory for this session",
                storage.label()
            );
            Arc::new(MemoryBackend::new())
        }
    }
}

//! Hotel AMS Server - Asset and Maintenance Management
//!
//! REST API server for the Ramayana Hotel asset and maintenance dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotel_ams_server::{
    api,
    config::AppConfig,
    repository::{seed::seed_sample_data, Repository},
    services::{
        session::{FileSessionStore, MemorySessionStore, SessionStore},
        users::hash_password,
        Services,
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("hotel_ams_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Hotel AMS Server v{}", env!("CARGO_PKG_VERSION"));

    // Session store
    let session_store: Arc<dyn SessionStore> = match config.auth.session_dir {
        Some(ref dir) => {
            tracing::info!("Sessions stored under {}", dir.display());
            Arc::new(FileSessionStore::new(dir.clone()))
        }
        None => Arc::new(MemorySessionStore::new()),
    };

    // Create repository, optionally with the sample hotel data
    let repository = Repository::new();
    if config.store.seed_sample_data {
        let password_hash = hash_password(&config.store.seed_password)?;
        seed_sample_data(&repository, &password_hash).await?;
        tracing::info!("Sample hotel data loaded");
    }

    let services = Services::new(repository, &config, session_store);

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

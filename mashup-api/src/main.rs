//! mashup-api - Audio asset metadata catalog
//!
//! Serves CRUD over audio asset records. If the database cannot be opened
//! at startup the service still comes up, reports "degraded" on /health, and
//! answers every data request with 503.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mashup_common::config::{load_toml_config, ServiceConfig};
use mashup_common::db::{init_database, SqliteAssetRepository, UnavailableRepository};
use mashup_common::AssetRepository;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mashup_api::cli::Args;
use mashup_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path();
    let toml = load_toml_config(&config_path).context("Failed to load config file")?;
    let config = ServiceConfig::resolve(args.overrides(), toml);

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mashup-api v{}", env!("CARGO_PKG_VERSION"));
    info!("Config file: {}", config_path.display());
    info!("Database: {}", config.database.url);

    let assets: Arc<dyn AssetRepository> = match init_database(&config.database).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            Arc::new(SqliteAssetRepository::new(pool))
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            warn!("Continuing in degraded mode; data operations will fail until restart");
            Arc::new(UnavailableRepository::new(e.to_string()))
        }
    };

    let mut state = AppState::new(assets);
    if let Some(dir) = config.static_dir.clone() {
        if dir.is_dir() {
            info!("Serving frontend bundle from {} at /app", dir.display());
            state = state.with_static_dir(dir);
        } else {
            warn!("Static directory {} not found, frontend not served", dir.display());
        }
    }

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("mashup-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

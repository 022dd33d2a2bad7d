//! mashup-api library - audio asset catalog HTTP service
//!
//! Exposes the router and state for the binary and for integration tests.

pub mod api;
pub mod cli;
pub mod error;
pub mod pagination;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use mashup_common::AssetRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Asset repository (SQLite, or the unavailable stand-in when degraded)
    pub assets: Arc<dyn AssetRepository>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Frontend bundle served under /app
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(assets: Arc<dyn AssetRepository>) -> Self {
        Self {
            assets,
            startup_time: Utc::now(),
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(api::health_routes())
        .merge(api::audio_asset_routes());

    if let Some(dir) = &state.static_dir {
        router = router.nest_service("/app", ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The frontend bundle may be served from another origin
        .layer(CorsLayer::permissive())
}

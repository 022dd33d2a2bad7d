//! Shared helpers for mashup-api integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use mashup_common::config::DatabaseSettings;
use mashup_common::db::{init_database, SqliteAssetRepository};
use mashup_common::{
    AssetRepository, AudioAsset, AudioAssetPatch, Error, ListWindow, NewAudioAsset, Result,
};
use mashup_api::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory repository double, kept in insertion order
#[derive(Default)]
pub struct MemoryRepository {
    assets: RwLock<Vec<AudioAsset>>,
}

impl MemoryRepository {
    pub async fn snapshot(&self) -> Vec<AudioAsset> {
        self.assets.read().await.clone()
    }
}

fn missing(id: Uuid) -> Error {
    Error::NotFound(format!("audio asset {}", id))
}

#[async_trait]
impl AssetRepository for MemoryRepository {
    async fn create(&self, new: NewAudioAsset) -> Result<AudioAsset> {
        new.validate()?;
        let asset = AudioAsset::from_new(new);
        self.assets.write().await.push(asset.clone());
        Ok(asset)
    }

    async fn get(&self, id: Uuid) -> Result<AudioAsset> {
        self.assets
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| missing(id))
    }

    async fn list(&self, window: ListWindow) -> Result<Vec<AudioAsset>> {
        Ok(self
            .assets
            .read()
            .await
            .iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, patch: AudioAssetPatch) -> Result<AudioAsset> {
        patch.validate()?;
        let mut assets = self.assets.write().await;
        let asset = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| missing(id))?;
        patch.apply_to(asset);
        Ok(asset.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut assets = self.assets.write().await;
        let before = assets.len();
        assets.retain(|a| a.id != id);
        if assets.len() == before {
            return Err(missing(id));
        }
        Ok(())
    }
}

/// Router over a fresh in-memory SQLite database
pub async fn sqlite_app() -> Router {
    let pool = init_database(&DatabaseSettings::in_memory())
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(Arc::new(SqliteAssetRepository::new(pool))))
}

/// Router over the in-memory double, with a handle for inspection
pub fn memory_app() -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::default());
    let app = build_router(AppState::new(repo.clone()));
    (app, repo)
}

/// Request without a body
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Request with a JSON body
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

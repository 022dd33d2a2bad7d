//! Audio asset CRUD endpoints
//!
//! | Method | Path                | Result                      |
//! |--------|---------------------|-----------------------------|
//! | POST   | /audio-assets/      | created record              |
//! | GET    | /audio-assets/      | array of records            |
//! | GET    | /audio-assets/:id   | record, 404 if absent       |
//! | PUT    | /audio-assets/:id   | updated record, 404/422     |
//! | DELETE | /audio-assets/:id   | confirmation, 404 if absent |

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use mashup_common::{AudioAsset, AudioAssetPatch, NewAudioAsset};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::pagination::ListQuery;
use crate::{ApiError, ApiResult, AppState};

/// Response payload for a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: Uuid,
    pub message: String,
}

/// POST /audio-assets/
///
/// **Request:** `{"filename": "track.wav", "title": "Intro", "bpm": 120.0}`
///
/// `filename` is required; `path` defaults to `filename`. Unknown fields,
/// blank names and negative numbers are rejected with 422.
pub async fn create_audio_asset(
    State(state): State<AppState>,
    payload: Result<Json<NewAudioAsset>, JsonRejection>,
) -> ApiResult<Json<AudioAsset>> {
    let Json(new) = payload?;

    let asset = state.assets.create(new).await?;
    info!(id = %asset.id, filename = %asset.filename, "Audio asset created");

    Ok(Json(asset))
}

/// GET /audio-assets/?skip=0&limit=100
pub async fn list_audio_assets(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<AudioAsset>>> {
    let Query(query) = query?;
    let window = query.into_window()?;

    let assets = state.assets.list(window).await?;
    Ok(Json(assets))
}

/// GET /audio-assets/:id
pub async fn get_audio_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AudioAsset>> {
    let id = parse_asset_id(&id)?;
    Ok(Json(state.assets.get(id).await?))
}

/// PUT /audio-assets/:id
///
/// Partial update of `title`, `artist`, `bpm` and `key_signature`. Absent
/// fields are left alone, `null` clears a field, any other field is a 422.
pub async fn update_audio_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AudioAssetPatch>, JsonRejection>,
) -> ApiResult<Json<AudioAsset>> {
    let id = parse_asset_id(&id)?;
    let Json(patch) = payload?;

    let asset = state.assets.update(id, patch).await?;
    info!(id = %asset.id, "Audio asset updated");

    Ok(Json(asset))
}

/// DELETE /audio-assets/:id
pub async fn delete_audio_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_asset_id(&id)?;

    state.assets.delete(id).await?;
    info!(id = %id, "Audio asset deleted");

    Ok(Json(DeleteResponse {
        success: true,
        id,
        message: "Audio asset deleted".to_string(),
    }))
}

/// A path segment that is not a UUID cannot name any record
fn parse_asset_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("audio asset {}", raw)))
}

/// Build audio asset routes
///
/// The collection answers with and without a trailing slash.
pub fn audio_asset_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/audio-assets",
            get(list_audio_assets).post(create_audio_asset),
        )
        .route(
            "/audio-assets/",
            get(list_audio_assets).post(create_audio_asset),
        )
        .route(
            "/audio-assets/:id",
            get(get_audio_asset)
                .put(update_audio_asset)
                .delete(delete_audio_asset),
        )
}

//! Audio asset persistence
//!
//! `AssetRepository` is the single data access contract for assets. Every
//! operation touches exactly one row in one statement; concurrent writers are
//! serialized only by the storage engine (last writer wins per column).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::models::{AudioAsset, AudioAssetPatch, ListWindow, NewAudioAsset};
use crate::{Error, Result};

const ASSET_COLUMNS: &str = "id, path, filename, title, artist, bpm, duration, \
                             key_signature, file_size, format, created_at";

/// Trait for audio asset storage operations
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Validate and persist a new asset, returning the stored record
    ///
    /// Duplicate filenames and paths are permitted.
    async fn create(&self, new: NewAudioAsset) -> Result<AudioAsset>;

    /// Get an asset by id, or `Error::NotFound`
    async fn get(&self, id: Uuid) -> Result<AudioAsset>;

    /// List assets in insertion order within the given window
    async fn list(&self, window: ListWindow) -> Result<Vec<AudioAsset>>;

    /// Apply a partial update and return the resulting record
    ///
    /// An empty patch succeeds without writing, but still reports
    /// `Error::NotFound` for an unknown id.
    async fn update(&self, id: Uuid, patch: AudioAssetPatch) -> Result<AudioAsset>;

    /// Permanently remove an asset, or `Error::NotFound`
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Whether the backing store is reachable at all
    fn is_available(&self) -> bool {
        true
    }
}

/// SQLite-backed repository over a shared connection pool
#[derive(Clone)]
pub struct SqliteAssetRepository {
    pool: SqlitePool,
}

impl SqliteAssetRepository {
    /// Wrap an initialized pool (see [`crate::db::init_database`])
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AssetRepository for SqliteAssetRepository {
    async fn create(&self, new: NewAudioAsset) -> Result<AudioAsset> {
        new.validate()?;
        let asset = AudioAsset::from_new(new);

        sqlx::query(
            r#"
            INSERT INTO audio_assets (id, path, filename, title, artist, bpm, duration,
                                      key_signature, file_size, format, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(asset.id.to_string())
        .bind(&asset.path)
        .bind(&asset.filename)
        .bind(&asset.title)
        .bind(&asset.artist)
        .bind(asset.bpm)
        .bind(asset.duration)
        .bind(&asset.key_signature)
        .bind(asset.file_size)
        .bind(&asset.format)
        .bind(asset.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(id = %asset.id, filename = %asset.filename, "Created audio asset");
        Ok(asset)
    }

    async fn get(&self, id: Uuid) -> Result<AudioAsset> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM audio_assets WHERE id = ?",
            ASSET_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_asset(&row),
            None => Err(not_found(id)),
        }
    }

    async fn list(&self, window: ListWindow) -> Result<Vec<AudioAsset>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM audio_assets ORDER BY rowid LIMIT ? OFFSET ?",
            ASSET_COLUMNS
        ))
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_asset).collect()
    }

    async fn update(&self, id: Uuid, patch: AudioAssetPatch) -> Result<AudioAsset> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get(id).await;
        }

        // Only the supplied columns are written
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE audio_assets SET ");
        {
            let mut columns = builder.separated(", ");
            if let Some(title) = patch.title {
                columns.push("title = ").push_bind_unseparated(title);
            }
            if let Some(artist) = patch.artist {
                columns.push("artist = ").push_bind_unseparated(artist);
            }
            if let Some(bpm) = patch.bpm {
                columns.push("bpm = ").push_bind_unseparated(bpm);
            }
            if let Some(key_signature) = patch.key_signature {
                columns.push("key_signature = ").push_bind_unseparated(key_signature);
            }
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());
        builder.push(" RETURNING ").push(ASSET_COLUMNS);

        let row = builder.build().fetch_optional(&self.pool).await?;

        match row {
            Some(row) => {
                debug!(id = %id, "Updated audio asset");
                row_to_asset(&row)
            }
            None => Err(not_found(id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM audio_assets WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        debug!(id = %id, "Deleted audio asset");
        Ok(())
    }
}

/// Repository used when storage could not be reached at startup
///
/// Every data operation fails with `Error::StorageUnavailable`.
#[derive(Debug, Clone)]
pub struct UnavailableRepository {
    reason: String,
}

impl UnavailableRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> Result<T> {
        Err(Error::StorageUnavailable(self.reason.clone()))
    }
}

#[async_trait]
impl AssetRepository for UnavailableRepository {
    async fn create(&self, _new: NewAudioAsset) -> Result<AudioAsset> {
        self.unavailable()
    }

    async fn get(&self, _id: Uuid) -> Result<AudioAsset> {
        self.unavailable()
    }

    async fn list(&self, _window: ListWindow) -> Result<Vec<AudioAsset>> {
        self.unavailable()
    }

    async fn update(&self, _id: Uuid, _patch: AudioAssetPatch) -> Result<AudioAsset> {
        self.unavailable()
    }

    async fn delete(&self, _id: Uuid) -> Result<()> {
        self.unavailable()
    }

    fn is_available(&self) -> bool {
        false
    }
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("audio asset {}", id))
}

fn row_to_asset(row: &SqliteRow) -> Result<AudioAsset> {
    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| Error::Internal(format!("Stored asset id '{}' is invalid: {}", id_str, e)))?;

    let created_str: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map_err(|e| {
            Error::Internal(format!(
                "Stored created_at '{}' for asset {} is invalid: {}",
                created_str, id, e
            ))
        })?
        .with_timezone(&Utc);

    Ok(AudioAsset {
        id,
        path: row.try_get("path")?,
        filename: row.try_get("filename")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        bpm: row.try_get("bpm")?,
        duration: row.try_get("duration")?,
        key_signature: row.try_get("key_signature")?,
        file_size: row.try_get("file_size")?,
        format: row.try_get("format")?,
        created_at,
    })
}

//! Database initialization
//!
//! Opens the connection pool and creates the `audio_assets` table on first
//! run. Table creation is idempotent and runs on every startup.

use crate::config::DatabaseSettings;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(settings: &DatabaseSettings) -> Result<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(5000));

    let pool_options = if settings.is_in_memory() {
        // Each in-memory connection is its own database; pin a single one
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        let db_path = options.get_filename().to_path_buf();
        let newly_created = !db_path.exists();

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if newly_created {
            info!("Creating new database: {}", db_path.display());
        } else {
            info!("Opening existing database: {}", db_path.display());
        }

        // WAL allows concurrent readers alongside one writer
        options = options.journal_mode(SqliteJournalMode::Wal);

        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    let pool = pool_options
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await?;

    create_audio_assets_table(&pool).await?;

    Ok(pool)
}

/// Create the audio asset table
pub async fn create_audio_assets_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audio_assets (
            id TEXT PRIMARY KEY,
            path TEXT NOT NULL,
            filename TEXT NOT NULL,
            title TEXT,
            artist TEXT,
            bpm REAL,
            duration REAL,
            key_signature TEXT,
            file_size INTEGER,
            format TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database tables initialized (audio_assets)");

    Ok(())
}

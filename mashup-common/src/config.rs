//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 arrive together as [`Overrides`]; the binary's argument
//! parser reads both.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// On-disk TOML configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database: DatabaseSection,
    pub server: ServerSection,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Directory holding the frontend bundle
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "mashup_api=debug"
    pub level: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

/// Connection settings for the storage engine
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection
    pub acquire_timeout: Duration,
}

impl DatabaseSettings {
    /// Private in-memory database, mostly for tests
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub database: DatabaseSettings,
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: Overrides, toml: TomlConfig) -> Self {
        let database = DatabaseSettings {
            url: overrides
                .database_url
                .or(toml.database.url)
                .unwrap_or_else(default_database_url),
            max_connections: overrides
                .max_connections
                .or(toml.database.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                .max(1),
            acquire_timeout: Duration::from_secs(
                toml.database
                    .acquire_timeout_secs
                    .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            ),
        };

        Self {
            database,
            host: overrides
                .host
                .or(toml.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.server.port).unwrap_or(DEFAULT_PORT),
            static_dir: overrides.static_dir.or(toml.server.static_dir),
            log_level: toml
                .logging
                .level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load the TOML config file
///
/// A missing file is not an error: defaults apply. A file that exists but
/// cannot be read or parsed is.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Default config file location for the platform
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("mashup").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("mashup.toml"))
}

/// Default SQLite database URL under the platform's local data directory
pub fn default_database_url() -> String {
    let db_path = dirs::data_local_dir()
        .map(|d| d.join("mashup"))
        .unwrap_or_else(|| PathBuf::from("./mashup_data"))
        .join("mashup.db");

    format!("sqlite://{}?mode=rwc", db_path.display())
}

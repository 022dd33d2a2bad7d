//! Command-line arguments
//!
//! Each flag also reads an environment variable; values given here beat the
//! TOML file, which beats compiled defaults.

use clap::Parser;
use mashup_common::config::{default_config_path, Overrides};
use std::path::PathBuf;

/// Command-line arguments for mashup-api
#[derive(Parser, Debug)]
#[command(name = "mashup-api")]
#[command(about = "Audio asset metadata catalog service")]
#[command(version)]
pub struct Args {
    /// Database connection string, e.g. sqlite://catalog.db?mode=rwc
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "MASHUP_DB_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Address to bind
    #[arg(long, env = "MASHUP_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MASHUP_PORT")]
    pub port: Option<u16>,

    /// Directory with the frontend bundle, served under /app
    #[arg(long, env = "MASHUP_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "MASHUP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            host: self.host.clone(),
            port: self.port,
            static_dir: self.static_dir.clone(),
        }
    }
}

//! # Mashup Common Library
//!
//! Shared code for the mashup catalog service:
//! - Audio asset model and validation
//! - `AssetRepository` contract and its SQLite implementation
//! - Database initialization
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use db::{AssetRepository, AudioAsset, AudioAssetPatch, ListWindow, NewAudioAsset};
pub use error::{Error, Result};

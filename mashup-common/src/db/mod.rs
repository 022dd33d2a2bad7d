//! Database models, initialization and the asset repository

pub mod audio_assets;
pub mod init;
pub mod models;

pub use audio_assets::{AssetRepository, SqliteAssetRepository, UnavailableRepository};
pub use init::{create_audio_assets_table, init_database};
pub use models::{AudioAsset, AudioAssetPatch, ListWindow, NewAudioAsset};

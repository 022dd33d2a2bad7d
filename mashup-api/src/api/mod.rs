//! HTTP API handlers for mashup-api

pub mod audio_assets;
pub mod health;

pub use audio_assets::audio_asset_routes;
pub use health::health_routes;

//! Audio asset models
//!
//! `AudioAsset` is the canonical record. `NewAudioAsset` is the create payload
//! and `AudioAssetPatch` the partial update payload; both reject fields they
//! do not name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Default number of records returned by a list call
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Upper bound on a single list window
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Metadata record describing one audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAsset {
    pub id: Uuid,
    pub path: String,
    pub filename: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub bpm: Option<f64>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub key_signature: Option<String>,
    /// Size in bytes
    pub file_size: Option<i64>,
    /// Container format, e.g. "mp3" or "wav"
    pub format: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AudioAsset {
    /// Build a fresh record from a create payload
    ///
    /// Assigns a new id and creation timestamp. `path` falls back to
    /// `filename` when the payload carries none. Does not validate; call
    /// [`NewAudioAsset::validate`] first.
    pub fn from_new(new: NewAudioAsset) -> Self {
        let path = new.path.unwrap_or_else(|| new.filename.clone());

        Self {
            id: Uuid::new_v4(),
            path,
            filename: new.filename,
            title: new.title,
            artist: new.artist,
            bpm: new.bpm,
            duration: new.duration,
            key_signature: new.key_signature,
            file_size: new.file_size,
            format: new.format,
            created_at: Utc::now(),
        }
    }
}

/// Create payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAudioAsset {
    pub filename: String,
    /// Explicit storage path; defaults to `filename`
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub key_signature: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub format: Option<String>,
}

impl NewAudioAsset {
    /// Create payload carrying only the required filename
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Check required fields and numeric bounds
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(Error::Validation("filename must not be empty".to_string()));
        }
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(Error::Validation("path must not be empty".to_string()));
            }
        }
        check_non_negative("bpm", self.bpm)?;
        check_non_negative("duration", self.duration)?;
        if let Some(size) = self.file_size {
            if size < 0 {
                return Err(Error::Validation(format!(
                    "file_size must be non-negative, got {}",
                    size
                )));
            }
        }
        Ok(())
    }
}

/// Partial update payload
///
/// Only `title`, `artist`, `bpm` and `key_signature` are mutable. Each field is
/// tri-state: `None` leaves the column alone, `Some(None)` clears it and
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioAssetPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub artist: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub bpm: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub key_signature: Option<Option<String>>,
}

impl AudioAssetPatch {
    /// True when the patch names no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.bpm.is_none()
            && self.key_signature.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("bpm", self.bpm.flatten())
    }

    /// Apply the supplied fields to an in-memory record
    pub fn apply_to(&self, asset: &mut AudioAsset) {
        if let Some(title) = &self.title {
            asset.title = title.clone();
        }
        if let Some(artist) = &self.artist {
            asset.artist = artist.clone();
        }
        if let Some(bpm) = self.bpm {
            asset.bpm = bpm;
        }
        if let Some(key) = &self.key_signature {
            asset.key_signature = key.clone();
        }
    }
}

/// Marks a field as present, so an explicit `null` becomes `Some(None)`
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn check_non_negative(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(Error::Validation(format!(
            "{} must be a finite number",
            field
        ))),
        Some(v) if v < 0.0 => Err(Error::Validation(format!(
            "{} must be non-negative, got {}",
            field, v
        ))),
        _ => Ok(()),
    }
}

/// Offset/limit window for list calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub offset: i64,
    pub limit: i64,
}

impl ListWindow {
    /// Build a window, rejecting negatives and clamping `limit` to
    /// [`MAX_LIST_LIMIT`]
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        if offset < 0 {
            return Err(Error::Validation(format!(
                "skip must be non-negative, got {}",
                offset
            )));
        }
        if limit < 0 {
            return Err(Error::Validation(format!(
                "limit must be non-negative, got {}",
                limit
            )));
        }

        Ok(Self {
            offset,
            limit: limit.min(MAX_LIST_LIMIT),
        })
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_new_defaults_path_to_filename() {
        let asset = AudioAsset::from_new(NewAudioAsset::new("track.wav"));
        assert_eq!(asset.path, "track.wav");
        assert_eq!(asset.filename, "track.wav");
        assert!(asset.duration.is_none());
    }

    #[test]
    fn test_from_new_keeps_explicit_path() {
        let new = NewAudioAsset {
            path: Some("/library/stems/track.wav".to_string()),
            ..NewAudioAsset::new("track.wav")
        };
        let asset = AudioAsset::from_new(new);
        assert_eq!(asset.path, "/library/stems/track.wav");
    }

    #[test]
    fn test_from_new_assigns_distinct_ids() {
        let a = AudioAsset::from_new(NewAudioAsset::new("a.wav"));
        let b = AudioAsset::from_new(NewAudioAsset::new("a.wav"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validate_rejects_blank_filename() {
        let err = NewAudioAsset::new("   ").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_blank_explicit_path() {
        let new = NewAudioAsset {
            path: Some(String::new()),
            ..NewAudioAsset::new("track.wav")
        };
        assert!(matches!(new.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_numeric_bounds() {
        let zero = NewAudioAsset {
            bpm: Some(0.0),
            duration: Some(0.0),
            file_size: Some(0),
            ..NewAudioAsset::new("silence.wav")
        };
        assert!(zero.validate().is_ok());

        let negative_bpm = NewAudioAsset {
            bpm: Some(-1.0),
            ..NewAudioAsset::new("track.wav")
        };
        assert!(matches!(negative_bpm.validate(), Err(Error::Validation(_))));

        let negative_size = NewAudioAsset {
            file_size: Some(-10),
            ..NewAudioAsset::new("track.wav")
        };
        assert!(matches!(negative_size.validate(), Err(Error::Validation(_))));

        let infinite_duration = NewAudioAsset {
            duration: Some(f64::INFINITY),
            ..NewAudioAsset::new("track.wav")
        };
        assert!(matches!(
            infinite_duration.validate(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_create_payload_requires_filename() {
        let result: std::result::Result<NewAudioAsset, _> =
            serde_json::from_value(json!({ "title": "Intro" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_payload_rejects_unknown_fields() {
        let result: std::result::Result<NewAudioAsset, _> = serde_json::from_value(json!({
            "filename": "track.wav",
            "id": "9b2f0c1e-0000-4000-8000-000000000000"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let patch: AudioAssetPatch =
            serde_json::from_value(json!({ "title": null, "bpm": 128.0 })).unwrap();
        assert_eq!(patch.title, Some(None));
        assert_eq!(patch.bpm, Some(Some(128.0)));
        assert_eq!(patch.artist, None);
        assert_eq!(patch.key_signature, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_rejects_immutable_fields() {
        for field in ["filename", "path", "duration", "file_size", "format", "id", "created_at"] {
            let mut payload = serde_json::Map::new();
            payload.insert(field.to_string(), json!("x"));
            let result: std::result::Result<AudioAssetPatch, _> =
                serde_json::from_value(serde_json::Value::Object(payload));
            assert!(result.is_err(), "patch accepted immutable field {}", field);
        }
    }

    #[test]
    fn test_empty_patch() {
        let patch: AudioAssetPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_rejects_negative_bpm() {
        let patch = AudioAssetPatch {
            bpm: Some(Some(-5.0)),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(Error::Validation(_))));

        let clearing = AudioAssetPatch {
            bpm: Some(None),
            ..Default::default()
        };
        assert!(clearing.validate().is_ok());
    }

    #[test]
    fn test_apply_to_only_touches_supplied_fields() {
        let mut asset = AudioAsset::from_new(NewAudioAsset {
            title: Some("Intro".to_string()),
            artist: Some("DJ Test".to_string()),
            bpm: Some(120.0),
            ..NewAudioAsset::new("track.wav")
        });
        let before = asset.clone();

        let patch = AudioAssetPatch {
            bpm: Some(Some(128.0)),
            artist: Some(None),
            ..Default::default()
        };
        patch.apply_to(&mut asset);

        assert_eq!(asset.bpm, Some(128.0));
        assert_eq!(asset.artist, None);
        assert_eq!(asset.title, before.title);
        assert_eq!(asset.id, before.id);
        assert_eq!(asset.created_at, before.created_at);
    }

    #[test]
    fn test_list_window_bounds() {
        assert_eq!(ListWindow::default(), ListWindow { offset: 0, limit: 100 });
        assert_eq!(ListWindow::new(5, 5000).unwrap().limit, MAX_LIST_LIMIT);
        assert_eq!(ListWindow::new(0, 0).unwrap().limit, 0);
        assert!(ListWindow::new(-1, 10).is_err());
        assert!(ListWindow::new(0, -1).is_err());
    }

    #[test]
    fn test_record_serializes_every_field() {
        let asset = AudioAsset::from_new(NewAudioAsset::new("track.wav"));
        let value = serde_json::to_value(&asset).unwrap();
        let object = value.as_object().unwrap();

        for field in [
            "id", "path", "filename", "title", "artist", "bpm", "duration",
            "key_signature", "file_size", "format", "created_at",
        ] {
            assert!(object.contains_key(field), "missing field {}", field);
        }
        assert!(object["title"].is_null());
    }
}

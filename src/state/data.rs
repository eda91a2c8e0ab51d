//! Shared data structures for the gallery session
//!
//! These structs represent the data model that flows between
//! the platform services and the UI layer.

use chrono::{DateTime, Utc};
use std::fmt;

/// Bytes per megabyte used when formatting sizes
const BYTES_PER_MB: f64 = 1_048_576.0;

/// Stable key of a record within one session.
/// Allocated from a counter and never reused, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// Where an asset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Library,
    Camera,
}

impl Source {
    /// Prefix used to synthesize a name when the platform reports none
    fn fallback_prefix(self) -> &'static str {
        match self {
            Source::Library => "image",
            Source::Camera => "photo",
        }
    }
}

/// One asset as returned by a picker or the camera
#[derive(Debug, Clone, PartialEq)]
pub struct PickedAsset {
    /// Opaque locator owned by the platform
    pub uri: String,
    /// File name reported by the platform, if any
    pub file_name: Option<String>,
    /// Byte count reported by the platform, if any
    pub file_size: Option<u64>,
}

/// Represents a single image in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Session-unique id
    pub id: ImageId,
    /// Locator returned by the picker (referenced, not copied)
    pub uri: String,
    /// Display name (e.g., "IMG_0001.jpg" or "photo_1700000000000.jpg")
    pub name: String,
    /// Size in bytes (None if the platform did not report it)
    pub size: Option<u64>,
}

impl ImageRecord {
    /// Build a record from a picked asset.
    /// `now` is only used when the asset has no usable file name.
    pub fn from_asset(id: ImageId, asset: PickedAsset, source: Source, now: DateTime<Utc>) -> Self {
        let name = asset
            .file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback_name(source, now));

        Self {
            id,
            uri: asset.uri,
            name,
            size: asset.file_size,
        }
    }

    /// Human readable size for the viewer
    pub fn size_label(&self) -> String {
        format_size(self.size)
    }
}

/// Synthesize a display name from a millisecond timestamp
pub fn fallback_name(source: Source, now: DateTime<Utc>) -> String {
    format!("{}_{}.jpg", source.fallback_prefix(), now.timestamp_millis())
}

/// Format a byte count as megabytes with two decimals.
/// Absent or zero sizes read "Unknown size".
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        None | Some(0) => "Unknown size".to_string(),
        Some(bytes) => format!("{:.2} MB", bytes as f64 / BYTES_PER_MB),
    }
}

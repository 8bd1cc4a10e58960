use std::path::Path;

use faculty_core::Config;
use faculty_storage::write_atomic;

use super::{decode, encode_jpeg, fit_within, flatten_onto_white, ImageError};

#[derive(Debug, Clone, Copy)]
pub struct ThumbnailSettings {
    /// Bounding box edge in pixels.
    pub size: u32,
    pub quality: u8,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            size: 300,
            quality: 80,
        }
    }
}

impl ThumbnailSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            size: config.thumbnail_size,
            ..Self::default()
        }
    }
}

pub fn thumbnail_bytes(data: &[u8], settings: &ThumbnailSettings) -> Result<Vec<u8>, ImageError> {
    let decoded = decode(data)?;
    let rgb = fit_within(flatten_onto_white(&decoded), settings.size, settings.size);
    encode_jpeg(&rgb, settings.quality)
}

/// Write a preview of `source` to `destination`.
pub async fn create_thumbnail(
    source: &Path,
    destination: &Path,
    settings: ThumbnailSettings,
) -> Result<(), ImageError> {
    let original = tokio::fs::read(source).await?;

    let thumbnail = tokio::task::spawn_blocking(move || thumbnail_bytes(&original, &settings))
        .await
        .map_err(|e| ImageError::Task(e.to_string()))??;

    write_atomic(destination, &thumbnail).await?;
    Ok(())
}

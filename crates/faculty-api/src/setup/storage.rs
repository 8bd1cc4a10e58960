//! Upload directory setup

use anyhow::{Context, Result};
use faculty_core::Config;
use faculty_storage::{LocalStorage, UploadDirs};

/// Create the upload tree under `UPLOAD_DIR` and return the storage backend over it.
pub async fn setup_storage(config: &Config) -> Result<LocalStorage> {
    let dirs = UploadDirs::new(config.upload_dir.clone());
    dirs.ensure_dirs()
        .await
        .with_context(|| format!("Failed to create upload directories under {:?}", config.upload_dir))?;

    tracing::info!(upload_dir = ?config.upload_dir, "Upload storage ready");
    Ok(LocalStorage::new(dirs))
}

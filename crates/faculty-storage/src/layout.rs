//! Upload directory layout and public URL mapping.

use std::path::{Path, PathBuf};

use faculty_core::AssetClass;
use tokio::fs;

use crate::error::{StorageError, StorageResult};

/// URL prefix under which the upload root is served.
pub const PUBLIC_PREFIX: &str = "/uploads/";

pub const THUMBNAIL_PREFIX: &str = "thumb_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageDir {
    Images,
    Thumbnails,
    Pdfs,
}

impl StorageDir {
    pub const ALL: [StorageDir; 3] = [StorageDir::Images, StorageDir::Thumbnails, StorageDir::Pdfs];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageDir::Images => "images",
            StorageDir::Thumbnails => "thumbnails",
            StorageDir::Pdfs => "pdfs",
        }
    }

    pub fn for_class(class: AssetClass) -> Self {
        match class {
            AssetClass::Image => StorageDir::Images,
            AssetClass::Pdf => StorageDir::Pdfs,
        }
    }

    fn parse(segment: &str) -> Option<Self> {
        match segment {
            "images" => Some(StorageDir::Images),
            "thumbnails" => Some(StorageDir::Thumbnails),
            "pdfs" => Some(StorageDir::Pdfs),
            _ => None,
        }
    }
}

/// Directory tree the storage writer persists into.
#[derive(Debug, Clone)]
pub struct UploadDirs {
    pub root: PathBuf,
    pub images: PathBuf,
    pub thumbnails: PathBuf,
    pub pdfs: PathBuf,
}

impl UploadDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        UploadDirs {
            images: root.join(StorageDir::Images.as_str()),
            thumbnails: root.join(StorageDir::Thumbnails.as_str()),
            pdfs: root.join(StorageDir::Pdfs.as_str()),
            root,
        }
    }

    pub fn dir(&self, dir: StorageDir) -> &Path {
        match dir {
            StorageDir::Images => &self.images,
            StorageDir::Thumbnails => &self.thumbnails,
            StorageDir::Pdfs => &self.pdfs,
        }
    }

    /// Create every upload directory. Safe to call repeatedly.
    pub async fn ensure_dirs(&self) -> StorageResult<()> {
        for dir in StorageDir::ALL {
            let path = self.dir(dir);
            fs::create_dir_all(path).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create upload directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        tracing::debug!(root = %self.root.display(), "Upload directories ready");
        Ok(())
    }

    /// Public URL of a file in `dir`.
    pub fn url_for(dir: StorageDir, filename: &str) -> String {
        format!("{}{}/{}", PUBLIC_PREFIX, dir.as_str(), filename)
    }

    /// Split a public URL back into its directory and filename.
    ///
    /// Returns `None` for anything that is not exactly `/uploads/<known dir>/<plain name>`.
    pub fn resolve_url(url: &str) -> Option<(StorageDir, String)> {
        let rest = url.strip_prefix(PUBLIC_PREFIX)?;
        let (segment, filename) = rest.split_once('/')?;
        let dir = StorageDir::parse(segment)?;
        validate_filename(filename).ok()?;
        Some((dir, filename.to_string()))
    }
}

pub fn thumbnail_name(image_filename: &str) -> String {
    format!("{}{}", THUMBNAIL_PREFIX, image_filename)
}

/// Reject names that could escape their directory.
pub fn validate_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || filename.starts_with('.')
        || filename.contains('\0')
    {
        return Err(StorageError::InvalidName(
            "File name contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

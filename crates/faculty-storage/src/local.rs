use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use faculty_core::StoredFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{StorageError, StorageResult};
use crate::layout::{thumbnail_name, validate_filename, StorageDir, UploadDirs, PUBLIC_PREFIX};
use crate::naming::UniqueNamer;

const MAX_NAME_ATTEMPTS: usize = 3;

/// Local filesystem storage for uploaded assets
#[derive(Clone)]
pub struct LocalStorage {
    dirs: UploadDirs,
    namer: UniqueNamer,
}

impl LocalStorage {
    pub fn new(dirs: UploadDirs) -> Self {
        Self::with_namer(dirs, UniqueNamer::default())
    }

    pub fn with_namer(dirs: UploadDirs, namer: UniqueNamer) -> Self {
        LocalStorage { dirs, namer }
    }

    pub fn dirs(&self) -> &UploadDirs {
        &self.dirs
    }

    /// Filesystem path of `filename` inside `dir`.
    pub fn path_for(&self, dir: StorageDir, filename: &str) -> StorageResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.dirs.dir(dir).join(filename))
    }

    /// Persist `data` under a fresh unique name derived from `sanitized_filename`.
    pub async fn store(
        &self,
        dir: StorageDir,
        sanitized_filename: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        let start = std::time::Instant::now();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = self.namer.unique_name(sanitized_filename);
            let path = self.path_for(dir, &filename)?;

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(StorageError::WriteFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )))
                }
            };

            let written = async {
                file.write_all(data).await?;
                file.sync_all().await
            }
            .await;
            if let Err(e) = written {
                let _ = fs::remove_file(&path).await;
                return Err(StorageError::WriteFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                )));
            }

            tracing::info!(
                path = %path.display(),
                dir = dir.as_str(),
                size_bytes = data.len(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Local storage write successful"
            );

            return Ok(StoredFile {
                url: UploadDirs::url_for(dir, &filename),
                filename,
                size: data.len() as u64,
                thumbnail_url: None,
            });
        }

        Err(StorageError::WriteFailed(format!(
            "Could not find a free name for {}",
            sanitized_filename
        )))
    }

    pub async fn file_size(&self, dir: StorageDir, filename: &str) -> StorageResult<u64> {
        let path = self.path_for(dir, filename)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StorageError::ReadFailed(e.to_string())),
        }
    }

    /// Path of an existing file, `NotFound` otherwise.
    pub async fn existing_path(&self, dir: StorageDir, filename: &str) -> StorageResult<PathBuf> {
        let path = self.path_for(dir, filename)?;
        if fs::try_exists(&path).await.unwrap_or(false) {
            Ok(path)
        } else {
            Err(StorageError::NotFound(filename.to_string()))
        }
    }

    /// Remove a single file. A missing file is not an error.
    pub async fn delete(&self, dir: StorageDir, filename: &str) -> StorageResult<bool> {
        let path = self.path_for(dir, filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Local storage delete successful");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Delete the file behind a public `/uploads/...` URL.
    ///
    /// Deleting an image also deletes its thumbnail, even when the image file
    /// itself is already gone. Returns `false` without touching the filesystem
    /// when the URL does not point into the upload root, and `false` when
    /// nothing was left to remove.
    pub async fn delete_by_url(&self, url: &str) -> StorageResult<bool> {
        if !url.starts_with(PUBLIC_PREFIX) {
            tracing::debug!(url = %url, "Ignoring delete for non-upload URL");
            return Ok(false);
        }
        let Some((dir, filename)) = UploadDirs::resolve_url(url) else {
            tracing::warn!(url = %url, "Ignoring delete for malformed upload URL");
            return Ok(false);
        };

        let deleted = self.delete(dir, &filename).await?;
        if dir == StorageDir::Images {
            let thumb = thumbnail_name(&filename);
            match self.delete(StorageDir::Thumbnails, &thumb).await {
                Ok(removed) => return Ok(deleted || removed),
                // The image itself is gone already
                Err(e) if deleted => {
                    tracing::warn!(error = %e, thumbnail = %thumb, "Failed to delete thumbnail");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(deleted)
    }
}

/// Replace `path` with `data` via a temp file in the same directory and a rename.
pub async fn write_atomic(path: &Path, data: &[u8]) -> StorageResult<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StorageError::InvalidName(path.display().to_string()))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let result = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, path).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StorageError::WriteFailed(format!(
            "Failed to replace file {}: {}",
            path.display(),
            e
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{FixedClock, SequentialIds};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tempfile::tempdir;

    async fn test_storage(root: &Path) -> LocalStorage {
        let dirs = UploadDirs::new(root);
        dirs.ensure_dirs().await.unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
        LocalStorage::with_namer(
            dirs,
            UniqueNamer::new(Arc::new(FixedClock(instant)), Arc::new(SequentialIds::default())),
        )
    }

    #[tokio::test]
    async fn test_store_writes_under_class_dir() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;

        let stored = storage
            .store(StorageDir::Pdfs, "odev.pdf", b"%PDF-1.4 test")
            .await
            .unwrap();

        assert_eq!(stored.filename, "odev_10000004032025_00000001.pdf");
        assert_eq!(stored.url, "/uploads/pdfs/odev_10000004032025_00000001.pdf");
        assert_eq!(stored.size, 13);
        let on_disk = std::fs::read(temp.path().join("pdfs").join(&stored.filename)).unwrap();
        assert_eq!(on_disk, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_store_never_overwrites_existing_file() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;

        let first = storage.store(StorageDir::Pdfs, "a.pdf", b"one").await.unwrap();
        let second = storage.store(StorageDir::Pdfs, "a.pdf", b"two").await.unwrap();

        assert_ne!(first.filename, second.filename);
        assert_eq!(
            std::fs::read(temp.path().join("pdfs").join(&first.filename)).unwrap(),
            b"one"
        );
    }

    #[tokio::test]
    async fn test_delete_by_url_cascades_to_thumbnail() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;

        let stored = storage
            .store(StorageDir::Images, "photo.jpg", b"jpeg")
            .await
            .unwrap();
        let thumb = temp
            .path()
            .join("thumbnails")
            .join(thumbnail_name(&stored.filename));
        std::fs::write(&thumb, b"thumb").unwrap();

        assert!(storage.delete_by_url(&stored.url).await.unwrap());
        assert!(!temp.path().join("images").join(&stored.filename).exists());
        assert!(!thumb.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_noop() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;

        let deleted = storage
            .delete_by_url("/uploads/images/already_gone.jpg")
            .await
            .unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_delete_by_url_removes_orphaned_thumbnail() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;
        let thumb = temp.path().join("thumbnails").join(thumbnail_name("gone.jpg"));
        std::fs::write(&thumb, b"thumb").unwrap();

        let deleted = storage
            .delete_by_url("/uploads/images/gone.jpg")
            .await
            .unwrap();

        assert!(deleted);
        assert!(!thumb.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_delete_by_url_keeps_result_when_thumbnail_delete_fails() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;
        let stored = storage
            .store(StorageDir::Images, "photo.jpg", b"jpeg")
            .await
            .unwrap();
        // A directory in the thumbnail's place makes remove_file fail
        let thumb = temp
            .path()
            .join("thumbnails")
            .join(thumbnail_name(&stored.filename));
        std::fs::create_dir(&thumb).unwrap();

        assert!(storage.delete_by_url(&stored.url).await.unwrap());
        assert!(!temp.path().join("images").join(&stored.filename).exists());
        assert!(thumb.exists());
    }

    #[tokio::test]
    async fn test_delete_by_url_ignores_foreign_urls() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;
        let outside = temp.path().join("keep.txt");
        std::fs::write(&outside, b"keep").unwrap();

        assert!(!storage.delete_by_url("https://example.com/keep.txt").await.unwrap());
        assert!(!storage.delete_by_url("/uploads/../keep.txt").await.unwrap());
        assert!(outside.exists());
    }

    #[tokio::test]
    async fn test_path_for_rejects_traversal() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;

        assert!(matches!(
            storage.path_for(StorageDir::Pdfs, "../secret.pdf"),
            Err(StorageError::InvalidName(_))
        ));
        assert!(storage.path_for(StorageDir::Pdfs, "ok.pdf").is_ok());
    }

    #[tokio::test]
    async fn test_existing_path_reports_missing_file() {
        let temp = tempdir().unwrap();
        let storage = test_storage(temp.path()).await;

        assert!(matches!(
            storage.existing_path(StorageDir::Images, "nope.jpg").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_contents() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("image.jpg");
        std::fs::write(&path, b"original").unwrap();

        write_atomic(&path, b"replacement").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"replacement");
        assert!(!temp.path().join(".image.jpg.tmp").exists());
    }
}

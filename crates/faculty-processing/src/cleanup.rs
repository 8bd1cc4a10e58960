use faculty_storage::LocalStorage;

/// Removes files whose owning record was deleted or pointed elsewhere.
///
/// Failures are logged and swallowed; the record change they follow has
/// already happened.
#[derive(Clone)]
pub struct AssetCleanup {
    storage: LocalStorage,
}

impl AssetCleanup {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Delete the file behind `url`, if any. Returns whether a file was removed.
    pub async fn release(&self, url: Option<&str>) -> bool {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            return false;
        };

        match self.storage.delete_by_url(url).await {
            Ok(deleted) => {
                if !deleted {
                    tracing::debug!(url = %url, "No file to release");
                }
                deleted
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Failed to release file");
                false
            }
        }
    }

    pub async fn release_all<'a, I>(&self, urls: I)
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        for url in urls {
            self.release(url).await;
        }
    }

    /// Release `old` when an update replaced it with a different `new` value.
    pub async fn release_replaced(&self, old: Option<&str>, new: Option<&str>) -> bool {
        match (old, new) {
            (Some(old), Some(new)) if old != new => self.release(Some(old)).await,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_storage::{StorageDir, UploadDirs};
    use tempfile::tempdir;

    async fn storage_in(root: &std::path::Path) -> LocalStorage {
        let dirs = UploadDirs::new(root);
        dirs.ensure_dirs().await.unwrap();
        LocalStorage::new(dirs)
    }

    #[tokio::test]
    async fn test_release_missing_file_is_not_an_error() {
        let temp = tempdir().unwrap();
        let cleanup = AssetCleanup::new(storage_in(temp.path()).await);

        assert!(!cleanup.release(Some("/uploads/images/gone.jpg")).await);
        assert!(!cleanup.release(None).await);
        assert!(!cleanup.release(Some("")).await);
    }

    #[tokio::test]
    async fn test_release_replaced_only_when_changed() {
        let temp = tempdir().unwrap();
        let storage = storage_in(temp.path()).await;
        let stored = storage
            .store(StorageDir::Pdfs, "cv.pdf", b"%PDF")
            .await
            .unwrap();
        let cleanup = AssetCleanup::new(storage);

        assert!(!cleanup.release_replaced(Some(&stored.url), Some(&stored.url)).await);
        assert!(temp.path().join("pdfs").join(&stored.filename).exists());

        assert!(
            cleanup
                .release_replaced(Some(&stored.url), Some("/uploads/pdfs/new.pdf"))
                .await
        );
        assert!(!temp.path().join("pdfs").join(&stored.filename).exists());
    }
}

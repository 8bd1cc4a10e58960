//! Announcement removal
//!
//! Deleting an announcement also releases its image. The record goes first;
//! an image file that is already missing does not fail the delete.

use async_trait::async_trait;
use faculty_core::{models::Announcement, AppError};
use faculty_db::AnnouncementRepository;
use faculty_processing::AssetCleanup;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Remove the record and return it, `None` when it did not exist.
    async fn delete_announcement(&self, id: Uuid) -> Result<Option<Announcement>, AppError>;
}

#[async_trait]
impl AnnouncementStore for AnnouncementRepository {
    async fn delete_announcement(&self, id: Uuid) -> Result<Option<Announcement>, AppError> {
        self.delete(id).await
    }
}

#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
    cleanup: AssetCleanup,
}

impl AnnouncementService {
    pub fn new(store: Arc<dyn AnnouncementStore>, cleanup: AssetCleanup) -> Self {
        Self { store, cleanup }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<Announcement, AppError> {
        let deleted = self
            .store
            .delete_announcement(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;

        let released = self.cleanup.release(deleted.image_url.as_deref()).await;
        tracing::info!(announcement_id = %id, image_released = released, "Announcement deleted");

        Ok(deleted)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const GALLERY_PHOTO: &str = "photo";
pub const GALLERY_VIDEO: &str = "video";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// photo or video
    pub item_type: String,
    /// Uploaded file path for photos, external link for videos.
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub date: Option<String>,
    pub is_published: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GalleryItem {
    pub fn is_photo(&self) -> bool {
        self.item_type == GALLERY_PHOTO
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GalleryItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<GalleryItem> for GalleryItemResponse {
    fn from(item: GalleryItem) -> Self {
        let (image_url, video_url) = match item.item_type.as_str() {
            GALLERY_PHOTO => (Some(item.url), None),
            GALLERY_VIDEO => (None, Some(item.url)),
            _ => (None, None),
        };
        GalleryItemResponse {
            id: item.id,
            title: item.title,
            description: item.description,
            kind: item.item_type,
            image_url,
            video_url,
            thumbnail_url: item.thumbnail_url,
            created_at: item.created_at,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGalleryItemRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "type")]
    pub item_type: String,
    #[validate(length(min = 1, max = 500, message = "URL must be between 1 and 500 characters"))]
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GalleryQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub item_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: &str, url: &str) -> GalleryItem {
        let now = Utc::now();
        GalleryItem {
            id: Uuid::new_v4(),
            title: "Lab day".to_string(),
            description: None,
            item_type: kind.to_string(),
            url: url.to_string(),
            thumbnail_url: None,
            date: None,
            is_published: true,
            order_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_photo_exposes_image_url() {
        let response = GalleryItemResponse::from(item(GALLERY_PHOTO, "/uploads/images/a.jpg"));
        assert_eq!(response.image_url.as_deref(), Some("/uploads/images/a.jpg"));
        assert!(response.video_url.is_none());
    }

    #[test]
    fn test_video_exposes_video_url() {
        let response = GalleryItemResponse::from(item(GALLERY_VIDEO, "https://youtu.be/x"));
        assert!(response.image_url.is_none());
        assert_eq!(response.video_url.as_deref(), Some("https://youtu.be/x"));
    }
}

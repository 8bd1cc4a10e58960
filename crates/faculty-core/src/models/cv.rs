use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// The single CV page of the department head
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cv {
    pub id: Uuid,
    pub full_name: String,
    pub title: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
    pub bio: Option<String>,
    /// JSON encoded list
    pub education: Option<String>,
    /// JSON encoded list
    pub experience: Option<String>,
    pub research_interests: Option<String>,
    pub pdf_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CvResponse {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
    pub bio: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub research_interests: Option<String>,
    pub photo_url: Option<String>,
    pub file_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cv> for CvResponse {
    fn from(cv: Cv) -> Self {
        CvResponse {
            id: cv.id,
            name: cv.full_name,
            title: cv.title,
            email: cv.email,
            phone: cv.phone,
            office: cv.office,
            bio: cv.bio,
            education: cv.education,
            experience: cv.experience,
            research_interests: cv.research_interests,
            photo_url: cv.photo_url,
            file_url: cv.pdf_url,
            updated_at: cv.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCvRequest {
    #[serde(alias = "name")]
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub research_interests: Option<String>,
    #[serde(default, alias = "file_url")]
    pub pdf_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateCvRequest {
    #[serde(default, alias = "name")]
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub full_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub research_interests: Option<String>,
    #[serde(default, alias = "file_url")]
    pub pdf_url: Option<String>,
}

impl UpdateCvRequest {
    /// Turn an update into a create for the first CV. `None` without a name.
    pub fn into_create(self) -> Option<CreateCvRequest> {
        Some(CreateCvRequest {
            full_name: self.full_name?,
            title: self.title,
            photo_url: self.photo_url,
            email: self.email,
            phone: self.phone,
            office: self.office,
            bio: self.bio,
            education: self.education,
            experience: self.experience,
            research_interests: self.research_interests,
            pdf_url: self.pdf_url,
        })
    }
}

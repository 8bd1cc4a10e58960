use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    /// Lisans, Yüksek Lisans, Doktora
    pub level: Option<String>,
    /// Güz or Bahar
    pub semester: Option<String>,
    pub credits: Option<i32>,
    pub description: Option<String>,
    pub syllabus_url: Option<String>,
    pub materials_url: Option<String>,
    pub content: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 20, message = "Course code must be between 1 and 20 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "Course name must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 60, message = "Credits must be between 0 and 60"))]
    pub credits: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub syllabus_url: Option<String>,
    #[serde(default)]
    pub materials_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateCourseRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 20, message = "Course code must be between 1 and 20 characters"))]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub credits: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub syllabus_url: Option<String>,
    #[serde(default)]
    pub materials_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CourseQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Homework definition an instructor opens for a course
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HomeworkAssignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A student's uploaded homework file
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Homework {
    pub id: Uuid,
    pub assignment_id: Option<Uuid>,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub student_number: String,
    pub student_name: String,
    pub course_code: String,
    pub course_name: String,
    pub file_url: String,
    pub upload_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Values needed to insert a homework submission row.
#[derive(Debug, Clone)]
pub struct NewHomework {
    pub assignment_id: Option<Uuid>,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub student_number: String,
    pub student_name: String,
    pub course_code: String,
    pub course_name: String,
    pub file_url: String,
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAssignmentRequest {
    pub course_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateAssignmentRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AssignmentQuery {
    #[serde(default)]
    pub course_id: Option<Uuid>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Rejects windows whose due time is not strictly after the start time.
pub fn ensure_due_after_start(
    start_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
) -> Result<(), AppError> {
    if due_date <= start_date {
        return Err(AppError::BadRequest(
            "Due date must be after the start date".to_string(),
        ));
    }
    Ok(())
}

impl UpdateAssignmentRequest {
    /// Start and due dates after applying this update to `current`.
    pub fn merged_window(&self, current: &HomeworkAssignment) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.start_date.unwrap_or(current.start_date),
            self.due_date.unwrap_or(current.due_date),
        )
    }
}

//! Homework submission handlers
//!
//! Students submit without a token; the form carries their number and name.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{Homework, MessageResponse};
use faculty_core::AppError;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::homework::SubmissionRequest;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeworkFileResponse {
    pub success: bool,
    pub message: String,
    pub file_url: String,
}

#[utoipa::path(
    post,
    path = "/api/homeworks",
    tag = "homeworks",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submission recorded", body = Homework),
        (status = 400, description = "Window closed, wrong type or file too large", body = ErrorResponse),
        (status = 404, description = "Course, assignment or student not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_homework(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut form = extract_upload_form(multipart).await?;

    let request = SubmissionRequest {
        student_number: form.required("student_number")?,
        student_name: form.required("student_name")?,
        course_id: form.required_uuid("course_id")?,
        assignment_id: form.optional_uuid("assignment_id")?,
        notes: form.optional("notes"),
        file: form.take_file()?,
    };

    let homework = state.homework.submit(request).await?;
    Ok((StatusCode::CREATED, Json(homework)))
}

/// Store a PDF without recording a submission.
#[utoipa::path(
    post,
    path = "/api/homeworks/upload",
    tag = "homeworks",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = HomeworkFileResponse),
        (status = 400, description = "Wrong type or file too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_homework_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut form = extract_upload_form(multipart).await?;
    let stored = state
        .uploads
        .pipeline
        .accept_pdf_with_limit(form.take_file()?, state.config.max_homework_size_bytes)
        .await
        .map_err(AppError::from)?;

    Ok(Json(HomeworkFileResponse {
        success: true,
        message: "Homework uploaded successfully".to_string(),
        file_url: stored.url,
    }))
}

#[utoipa::path(
    get,
    path = "/api/homeworks/my-homeworks/{student_number}",
    tag = "homeworks",
    params(("student_number" = String, Path, description = "Student number")),
    responses(
        (status = 200, description = "Submissions of the student, newest first", body = Vec<Homework>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_student_homeworks(
    State(state): State<Arc<AppState>>,
    Path(student_number): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let homeworks = state
        .db
        .homework_repository
        .list_for_student(&student_number)
        .await?;

    Ok(Json(homeworks))
}

#[utoipa::path(
    get,
    path = "/api/homeworks",
    tag = "homeworks",
    responses(
        (status = 200, description = "All submissions, newest first", body = Vec<Homework>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn list_homeworks(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let homeworks = state.db.homework_repository.list_all().await?;
    Ok(Json(homeworks))
}

#[utoipa::path(
    delete,
    path = "/api/homeworks/{id}",
    tag = "homeworks",
    params(("id" = Uuid, Path, description = "Homework ID")),
    responses(
        (status = 200, description = "Submission deleted", body = MessageResponse),
        (status = 404, description = "Homework not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_homework(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state
        .db
        .homework_repository
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Homework not found".to_string()))?;

    state
        .uploads
        .cleanup
        .release(Some(deleted.file_url.as_str()))
        .await;
    tracing::info!(homework_id = %id, student_number = %deleted.student_number, "Homework deleted");

    Ok(Json(MessageResponse::new("Homework deleted successfully")))
}

//! Homework assignment handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{
    ensure_due_after_start, AssignmentQuery, CreateAssignmentRequest, HomeworkAssignment,
    MessageResponse, UpdateAssignmentRequest,
};
use faculty_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Assignment not found".to_string())
}

#[utoipa::path(
    post,
    path = "/api/homework-assignments",
    tag = "homework-assignments",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created", body = HomeworkAssignment),
        (status = 400, description = "Due date not after start date", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request), fields(course_id = %request.course_id))]
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateAssignmentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if state
        .db
        .course_repository
        .get(request.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Course not found".to_string()).into());
    }
    ensure_due_after_start(request.start_date, request.due_date)?;

    let assignment = state.db.assignment_repository.create(&request).await?;
    tracing::info!(
        assignment_id = %assignment.id,
        due_date = %assignment.due_date,
        "Assignment created"
    );

    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    get,
    path = "/api/homework-assignments",
    tag = "homework-assignments",
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignments, latest due date first", body = Vec<HomeworkAssignment>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AssignmentQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let assignments = state
        .db
        .assignment_repository
        .list(query.course_id, query.is_active)
        .await?;

    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/api/homework-assignments/{id}",
    tag = "homework-assignments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment", body = HomeworkAssignment),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let assignment = state
        .db
        .assignment_repository
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(assignment))
}

#[utoipa::path(
    put,
    path = "/api/homework-assignments/{id}",
    tag = "homework-assignments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentRequest,
    responses(
        (status = 200, description = "Assignment updated", body = HomeworkAssignment),
        (status = 400, description = "Due date not after start date", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateAssignmentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let current = state
        .db
        .assignment_repository
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    let (start_date, due_date) = request.merged_window(&current);
    ensure_due_after_start(start_date, due_date)?;

    let updated = state
        .db
        .assignment_repository
        .update(id, &request)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(updated))
}

/// Submissions keep their files; they only lose the assignment link.
#[utoipa::path(
    delete,
    path = "/api/homework-assignments/{id}",
    tag = "homework-assignments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment deleted", body = MessageResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.assignment_repository.delete(id).await? {
        return Err(not_found().into());
    }
    tracing::info!(assignment_id = %id, "Assignment deleted");

    Ok(Json(MessageResponse::new("Assignment deleted successfully")))
}

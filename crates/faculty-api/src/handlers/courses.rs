//! Course catalogue handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{
    Course, CourseQuery, CreateCourseRequest, MessageResponse, Pagination, UpdateCourseRequest,
};
use faculty_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Course not found".to_string())
}

fn duplicate_code() -> AppError {
    AppError::BadRequest("Course code already exists".to_string())
}

#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Active courses ordered by code", body = Vec<Course>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CourseQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (skip, limit) = Pagination::from_parts(query.skip, query.limit).bounds();
    let courses = state
        .db
        .course_repository
        .list_active(query.level.as_deref(), query.semester.as_deref(), skip, limit)
        .await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let course = state
        .db
        .course_repository
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid input or duplicate code", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request), fields(code = %request.code))]
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateCourseRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if state
        .db
        .course_repository
        .code_exists(&request.code, None)
        .await?
    {
        return Err(duplicate_code().into());
    }

    let course = state.db.course_repository.create(&request).await?;
    tracing::info!(course_id = %course.id, code = %course.code, "Course created");

    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Invalid input or duplicate code", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateCourseRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if let Some(code) = request.code.as_deref() {
        if state
            .db
            .course_repository
            .code_exists(code, Some(id))
            .await?
        {
            return Err(duplicate_code().into());
        }
    }

    let course = state
        .db
        .course_repository
        .update(id, &request)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(course))
}

/// Homework rows go with the course; their files are released afterwards.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file_urls = state
        .db
        .homework_repository
        .file_urls_for_course(id)
        .await?;

    if !state.db.course_repository.delete(id).await? {
        return Err(not_found().into());
    }

    state
        .uploads
        .cleanup
        .release_all(file_urls.iter().map(|url| Some(url.as_str())).collect::<Vec<_>>())
        .await;
    tracing::info!(course_id = %id, released_files = file_urls.len(), "Course deleted");

    Ok(Json(MessageResponse::new("Course deleted successfully")))
}

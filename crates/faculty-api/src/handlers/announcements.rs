//! Announcement handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{
    Announcement, AnnouncementQuery, CreateAnnouncementRequest, MessageResponse, Pagination,
    UpdateAnnouncementRequest,
};
use faculty_core::{AppError, AssetClass, UploadResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::accept_upload;
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Announcement not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "announcements",
    params(AnnouncementQuery),
    responses(
        (status = 200, description = "Published announcements, newest first", body = Vec<Announcement>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnnouncementQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (skip, limit) = Pagination::from_parts(query.skip, query.limit).bounds();
    let announcements = state
        .db
        .announcement_repository
        .list_published(query.announcement_type.as_deref(), skip, limit)
        .await?;

    Ok(Json(announcements))
}

/// Fetching an announcement counts as a view.
#[utoipa::path(
    get,
    path = "/api/announcements/{id}",
    tag = "announcements",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement", body = Announcement),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_announcement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let announcement = state
        .db
        .announcement_repository
        .view(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(announcement))
}

#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = "announcements",
    request_body = CreateAnnouncementRequest,
    responses(
        (status = 201, description = "Announcement created", body = Announcement),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn create_announcement(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let announcement = state.db.announcement_repository.create(&request).await?;
    tracing::info!(announcement_id = %announcement.id, "Announcement created");

    Ok((StatusCode::CREATED, Json(announcement)))
}

#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    tag = "announcements",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    request_body = UpdateAnnouncementRequest,
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_announcement(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateAnnouncementRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let current = state
        .db
        .announcement_repository
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    let updated = state
        .db
        .announcement_repository
        .update(id, &request)
        .await?
        .ok_or_else(not_found)?;

    state
        .uploads
        .cleanup
        .release_replaced(current.image_url.as_deref(), updated.image_url.as_deref())
        .await;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    tag = "announcements",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted", body = MessageResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_announcement(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.announcements.delete(id).await?;

    Ok(Json(MessageResponse::new("Announcement deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/announcements/upload-image",
    tag = "announcements",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Invalid asset type or file too large", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, multipart))]
pub async fn upload_announcement_image(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = accept_upload(&state, AssetClass::Image, multipart).await?;
    Ok(Json(response))
}

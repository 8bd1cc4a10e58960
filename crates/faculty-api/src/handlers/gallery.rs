//! Gallery handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{
    CreateGalleryItemRequest, GalleryItemResponse, GalleryQuery, MessageResponse, Pagination,
    GALLERY_PHOTO, GALLERY_VIDEO,
};
use faculty_core::{AppError, AssetClass, UploadResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::accept_upload;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/gallery",
    tag = "gallery",
    params(GalleryQuery),
    responses(
        (status = 200, description = "Published gallery items", body = Vec<GalleryItemResponse>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_gallery(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GalleryQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (skip, limit) = Pagination::from_parts(query.skip, query.limit).bounds();
    let items = state
        .db
        .gallery_repository
        .list_published(query.item_type.as_deref(), skip, limit)
        .await?;

    let responses: Vec<GalleryItemResponse> =
        items.into_iter().map(GalleryItemResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/gallery",
    tag = "gallery",
    request_body = CreateGalleryItemRequest,
    responses(
        (status = 201, description = "Gallery item created", body = GalleryItemResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request), fields(item_type = %request.item_type))]
pub async fn create_gallery_item(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateGalleryItemRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if request.item_type != GALLERY_PHOTO && request.item_type != GALLERY_VIDEO {
        return Err(AppError::InvalidInput(format!(
            "Gallery item type must be '{}' or '{}'",
            GALLERY_PHOTO, GALLERY_VIDEO
        ))
        .into());
    }

    let item = state.db.gallery_repository.create(&request).await?;
    tracing::info!(item_id = %item.id, "Gallery item created");

    Ok((StatusCode::CREATED, Json(GalleryItemResponse::from(item))))
}

/// Photos take their image file (and its thumbnail) with them. Video URLs are external.
#[utoipa::path(
    delete,
    path = "/api/gallery/{id}",
    tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item deleted", body = MessageResponse),
        (status = 404, description = "Gallery item not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_gallery_item(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state
        .db
        .gallery_repository
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

    if deleted.is_photo() {
        let cleanup = &state.uploads.cleanup;
        cleanup.release(Some(deleted.url.as_str())).await;
        cleanup.release(deleted.thumbnail_url.as_deref()).await;
    }
    tracing::info!(item_id = %id, "Gallery item deleted");

    Ok(Json(MessageResponse::new("Gallery item deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/gallery/upload-photo",
    tag = "gallery",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored with thumbnail", body = UploadResponse),
        (status = 400, description = "Invalid asset type or image could not be decoded", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, multipart))]
pub async fn upload_gallery_photo(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = accept_upload(&state, AssetClass::Image, multipart).await?;
    Ok(Json(response))
}

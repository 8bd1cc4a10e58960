//! Publication handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{
    CreatePublicationRequest, MessageResponse, Pagination, PublicationQuery, PublicationResponse,
    UpdatePublicationRequest,
};
use faculty_core::{AppError, AssetClass, UploadResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::accept_upload;
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Publication not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/publications",
    tag = "publications",
    params(PublicationQuery),
    responses(
        (status = 200, description = "Published entries, most recent year first", body = Vec<PublicationResponse>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_publications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicationQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (skip, limit) = Pagination::from_parts(query.skip, query.limit).bounds();
    let publications = state
        .db
        .publication_repository
        .list_published(query.publication_type.as_deref(), skip, limit)
        .await?;

    let responses: Vec<PublicationResponse> = publications
        .into_iter()
        .map(PublicationResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/publications/{id}",
    tag = "publications",
    params(("id" = Uuid, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication", body = PublicationResponse),
        (status = 404, description = "Publication not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_publication(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let publication = state
        .db
        .publication_repository
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(PublicationResponse::from(publication)))
}

#[utoipa::path(
    post,
    path = "/api/publications",
    tag = "publications",
    request_body = CreatePublicationRequest,
    responses(
        (status = 201, description = "Publication created", body = PublicationResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn create_publication(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreatePublicationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let publication = state.db.publication_repository.create(&request).await?;
    tracing::info!(publication_id = %publication.id, "Publication created");

    Ok((StatusCode::CREATED, Json(PublicationResponse::from(publication))))
}

#[utoipa::path(
    put,
    path = "/api/publications/{id}",
    tag = "publications",
    params(("id" = Uuid, Path, description = "Publication ID")),
    request_body = UpdatePublicationRequest,
    responses(
        (status = 200, description = "Publication updated", body = PublicationResponse),
        (status = 404, description = "Publication not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_publication(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePublicationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let current = state
        .db
        .publication_repository
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    let updated = state
        .db
        .publication_repository
        .update(id, &request)
        .await?
        .ok_or_else(not_found)?;

    state
        .uploads
        .cleanup
        .release_replaced(current.pdf_url.as_deref(), updated.pdf_url.as_deref())
        .await;

    Ok(Json(PublicationResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/publications/{id}",
    tag = "publications",
    params(("id" = Uuid, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication deleted", body = MessageResponse),
        (status = 404, description = "Publication not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_publication(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state
        .db
        .publication_repository
        .delete(id)
        .await?
        .ok_or_else(not_found)?;

    state.uploads.cleanup.release(deleted.pdf_url.as_deref()).await;
    tracing::info!(publication_id = %id, "Publication deleted");

    Ok(Json(MessageResponse::new("Publication deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/publications/upload-pdf",
    tag = "publications",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF stored", body = UploadResponse),
        (status = 400, description = "Invalid asset type or file too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, multipart))]
pub async fn upload_publication_pdf(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = accept_upload(&state, AssetClass::Pdf, multipart).await?;
    Ok(Json(response))
}

//! Curriculum vitae handlers
//!
//! The site carries a single CV. `GET /cv` still answers with a list so the
//! frontend can treat "none yet" as an empty array.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use faculty_core::models::{CreateCvRequest, CvResponse, UpdateCvRequest};
use faculty_core::{AppError, AssetClass, UploadResponse};
use std::sync::Arc;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::accept_upload;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/cv",
    tag = "cv",
    responses(
        (status = 200, description = "Zero or one CV", body = Vec<CvResponse>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_cv(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, HttpAppError> {
    let cv = state.db.cv_repository.get().await?;
    let responses: Vec<CvResponse> = cv.into_iter().map(CvResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/cv",
    tag = "cv",
    request_body = CreateCvRequest,
    responses(
        (status = 201, description = "CV created", body = CvResponse),
        (status = 400, description = "A CV already exists", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn create_cv(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateCvRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if state.db.cv_repository.get().await?.is_some() {
        return Err(
            AppError::BadRequest("CV already exists. Use PUT to update.".to_string()).into(),
        );
    }

    let cv = state.db.cv_repository.create(&request).await?;
    tracing::info!(cv_id = %cv.id, "CV created");

    Ok((StatusCode::CREATED, Json(CvResponse::from(cv))))
}

#[utoipa::path(
    put,
    path = "/api/cv",
    tag = "cv",
    request_body = UpdateCvRequest,
    responses(
        (status = 200, description = "CV updated, or created when none existed", body = CvResponse),
        (status = 400, description = "No CV yet and no name given", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_cv(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    ValidatedJson(request): ValidatedJson<UpdateCvRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Some(current) = state.db.cv_repository.get().await? else {
        let create = request.into_create().ok_or_else(|| {
            AppError::BadRequest("Name is required to create the CV".to_string())
        })?;
        let cv = state.db.cv_repository.create(&create).await?;
        tracing::info!(cv_id = %cv.id, "CV created on update");
        return Ok(Json(CvResponse::from(cv)));
    };

    let updated = state
        .db
        .cv_repository
        .update(current.id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("CV not found".to_string()))?;

    let cleanup = &state.uploads.cleanup;
    cleanup
        .release_replaced(current.photo_url.as_deref(), updated.photo_url.as_deref())
        .await;
    cleanup
        .release_replaced(current.pdf_url.as_deref(), updated.pdf_url.as_deref())
        .await;

    Ok(Json(CvResponse::from(updated)))
}

#[utoipa::path(
    post,
    path = "/api/cv/upload-pdf",
    tag = "cv",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF stored", body = UploadResponse),
        (status = 400, description = "Invalid asset type or file too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, multipart))]
pub async fn upload_cv_pdf(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = accept_upload(&state, AssetClass::Pdf, multipart).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cv/upload-photo",
    tag = "cv",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "Invalid asset type or image could not be decoded", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin, multipart))]
pub async fn upload_cv_photo(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = accept_upload(&state, AssetClass::Image, multipart).await?;
    Ok(Json(response))
}

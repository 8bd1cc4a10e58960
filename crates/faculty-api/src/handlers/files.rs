//! Direct file views for stored PDFs and images

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use faculty_core::AppError;
use faculty_processing::sanitize_filename;
use faculty_storage::{StorageDir, StorageError};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

// The normalizer re-encodes every stored image as JPEG
const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
const PDF_CONTENT_TYPE: &str = "application/pdf";

async fn stream_file(
    state: &AppState,
    dir: StorageDir,
    name: &str,
    content_type: &str,
) -> Result<Response<Body>, AppError> {
    let filename = sanitize_filename(name);
    let path = state
        .uploads
        .storage()
        .existing_path(dir, &filename)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) | StorageError::InvalidName(_) => {
                AppError::AssetNotFound(filename.clone())
            }
            other => AppError::from(other),
        })?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| AppError::AssetNotFound(filename.clone()))?;

    tracing::debug!(dir = dir.as_str(), filename = %filename, "Serving stored file");

    let disposition = format!("inline; filename=\"{}\"", filename);
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition.as_str())
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/files/pdf/{name}",
    tag = "files",
    params(("name" = String, Path, description = "Stored PDF filename")),
    responses(
        (status = 200, description = "PDF file", content_type = "application/pdf"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn view_pdf(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    Ok(stream_file(&state, StorageDir::Pdfs, &name, PDF_CONTENT_TYPE).await?)
}

#[utoipa::path(
    get,
    path = "/api/files/image/{name}",
    tag = "files",
    params(("name" = String, Path, description = "Stored image filename")),
    responses(
        (status = 200, description = "Image file", content_type = "image/jpeg"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn view_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    Ok(stream_file(&state, StorageDir::Images, &name, IMAGE_CONTENT_TYPE).await?)
}

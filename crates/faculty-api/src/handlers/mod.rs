pub mod analytics;
pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod cv;
pub mod files;
pub mod gallery;
pub mod homeworks;
pub mod publications;
pub mod students;

use axum::extract::Multipart;
use faculty_core::{AppError, AssetClass, UploadResponse};

use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;

/// Take the `file` field of a form through the pipeline for `class`.
pub(crate) async fn accept_upload(
    state: &AppState,
    class: AssetClass,
    multipart: Multipart,
) -> Result<UploadResponse, AppError> {
    let upload = extract_multipart_file(multipart).await?;
    Ok(state.uploads.pipeline.accept(class, upload).await?)
}

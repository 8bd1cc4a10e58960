//! Upload pipeline
//!
//! validate -> sanitize -> store, and for images normalize -> thumbnail.
//! Nothing touches the disk until validation has passed.

use bytes::Bytes;
use faculty_core::{AppError, AssetClass, Config, UploadResponse};
use faculty_storage::{thumbnail_name, LocalStorage, StorageDir, StorageError, UploadDirs};

use crate::imaging::{self, ImageError, NormalizerSettings, ThumbnailSettings};
use crate::sanitizer::sanitize_filename;
use crate::validator::{AssetValidator, ValidationError};

/// A fully buffered file taken out of a request.
#[derive(Debug, Clone)]
pub struct IncomingUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

#[derive(Clone)]
pub struct UploadPipeline {
    storage: LocalStorage,
    normalizer: NormalizerSettings,
    thumbnail: ThumbnailSettings,
    max_pdf_size: usize,
}

impl UploadPipeline {
    pub fn new(
        storage: LocalStorage,
        normalizer: NormalizerSettings,
        thumbnail: ThumbnailSettings,
        max_pdf_size: usize,
    ) -> Self {
        Self {
            storage,
            normalizer,
            thumbnail,
            max_pdf_size,
        }
    }

    pub fn from_config(storage: LocalStorage, config: &Config) -> Self {
        Self::new(
            storage,
            NormalizerSettings::from_config(config),
            ThumbnailSettings::from_config(config),
            config.max_pdf_size_bytes,
        )
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Accept an upload of `class` with the general ceiling for that class.
    pub async fn accept(
        &self,
        class: AssetClass,
        upload: IncomingUpload,
    ) -> Result<UploadResponse, PipelineError> {
        let validator = match class {
            AssetClass::Image => AssetValidator::image(),
            AssetClass::Pdf => AssetValidator::pdf(self.max_pdf_size),
        };
        self.run(validator, upload).await
    }

    /// Accept a PDF against a tighter ceiling, as used for homework.
    pub async fn accept_pdf_with_limit(
        &self,
        upload: IncomingUpload,
        max_size: usize,
    ) -> Result<UploadResponse, PipelineError> {
        self.run(AssetValidator::pdf(max_size), upload).await
    }

    async fn run(
        &self,
        validator: AssetValidator,
        upload: IncomingUpload,
    ) -> Result<UploadResponse, PipelineError> {
        validator.validate(&upload.content_type, upload.data.len())?;

        let class = validator.class();
        let dir = StorageDir::for_class(class);
        let sanitized = sanitize_filename(&upload.filename);
        let stored = self.storage.store(dir, &sanitized, &upload.data).await?;

        tracing::info!(
            class = %class,
            original_filename = %upload.filename,
            filename = %stored.filename,
            size_bytes = stored.size,
            "Upload stored"
        );

        let mut response = UploadResponse {
            filename: stored.filename,
            url: stored.url,
            size: stored.size,
            thumbnail_url: None,
            optimized_size: None,
        };

        if class == AssetClass::Image {
            let path = self.storage.path_for(dir, &response.filename)?;

            let normalized = match imaging::normalize_file(&path, self.normalizer).await {
                Ok(normalized) => normalized,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        filename = %response.filename,
                        "Image normalization failed, discarding upload"
                    );
                    if let Err(delete_err) = self.storage.delete(dir, &response.filename).await {
                        tracing::warn!(error = %delete_err, "Failed to remove rejected image");
                    }
                    return Err(e.into());
                }
            };
            response.optimized_size = Some(normalized.data.len() as u64);

            response.thumbnail_url = self.thumbnail_for(&response.filename).await;
        }

        Ok(response)
    }

    /// Thumbnail failures never fail the upload.
    async fn thumbnail_for(&self, filename: &str) -> Option<String> {
        let thumb = thumbnail_name(filename);
        let source = self.storage.path_for(StorageDir::Images, filename).ok()?;
        let destination = self.storage.path_for(StorageDir::Thumbnails, &thumb).ok()?;

        match imaging::create_thumbnail(&source, &destination, self.thumbnail).await {
            Ok(()) => Some(UploadDirs::url_for(StorageDir::Thumbnails, &thumb)),
            Err(e) => {
                tracing::warn!(error = %e, filename = %filename, "Thumbnail generation failed");
                None
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { size, max } => AppError::AssetTooLarge { size, max },
            ValidationError::InvalidContentType { allowed, .. } => AppError::InvalidAssetType(
                format!("Invalid file type. Allowed: {}", allowed.join(", ")),
            ),
            ValidationError::EmptyFile => AppError::InvalidInput("File is empty".to_string()),
        }
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Decode(_) => {
                AppError::ImageProcessing("Image could not be decoded".to_string())
            }
            ImageError::Encode(_) => {
                AppError::ImageProcessing("Image could not be re-encoded".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(e) => e.into(),
            PipelineError::Storage(e) => e.into(),
            PipelineError::Image(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_core::ErrorMetadata;

    #[test]
    fn test_validation_errors_map_to_asset_errors() {
        let too_large: AppError = PipelineError::from(ValidationError::FileTooLarge {
            size: 4 * 1024 * 1024,
            max: 3 * 1024 * 1024,
        })
        .into();
        assert_eq!(too_large.error_code(), "ASSET_TOO_LARGE");

        let wrong_type: AppError = PipelineError::from(ValidationError::InvalidContentType {
            content_type: "text/plain".to_string(),
            allowed: vec!["application/pdf".to_string()],
        })
        .into();
        assert_eq!(wrong_type.error_code(), "INVALID_ASSET_TYPE");
        assert_eq!(wrong_type.http_status_code(), 400);
    }

    #[test]
    fn test_decode_failure_is_image_processing_error() {
        let err: AppError = PipelineError::from(ImageError::Decode("bad".to_string())).into();
        assert_eq!(err.error_code(), "IMAGE_PROCESSING_ERROR");
        assert_eq!(err.http_status_code(), 400);
    }
}

use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for faculty_core::AppError {
    fn from(err: StorageError) -> Self {
        use faculty_core::AppError;
        match err {
            StorageError::NotFound(name) => AppError::AssetNotFound(name),
            StorageError::InvalidName(_) => AppError::BadRequest("Invalid file name".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_core::{AppError, ErrorMetadata};

    #[test]
    fn test_not_found_maps_to_asset_not_found() {
        let err: AppError = StorageError::NotFound("missing.pdf".to_string()).into();
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.client_message(), "File not found");
    }

    #[test]
    fn test_write_failure_hides_path() {
        let err: AppError =
            StorageError::WriteFailed("Failed to create file /srv/uploads/pdfs/x.pdf".to_string())
                .into();
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("/srv"));
    }
}

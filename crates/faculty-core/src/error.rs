//! Error types module
//!
//! Every failure the backend can report is unified under [`AppError`]. Each
//! variant describes its own HTTP presentation through [`ErrorMetadata`], so the
//! API layer only has to render it.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Invalid asset type: {0}")]
    InvalidAssetType(String),

    #[error("Asset too large: {size} bytes exceeds limit of {max} bytes")]
    AssetTooLarge { size: usize, max: usize },

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Assignment not open yet: {0}")]
    AssignmentNotOpenYet(String),

    #[error("Assignment closed: {0}")]
    AssignmentClosed(String),

    #[error("Assignment inactive: {0}")]
    AssignmentInactive(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::ImageProcessing(_) => (
            400,
            "IMAGE_PROCESSING_ERROR",
            false,
            Some("Check image format and try a different file"),
            false,
            LogLevel::Warn,
        ),
        AppError::InvalidAssetType(_) => (
            400,
            "INVALID_ASSET_TYPE",
            false,
            Some("Upload a file of an allowed type"),
            false,
            LogLevel::Debug,
        ),
        AppError::AssetTooLarge { .. } => (
            400,
            "ASSET_TOO_LARGE",
            false,
            Some("Reduce file size and upload again"),
            false,
            LogLevel::Debug,
        ),
        AppError::AssetNotFound(_) => (
            404,
            "ASSET_NOT_FOUND",
            false,
            Some("Verify the file name"),
            false,
            LogLevel::Debug,
        ),
        AppError::AssignmentNotOpenYet(_) => (
            400,
            "ASSIGNMENT_NOT_OPEN_YET",
            true,
            Some("Wait until the assignment opens"),
            false,
            LogLevel::Debug,
        ),
        AppError::AssignmentClosed(_) => (
            400,
            "ASSIGNMENT_CLOSED",
            false,
            Some("Contact the instructor about late submissions"),
            false,
            LogLevel::Debug,
        ),
        AppError::AssignmentInactive(_) => (
            400,
            "ASSIGNMENT_INACTIVE",
            false,
            Some("Contact the instructor"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Check authentication token"),
            false,
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (
            403,
            "FORBIDDEN",
            false,
            Some("Sign in with an account that has access"),
            false,
            LogLevel::Debug,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::InvalidAssetType(_) => "InvalidAssetType",
            AppError::AssetTooLarge { .. } => "AssetTooLarge",
            AppError::AssetNotFound(_) => "AssetNotFound",
            AppError::AssignmentNotOpenYet(_) => "AssignmentNotOpenYet",
            AppError::AssignmentClosed(_) => "AssignmentClosed",
            AppError::AssignmentInactive(_) => "AssignmentInactive",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::ImageProcessing(ref msg) => msg.clone(),
            AppError::InvalidAssetType(ref msg) => msg.clone(),
            AppError::AssetTooLarge { max, .. } => format!(
                "File is too large. Maximum size: {}MB",
                *max as f64 / (1024.0 * 1024.0)
            ),
            AppError::AssetNotFound(_) => "File not found".to_string(),
            AppError::AssignmentNotOpenYet(ref msg) => msg.clone(),
            AppError::AssignmentClosed(ref msg) => msg.clone(),
            AppError::AssignmentInactive(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Forbidden(ref msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_asset_too_large() {
        let err = AppError::AssetTooLarge {
            size: 4 * 1024 * 1024,
            max: 3 * 1024 * 1024,
        };
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "ASSET_TOO_LARGE");
        assert!(err.client_message().contains("3MB"));
        assert!(!err.is_sensitive());
    }

    #[test]
    fn test_error_metadata_asset_not_found_hides_name() {
        let err = AppError::AssetNotFound("/srv/uploads/pdfs/x.pdf".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert!(!err.client_message().contains("/srv"));
    }

    #[test]
    fn test_error_metadata_assignment_window() {
        let err = AppError::AssignmentClosed("Due 01.02.2025 23:59".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "ASSIGNMENT_CLOSED");
        assert_eq!(err.client_message(), "Due 01.02.2025 23:59");

        let err = AppError::AssignmentNotOpenYet("Opens 01.02.2025 09:00".to_string());
        assert_eq!(err.error_code(), "ASSIGNMENT_NOT_OPEN_YET");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_error_metadata_forbidden() {
        let err = AppError::Forbidden("Not enough permissions".to_string());
        assert_eq!(err.http_status_code(), 403);
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("disk unavailable").context("writing upload"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error with source"));
        assert!(details.contains("Caused by"));
    }
}

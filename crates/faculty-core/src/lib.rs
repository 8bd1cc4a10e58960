//! Faculty Core Library
//!
//! Domain models, error types and configuration shared by every crate of the
//! department website backend.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::upload::{AssetClass, StoredFile, UploadResponse};

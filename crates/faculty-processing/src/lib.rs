//! Faculty Processing Library
//!
//! The upload pipeline: filename sanitizing, type and size validation, image
//! normalization and thumbnailing, and cleanup of files whose owning record
//! went away.

pub mod cleanup;
pub mod imaging;
pub mod pipeline;
pub mod sanitizer;
pub mod validator;

// Re-export commonly used types
pub use cleanup::AssetCleanup;
pub use imaging::{ImageError, NormalizedImage, NormalizerSettings, ThumbnailSettings};
pub use pipeline::{IncomingUpload, PipelineError, UploadPipeline};
pub use sanitizer::sanitize_filename;
pub use validator::{normalize_mime_type, AssetValidator, ValidationError};

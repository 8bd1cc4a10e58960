//! Faculty Storage Library
//!
//! Local filesystem storage for uploaded assets.
//!
//! # Layout
//!
//! Everything lives under a single upload root:
//!
//! - `images/` normalized images
//! - `thumbnails/` previews named `thumb_<image filename>`
//! - `pdfs/` documents and homework submissions
//!
//! Files are referenced by public URLs of the form `/uploads/<dir>/<filename>`.
//! Filenames must not contain path separators or `..`.

pub mod error;
pub mod layout;
pub mod local;
pub mod naming;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use layout::{thumbnail_name, validate_filename, StorageDir, UploadDirs, PUBLIC_PREFIX};
pub use local::{write_atomic, LocalStorage};
pub use naming::{Clock, FixedClock, IdSource, RandomIdSource, SequentialIds, SystemClock, UniqueNamer};

//! API constants

/// Every JSON route is mounted under this prefix.
pub const API_PREFIX: &str = "/api";

/// Static mount of the upload root.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Headroom on top of the largest file ceiling for multipart framing and text fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub const ROOT_MESSAGE: &str = "Academic Website API - Backend is running!";

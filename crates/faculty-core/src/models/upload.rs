use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of file an upload endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Image,
    Pdf,
}

impl AssetClass {
    /// MIME types accepted for this class.
    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            AssetClass::Image => &["image/jpeg", "image/jpg", "image/png", "image/webp"],
            AssetClass::Pdf => &["application/pdf"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Image => "image",
            AssetClass::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file persisted under the upload root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    /// Public path, always prefixed with `/uploads/`.
    pub url: String,
    pub size: u64,
    pub thumbnail_url: Option<String>,
}

/// Body returned by every upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized_size: Option<u64>,
}

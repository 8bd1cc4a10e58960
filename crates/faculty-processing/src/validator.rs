use faculty_core::AssetClass;

/// Reasons an upload is refused before anything is written
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Empty file")]
    EmptyFile,
}

/// Strip MIME parameters and lowercase, e.g. `Image/JPEG; q=1` -> `image/jpeg`.
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Checks an upload against its class allow-list and size ceiling.
#[derive(Debug, Clone, Copy)]
pub struct AssetValidator {
    class: AssetClass,
    max_size: Option<usize>,
}

impl AssetValidator {
    /// Images have no ceiling at acceptance; they are shrunk by the normalizer.
    pub fn image() -> Self {
        Self {
            class: AssetClass::Image,
            max_size: None,
        }
    }

    pub fn pdf(max_size: usize) -> Self {
        Self {
            class: AssetClass::Pdf,
            max_size: Some(max_size),
        }
    }

    pub fn class(&self) -> AssetClass {
        self.class
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = normalize_mime_type(content_type);
        let allowed = self.class.allowed_content_types();

        if !allowed.contains(&normalized.as_str()) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            });
        }

        Ok(())
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if let Some(max) = self.max_size {
            if size > max {
                return Err(ValidationError::FileTooLarge { size, max });
            }
        }

        Ok(())
    }

    /// Type first, then size.
    pub fn validate(&self, content_type: &str, size: usize) -> Result<(), ValidationError> {
        self.validate_content_type(content_type)?;
        self.validate_file_size(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: usize = 1024 * 1024;

    fn test_validator() -> AssetValidator {
        AssetValidator::pdf(3 * MB)
    }

    #[test]
    fn test_normalize_mime_type() {
        assert_eq!(normalize_mime_type("Image/JPEG; charset=binary"), "image/jpeg");
        assert_eq!(normalize_mime_type("application/pdf"), "application/pdf");
    }

    #[test]
    fn test_image_types_are_accepted() {
        let validator = AssetValidator::image();
        for content_type in ["image/jpeg", "image/jpg", "image/png", "image/webp", "IMAGE/PNG"] {
            assert!(validator.validate_content_type(content_type).is_ok(), "{}", content_type);
        }
    }

    #[test]
    fn test_text_plain_is_not_an_image() {
        let validator = AssetValidator::image();
        assert!(matches!(
            validator.validate_content_type("text/plain"),
            Err(ValidationError::InvalidContentType { .. })
        ));
        assert!(validator.validate_content_type("image/gif").is_err());
    }

    #[test]
    fn test_image_has_no_size_ceiling() {
        let validator = AssetValidator::image();
        assert!(validator.validate_file_size(200 * MB).is_ok());
    }

    #[test]
    fn test_pdf_only_accepts_pdf() {
        let validator = test_validator();
        assert!(validator.validate_content_type("application/pdf").is_ok());
        assert!(validator.validate_content_type("image/png").is_err());
    }

    #[test]
    fn test_validate_file_size_limit_is_inclusive() {
        let validator = test_validator();
        assert!(validator.validate_file_size(3 * MB).is_ok());
        assert!(matches!(
            validator.validate_file_size(3 * MB + 1),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_file_size_empty() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_checks_type_before_size() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate("text/plain", 10 * MB),
            Err(ValidationError::InvalidContentType { .. })
        ));
    }
}

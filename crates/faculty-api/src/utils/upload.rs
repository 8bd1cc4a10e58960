//! Common utilities for file upload handlers

use std::collections::HashMap;

use axum::extract::Multipart;
use faculty_core::AppError;
use faculty_processing::IncomingUpload;
use uuid::Uuid;

/// Multipart form holding one `file` field and any number of text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<IncomingUpload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn take_file(&mut self) -> Result<IncomingUpload, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
    }

    /// A required text field, trimmed. Blank counts as missing.
    pub fn required(&self, name: &str) -> Result<String, AppError> {
        self.optional(name)
            .ok_or_else(|| AppError::InvalidInput(format!("Field '{}' is required", name)))
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn required_uuid(&self, name: &str) -> Result<Uuid, AppError> {
        parse_uuid(name, &self.required(name)?)
    }

    pub fn optional_uuid(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        self.optional(name)
            .map(|v| parse_uuid(name, &v))
            .transpose()
    }
}

fn parse_uuid(name: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::InvalidInput(format!("Field '{}' must be a valid UUID", name)))
}

/// Read a whole multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if form.file.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            let filename = field
                .file_name()
                .map(|s: &str| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let content_type = field
                .content_type()
                .map(|s: &str| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            form.file = Some(IncomingUpload {
                filename,
                content_type,
                data,
            });
        } else if !field_name.is_empty() {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", field_name, e)))?;
            form.fields.insert(field_name, value);
        }
    }

    Ok(form)
}

/// Extract the single `file` field of a multipart form.
pub async fn extract_multipart_file(multipart: Multipart) -> Result<IncomingUpload, AppError> {
    extract_upload_form(multipart).await?.take_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> UploadForm {
        UploadForm {
            file: None,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let form = form(&[("notes", "   "), ("student_name", " Ali Veli ")]);
        assert_eq!(form.optional("notes"), None);
        assert_eq!(form.required("student_name").unwrap(), "Ali Veli");
        assert!(form.required("student_number").is_err());
    }

    #[test]
    fn test_uuid_fields() {
        let id = Uuid::new_v4();
        let form = form(&[("course_id", &id.to_string()), ("assignment_id", "nope")]);
        assert_eq!(form.required_uuid("course_id").unwrap(), id);
        assert!(form.optional_uuid("assignment_id").is_err());
        assert_eq!(form.optional_uuid("missing").unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_invalid_input() {
        let mut form = UploadForm::default();
        assert!(matches!(form.take_file(), Err(AppError::InvalidInput(_))));
    }
}

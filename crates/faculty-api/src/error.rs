//! HTTP error response conversion
//!
//! This module renders [`AppError`] as an HTTP response.
//!
//! **Handler pattern:** return `Result<impl IntoResponse, HttpAppError>` and let
//! `?` convert any `AppError` (or type with `Into<AppError>`) on the way out.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use faculty_core::{AppError, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper that lets `AppError` (defined in faculty-core) implement `IntoResponse`.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        let body_text = rejection.body_text();
        let message = if body_text.contains("expected a formatted UUID") {
            "Invalid request body: identifiers must be UUID strings".to_string()
        } else {
            format!("Invalid request body: {}", body_text)
        };
        HttpAppError(AppError::InvalidInput(message))
    }
}

impl From<ValidationErrors> for HttpAppError {
    fn from(errors: ValidationErrors) -> Self {
        HttpAppError(AppError::InvalidInput(first_validation_message(&errors)))
    }
}

/// The first human readable message out of a `validator` result.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid value for '{}'", field),
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}

/// JSON body extractor that rejects with our `ErrorResponse` shape and runs
/// the body's `validator` rules before the handler sees it.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        inner.validate()?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl HttpAppError {
    fn to_body(&self, is_production: bool) -> ErrorResponse {
        let app_error = &self.0;
        let hide_details = is_production || app_error.is_sensitive();
        ErrorResponse {
            error: app_error.client_message(),
            details: (!hide_details).then(|| app_error.detailed_message()),
            error_type: (!hide_details).then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        let body = self.to_body(is_production_env());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_core::models::CreateCourseRequest;

    #[test]
    fn test_sensitive_error_hides_details() {
        let err = HttpAppError(AppError::Internal(
            "open /srv/uploads/pdfs/x.pdf failed".to_string(),
        ));
        let body = err.to_body(false);
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_production_hides_details_of_client_errors() {
        let err = HttpAppError(AppError::AssignmentClosed(
            "Submission deadline has passed".to_string(),
        ));

        let dev = err.to_body(false);
        assert_eq!(dev.error_type.as_deref(), Some("AssignmentClosed"));
        assert!(dev.details.is_some());

        let prod = err.to_body(true);
        assert_eq!(prod.error, "Submission deadline has passed");
        assert!(prod.details.is_none());
        assert_eq!(prod.code, "ASSIGNMENT_CLOSED");
    }

    #[test]
    fn test_validation_message_is_surfaced() {
        let req: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "code": "",
            "name": "Robotics"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();

        let HttpAppError(app_err) = errors.into();
        match app_err {
            AppError::InvalidInput(msg) => {
                assert_eq!(msg, "Course code must be between 1 and 20 characters")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_shape() {
        let body = HttpAppError(AppError::NotFound("Course not found".to_string())).to_body(false);
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["error"], "Course not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("suggested_action").is_some());
    }
}

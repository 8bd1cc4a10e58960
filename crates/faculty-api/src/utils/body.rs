use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use faculty_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::HttpAppError;

/// Body accepted either as `application/x-www-form-urlencoded` or as JSON.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let inner = if is_form {
            let Form(inner) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(format!("Invalid form body: {}", e.body_text())))?;
            inner
        } else {
            let Json(inner) = Json::<T>::from_request(req, state).await?;
            inner
        };

        inner.validate()?;
        Ok(JsonOrForm(inner))
    }
}

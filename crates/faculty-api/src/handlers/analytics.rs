use axum::{extract::State, response::IntoResponse, Json};
use faculty_core::models::AnalyticsSnapshot;
use std::sync::Arc;

use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "analytics",
    responses(
        (status = 200, description = "Site counters and content totals", body = AnalyticsSnapshot),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let snapshot = state.db.analytics_repository.snapshot().await?;
    Ok(Json(snapshot))
}

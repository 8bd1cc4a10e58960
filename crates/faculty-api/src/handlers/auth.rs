//! Administrator login and account handlers

use axum::{extract::State, response::IntoResponse, Json};
use faculty_core::models::{
    ChangePasswordRequest, LoginRequest, MessageResponse, TokenResponse, UserResponse,
};
use faculty_core::AppError;
use std::sync::Arc;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{AdminContext, TokenKind};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::body::JsonOrForm;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Inactive user", body = ErrorResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let rejected = || AppError::Unauthorized("Incorrect username or password".to_string());

    let user = state
        .db
        .user_repository
        .get_by_username(&request.username)
        .await?
        .ok_or_else(rejected)?;

    if !verify_password_blocking(request.password, user.password_hash.clone()).await? {
        tracing::info!(username = %user.username, "Login rejected");
        return Err(rejected().into());
    }

    if !user.is_active {
        return Err(AppError::BadRequest("Inactive user".to_string()).into());
    }

    let token = state.jwt.issue(&user.id.to_string(), TokenKind::Admin)?;
    tracing::info!(user_id = %user.id, "Administrator logged in");

    Ok(Json(TokenResponse::bearer(token)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current administrator", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, admin), fields(user_id = %admin.user_id))]
pub async fn me(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state
        .db
        .user_repository
        .get_by_id(admin.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = "auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Incorrect password", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, admin, request), fields(user_id = %admin.user_id))]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    JsonOrForm(request): JsonOrForm<ChangePasswordRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state
        .db
        .user_repository
        .get_by_id(admin.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password_blocking(request.old_password, user.password_hash).await? {
        return Err(AppError::BadRequest("Incorrect password".to_string()).into());
    }

    let new_hash = hash_password_blocking(request.new_password).await?;
    state
        .db
        .user_repository
        .update_password(user.id, &new_hash)
        .await?;

    tracing::info!(user_id = %user.id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

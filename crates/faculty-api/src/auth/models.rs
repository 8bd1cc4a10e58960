use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use faculty_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use uuid::Uuid;

/// Who a token was issued to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Admin,
    Student,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenKind::Admin => write!(f, "admin"),
            TokenKind::Student => write!(f, "student"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id for admins, student number for students
    pub sub: String,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

/// Verified token claims, stored in request extensions by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub claims: JwtClaims,
}

/// An active administrator, resolved from the bearer token.
///
/// Extracting it fails with 401 when no valid token came with the request
/// and 403 when the token does not belong to an administrator.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user_id: Uuid,
    pub username: String,
}

// Extracted from parts so it can sit in front of Multipart
impl FromRequestParts<Arc<AppState>> for AdminContext {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".to_string()))?;

        if auth.claims.kind != TokenKind::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()).into());
        }

        let user_id = Uuid::parse_str(&auth.claims.sub)
            .map_err(|_| AppError::Unauthorized("Could not validate credentials".to_string()))?;

        let user = state
            .db
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".to_string()))?;

        if !user.is_active {
            return Err(AppError::BadRequest("Inactive user".to_string()).into());
        }
        if !user.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()).into());
        }

        Ok(AdminContext {
            user_id: user.id,
            username: user.username,
        })
    }
}

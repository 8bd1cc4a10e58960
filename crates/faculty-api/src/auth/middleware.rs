use crate::auth::models::AuthContext;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// The bearer token of `Authorization`, if the header is present and well formed.
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verify the bearer token, when one is sent, and attach its claims.
///
/// Public routes ignore the result; guarded routes pick it up through
/// [`crate::auth::AdminContext`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = bearer_token(&request).and_then(|token| match state.jwt.verify(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, path = %request.uri().path(), "Ignoring invalid token");
            None
        }
    });

    if let Some(claims) = claims {
        tracing::debug!(sub = %claims.sub, kind = %claims.kind, "Authenticated request");
        request.extensions_mut().insert(AuthContext { claims });
    }

    next.run(request).await
}

//! Route configuration and setup.
//!
//! Domain route groups live in [domains](domains); health checks in [health](health).

mod domains;
mod health;

use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES, ROOT_MESSAGE, UPLOADS_ROUTE};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use faculty_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app_state_routes = public_routes(state.clone())
        .merge(protected_routes(state.clone()))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    let body_limit = config.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;
    tracing::info!(body_limit_bytes = body_limit, "Request body limit configured");

    let app = app_state_routes
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.upload_dir))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/", API_PREFIX),
            get(|| async { Json(serde_json::json!({ "message": ROOT_MESSAGE })) }),
        )
        .route(&format!("{}/health", API_PREFIX), get(health::health_check))
        .route(
            &format!("{}/openapi.json", API_PREFIX),
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(domains::file_routes(state.clone()))
        .with_state(state)
}

/// Content and account routes. Write operations check the caller with
/// [`AdminContext`](crate::auth::AdminContext) inside the handler.
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(domains::auth_routes(state.clone()))
        .merge(domains::announcement_routes(state.clone()))
        .merge(domains::course_routes(state.clone()))
        .merge(domains::publication_routes(state.clone()))
        .merge(domains::gallery_routes(state.clone()))
        .merge(domains::cv_routes(state.clone()))
        .merge(domains::student_routes(state.clone()))
        .merge(domains::assignment_routes(state.clone()))
        .merge(domains::homework_routes(state.clone()))
        .merge(domains::analytics_routes(state.clone()))
        .with_state(state)
}

//! Application setup and initialization

pub mod bootstrap;
pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::homework::PgSubmissionStore;
use crate::state::AppState;
use anyhow::{Context, Result};
use faculty_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let submissions = Arc::new(PgSubmissionStore::new(pool.clone()));
    let state = Arc::new(AppState::new(config.clone(), pool, storage, submissions));

    bootstrap::ensure_default_admin(&config, &state.db.user_repository).await?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

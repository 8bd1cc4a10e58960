//! First-run data

use anyhow::{Context, Result};
use faculty_core::Config;
use faculty_db::UserRepository;

use crate::auth::password::hash_password_blocking;

/// Create the configured admin account unless a user with that name already exists.
pub async fn ensure_default_admin(config: &Config, users: &UserRepository) -> Result<()> {
    if users
        .get_by_username(&config.default_admin_username)
        .await
        .context("Failed to look up default admin")?
        .is_some()
    {
        tracing::debug!(username = %config.default_admin_username, "Default admin present");
        return Ok(());
    }

    let password_hash = hash_password_blocking(config.default_admin_password.clone())
        .await
        .context("Failed to hash default admin password")?;

    let email = Some(config.default_admin_email.as_str()).filter(|e| !e.is_empty());
    let admin = users
        .create_admin(
            &config.default_admin_username,
            email,
            &password_hash,
            Some("Administrator"),
        )
        .await
        .context("Failed to create default admin")?;

    tracing::info!(user_id = %admin.id, username = %admin.username, "Default admin created");
    Ok(())
}

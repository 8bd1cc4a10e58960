//! Configuration module
//!
//! Environment-driven settings for the HTTP server, database, authentication
//! and the upload pipeline.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 8001;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_IMAGE_SIZE_MB: usize = 1;
const MAX_PDF_SIZE_MB: usize = 10;
const MAX_HOMEWORK_SIZE_MB: usize = 3;
const IMAGE_MAX_DIMENSION: u32 = 1920;
const THUMBNAIL_SIZE: u32 = 300;
const STUDENT_EMAIL_DOMAIN: &str = "ogrenci.karabuk.edu.tr";

const MB: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub upload_dir: PathBuf,
    /// Byte budget the image normalizer aims for.
    pub max_image_size_bytes: usize,
    pub max_pdf_size_bytes: usize,
    pub max_homework_size_bytes: usize,
    pub image_max_dimension: u32,
    pub thumbnail_size: u32,
    pub default_admin_username: String,
    pub default_admin_password: String,
    pub default_admin_email: String,
    pub student_email_domain: String,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            ),
            max_image_size_bytes: env::var("MAX_IMAGE_SIZE_MB")
                .unwrap_or_else(|_| MAX_IMAGE_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_IMAGE_SIZE_MB)
                * MB,
            max_pdf_size_bytes: env::var("MAX_PDF_SIZE_MB")
                .unwrap_or_else(|_| MAX_PDF_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_PDF_SIZE_MB)
                * MB,
            max_homework_size_bytes: env::var("MAX_HOMEWORK_SIZE_MB")
                .unwrap_or_else(|_| MAX_HOMEWORK_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_HOMEWORK_SIZE_MB)
                * MB,
            image_max_dimension: env::var("IMAGE_MAX_DIMENSION")
                .unwrap_or_else(|_| IMAGE_MAX_DIMENSION.to_string())
                .parse()
                .unwrap_or(IMAGE_MAX_DIMENSION),
            thumbnail_size: env::var("THUMBNAIL_SIZE")
                .unwrap_or_else(|_| THUMBNAIL_SIZE.to_string())
                .parse()
                .unwrap_or(THUMBNAIL_SIZE),
            default_admin_username: env::var("DEFAULT_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            default_admin_password: env::var("DEFAULT_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
            default_admin_email: env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@karabuk.edu.tr".to_string()),
            student_email_domain: env::var("STUDENT_EMAIL_DOMAIN")
                .unwrap_or_else(|_| STUDENT_EMAIL_DOMAIN.to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.is_production() && self.default_admin_password == "admin123" {
            return Err(anyhow::anyhow!(
                "DEFAULT_ADMIN_PASSWORD must be changed in production"
            ));
        }

        if self.thumbnail_size == 0 || self.image_max_dimension == 0 {
            return Err(anyhow::anyhow!(
                "IMAGE_MAX_DIMENSION and THUMBNAIL_SIZE must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Largest payload any upload endpoint accepts, used to size the request body limit.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_pdf_size_bytes
            .max(self.max_homework_size_bytes)
            .max(self.max_image_size_bytes * 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            database_url: "postgres://localhost/faculty".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_expiry_hours: JWT_EXPIRY_HOURS,
            upload_dir: PathBuf::from("uploads"),
            max_image_size_bytes: MAX_IMAGE_SIZE_MB * MB,
            max_pdf_size_bytes: MAX_PDF_SIZE_MB * MB,
            max_homework_size_bytes: MAX_HOMEWORK_SIZE_MB * MB,
            image_max_dimension: IMAGE_MAX_DIMENSION,
            thumbnail_size: THUMBNAIL_SIZE,
            default_admin_username: "admin".to_string(),
            default_admin_password: "admin123".to_string(),
            default_admin_email: "admin@karabuk.edu.tr".to_string(),
            student_email_domain: STUDENT_EMAIL_DOMAIN.to_string(),
            log_format: "compact".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = test_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_postgres_url() {
        let mut config = test_config();
        config.database_url = "mysql://localhost/faculty".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_default_admin_password_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.default_admin_password = "a-much-better-password".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_upload_bytes_covers_every_class() {
        let config = test_config();
        assert!(config.max_upload_bytes() >= config.max_pdf_size_bytes);
        assert!(config.max_upload_bytes() >= config.max_homework_size_bytes);
    }
}

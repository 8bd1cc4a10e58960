use faculty_core::AppError;
use sqlx::PgPool;

/// Round trip to the database.
#[tracing::instrument(skip(pool), fields(db.operation = "ping"))]
pub async fn ping(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

use faculty_core::{models::AnalyticsSnapshot, AppError};
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Live row counts plus the stored traffic counters.
    #[tracing::instrument(skip(self), fields(db.table = "analytics", db.operation = "select"))]
    pub async fn snapshot(&self) -> Result<AnalyticsSnapshot, AppError> {
        let snapshot = sqlx::query_as::<Postgres, AnalyticsSnapshot>(
            r#"
            SELECT
                COALESCE((SELECT page_views FROM analytics ORDER BY last_updated ASC LIMIT 1), 0)::BIGINT AS page_views,
                COALESCE((SELECT unique_visitors FROM analytics ORDER BY last_updated ASC LIMIT 1), 0)::BIGINT AS unique_visitors,
                (SELECT COUNT(*) FROM announcements) AS total_announcements,
                (SELECT COUNT(*) FROM courses) AS total_courses,
                (SELECT COUNT(*) FROM publications) AS total_publications,
                (SELECT COUNT(*) FROM gallery_items) AS total_gallery_items,
                (SELECT COUNT(*) FROM students) AS total_students,
                (SELECT COUNT(*) FROM students WHERE is_active = TRUE) AS active_students,
                (SELECT COUNT(*) FROM homeworks) AS total_homeworks,
                NOW() AS last_updated
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(snapshot)
    }
}

use faculty_core::{
    models::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const ANNOUNCEMENT_COLUMNS: &str = "id, title, content, announcement_type, image_url, date, \
     is_published, views, created_at, updated_at";

#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published announcements, newest first
    #[tracing::instrument(skip(self), fields(db.table = "announcements", db.operation = "select"))]
    pub async fn list_published(
        &self,
        announcement_type: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<Postgres, Announcement>(&format!(
            r#"
            SELECT {}
            FROM announcements
            WHERE is_published = TRUE
              AND ($1::TEXT IS NULL OR announcement_type = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(announcement_type)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    #[tracing::instrument(skip(self), fields(db.table = "announcements", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Announcement>, AppError> {
        let announcement = sqlx::query_as::<Postgres, Announcement>(&format!(
            "SELECT {} FROM announcements WHERE id = $1",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Fetch one announcement and count the view in the same statement.
    #[tracing::instrument(skip(self), fields(db.table = "announcements", db.operation = "update", db.record_id = %id))]
    pub async fn view(&self, id: Uuid) -> Result<Option<Announcement>, AppError> {
        let announcement = sqlx::query_as::<Postgres, Announcement>(&format!(
            "UPDATE announcements SET views = views + 1 WHERE id = $1 RETURNING {}",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "announcements", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateAnnouncementRequest) -> Result<Announcement, AppError> {
        let announcement = sqlx::query_as::<Postgres, Announcement>(&format!(
            r#"
            INSERT INTO announcements (title, content, announcement_type, image_url, date, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.announcement_type)
        .bind(&req.image_url)
        .bind(&req.date)
        .bind(req.is_published)
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Apply the fields present in `req`. `None` when the row does not exist.
    #[tracing::instrument(skip(self, req), fields(db.table = "announcements", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>, AppError> {
        let announcement = sqlx::query_as::<Postgres, Announcement>(&format!(
            r#"
            UPDATE announcements SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                announcement_type = COALESCE($4, announcement_type),
                image_url = COALESCE($5, image_url),
                date = COALESCE($6, date),
                is_published = COALESCE($7, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.announcement_type)
        .bind(&req.image_url)
        .bind(&req.date)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Delete and return the removed row so its files can be released.
    #[tracing::instrument(skip(self), fields(db.table = "announcements", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Announcement>, AppError> {
        let announcement = sqlx::query_as::<Postgres, Announcement>(&format!(
            "DELETE FROM announcements WHERE id = $1 RETURNING {}",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }
}

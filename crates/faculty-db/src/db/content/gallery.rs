use faculty_core::{
    models::{CreateGalleryItemRequest, GalleryItem},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const GALLERY_COLUMNS: &str = "id, title, description, item_type, url, thumbnail_url, date, \
     is_published, order_index, created_at, updated_at";

#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "gallery_items", db.operation = "select"))]
    pub async fn list_published(
        &self,
        item_type: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<GalleryItem>, AppError> {
        let items = sqlx::query_as::<Postgres, GalleryItem>(&format!(
            r#"
            SELECT {}
            FROM gallery_items
            WHERE is_published = TRUE
              AND ($1::TEXT IS NULL OR item_type = $1)
            ORDER BY order_index ASC, created_at DESC
            OFFSET $2 LIMIT $3
            "#,
            GALLERY_COLUMNS
        ))
        .bind(item_type)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "gallery_items", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateGalleryItemRequest) -> Result<GalleryItem, AppError> {
        let item = sqlx::query_as::<Postgres, GalleryItem>(&format!(
            r#"
            INSERT INTO gallery_items (title, description, item_type, url, thumbnail_url, date,
                                       is_published, order_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            GALLERY_COLUMNS
        ))
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.item_type)
        .bind(&req.url)
        .bind(&req.thumbnail_url)
        .bind(&req.date)
        .bind(req.is_published)
        .bind(req.order_index)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    #[tracing::instrument(skip(self), fields(db.table = "gallery_items", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<GalleryItem>, AppError> {
        let item = sqlx::query_as::<Postgres, GalleryItem>(&format!(
            "DELETE FROM gallery_items WHERE id = $1 RETURNING {}",
            GALLERY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }
}

use faculty_core::{
    models::{CreatePublicationRequest, Publication, UpdatePublicationRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const PUBLICATION_COLUMNS: &str = "id, title, authors, year, publication_type, journal, \
     conference, location, doi, pdf_url, external_url, abstract_text, is_published, \
     created_at, updated_at";

#[derive(Clone)]
pub struct PublicationRepository {
    pool: PgPool,
}

impl PublicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published entries, most recent year first
    #[tracing::instrument(skip(self), fields(db.table = "publications", db.operation = "select"))]
    pub async fn list_published(
        &self,
        publication_type: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Publication>, AppError> {
        let publications = sqlx::query_as::<Postgres, Publication>(&format!(
            r#"
            SELECT {}
            FROM publications
            WHERE is_published = TRUE
              AND ($1::TEXT IS NULL OR publication_type = $1)
            ORDER BY year DESC, created_at DESC
            OFFSET $2 LIMIT $3
            "#,
            PUBLICATION_COLUMNS
        ))
        .bind(publication_type)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(publications)
    }

    #[tracing::instrument(skip(self), fields(db.table = "publications", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Publication>, AppError> {
        let publication = sqlx::query_as::<Postgres, Publication>(&format!(
            "SELECT {} FROM publications WHERE id = $1",
            PUBLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publication)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "publications", db.operation = "insert"))]
    pub async fn create(&self, req: &CreatePublicationRequest) -> Result<Publication, AppError> {
        let publication = sqlx::query_as::<Postgres, Publication>(&format!(
            r#"
            INSERT INTO publications (title, authors, year, publication_type, journal, conference,
                                      location, doi, pdf_url, external_url, abstract_text, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            PUBLICATION_COLUMNS
        ))
        .bind(&req.title)
        .bind(&req.authors)
        .bind(req.year)
        .bind(&req.publication_type)
        .bind(&req.journal)
        .bind(&req.conference)
        .bind(&req.location)
        .bind(&req.doi)
        .bind(&req.pdf_url)
        .bind(&req.external_url)
        .bind(&req.abstract_text)
        .bind(req.is_published)
        .fetch_one(&self.pool)
        .await?;

        Ok(publication)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "publications", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdatePublicationRequest,
    ) -> Result<Option<Publication>, AppError> {
        let publication = sqlx::query_as::<Postgres, Publication>(&format!(
            r#"
            UPDATE publications SET
                title = COALESCE($2, title),
                authors = COALESCE($3, authors),
                year = COALESCE($4, year),
                publication_type = COALESCE($5, publication_type),
                journal = COALESCE($6, journal),
                conference = COALESCE($7, conference),
                location = COALESCE($8, location),
                doi = COALESCE($9, doi),
                pdf_url = COALESCE($10, pdf_url),
                external_url = COALESCE($11, external_url),
                abstract_text = COALESCE($12, abstract_text),
                is_published = COALESCE($13, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PUBLICATION_COLUMNS
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.authors)
        .bind(req.year)
        .bind(&req.publication_type)
        .bind(&req.journal)
        .bind(&req.conference)
        .bind(&req.location)
        .bind(&req.doi)
        .bind(&req.pdf_url)
        .bind(&req.external_url)
        .bind(&req.abstract_text)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publication)
    }

    #[tracing::instrument(skip(self), fields(db.table = "publications", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Publication>, AppError> {
        let publication = sqlx::query_as::<Postgres, Publication>(&format!(
            "DELETE FROM publications WHERE id = $1 RETURNING {}",
            PUBLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publication)
    }
}

use faculty_core::{
    models::{CreateCvRequest, Cv, UpdateCvRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const CV_COLUMNS: &str = "id, full_name, title, photo_url, email, phone, office, bio, \
     education, experience, research_interests, pdf_url, updated_at";

/// The site has at most one CV row.
#[derive(Clone)]
pub struct CvRepository {
    pool: PgPool,
}

impl CvRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "cvs", db.operation = "select"))]
    pub async fn get(&self) -> Result<Option<Cv>, AppError> {
        let cv = sqlx::query_as::<Postgres, Cv>(&format!(
            "SELECT {} FROM cvs ORDER BY updated_at ASC LIMIT 1",
            CV_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(cv)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "cvs", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateCvRequest) -> Result<Cv, AppError> {
        let cv = sqlx::query_as::<Postgres, Cv>(&format!(
            r#"
            INSERT INTO cvs (full_name, title, photo_url, email, phone, office, bio,
                             education, experience, research_interests, pdf_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            CV_COLUMNS
        ))
        .bind(&req.full_name)
        .bind(&req.title)
        .bind(&req.photo_url)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.office)
        .bind(&req.bio)
        .bind(&req.education)
        .bind(&req.experience)
        .bind(&req.research_interests)
        .bind(&req.pdf_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(cv)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "cvs", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, req: &UpdateCvRequest) -> Result<Option<Cv>, AppError> {
        let cv = sqlx::query_as::<Postgres, Cv>(&format!(
            r#"
            UPDATE cvs SET
                full_name = COALESCE($2, full_name),
                title = COALESCE($3, title),
                photo_url = COALESCE($4, photo_url),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                office = COALESCE($7, office),
                bio = COALESCE($8, bio),
                education = COALESCE($9, education),
                experience = COALESCE($10, experience),
                research_interests = COALESCE($11, research_interests),
                pdf_url = COALESCE($12, pdf_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CV_COLUMNS
        ))
        .bind(id)
        .bind(&req.full_name)
        .bind(&req.title)
        .bind(&req.photo_url)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.office)
        .bind(&req.bio)
        .bind(&req.education)
        .bind(&req.experience)
        .bind(&req.research_interests)
        .bind(&req.pdf_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cv)
    }
}

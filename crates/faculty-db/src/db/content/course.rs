use faculty_core::{
    models::{Course, CreateCourseRequest, UpdateCourseRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const COURSE_COLUMNS: &str = "id, code, name, level, semester, credits, description, \
     syllabus_url, materials_url, content, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active courses ordered by code
    #[tracing::instrument(skip(self), fields(db.table = "courses", db.operation = "select"))]
    pub async fn list_active(
        &self,
        level: Option<&str>,
        semester: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<Postgres, Course>(&format!(
            r#"
            SELECT {}
            FROM courses
            WHERE is_active = TRUE
              AND ($1::TEXT IS NULL OR level = $1)
              AND ($2::TEXT IS NULL OR semester = $2)
            ORDER BY code ASC
            OFFSET $3 LIMIT $4
            "#,
            COURSE_COLUMNS
        ))
        .bind(level)
        .bind(semester)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    #[tracing::instrument(skip(self), fields(db.table = "courses", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<Postgres, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    /// Whether `code` is taken by a course other than `except`.
    #[tracing::instrument(skip(self), fields(db.table = "courses", db.operation = "select"))]
    pub async fn code_exists(&self, code: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE code = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(code)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// The ids from `ids` that have no course, in input order.
    #[tracing::instrument(skip(self, ids), fields(db.table = "courses", db.operation = "select", count = ids.len()))]
    pub async fn missing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
        let found = sqlx::query_scalar::<Postgres, Uuid>("SELECT id FROM courses WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.iter().filter(|id| !found.contains(id)).copied().collect())
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "courses", db.operation = "insert", code = %req.code))]
    pub async fn create(&self, req: &CreateCourseRequest) -> Result<Course, AppError> {
        let course = sqlx::query_as::<Postgres, Course>(&format!(
            r#"
            INSERT INTO courses (code, name, level, semester, credits, description,
                                 syllabus_url, materials_url, content, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(&req.code)
        .bind(&req.name)
        .bind(&req.level)
        .bind(&req.semester)
        .bind(req.credits)
        .bind(&req.description)
        .bind(&req.syllabus_url)
        .bind(&req.materials_url)
        .bind(&req.content)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "courses", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateCourseRequest,
    ) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<Postgres, Course>(&format!(
            r#"
            UPDATE courses SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                level = COALESCE($4, level),
                semester = COALESCE($5, semester),
                credits = COALESCE($6, credits),
                description = COALESCE($7, description),
                syllabus_url = COALESCE($8, syllabus_url),
                materials_url = COALESCE($9, materials_url),
                content = COALESCE($10, content),
                is_active = COALESCE($11, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(id)
        .bind(&req.code)
        .bind(&req.name)
        .bind(&req.level)
        .bind(&req.semester)
        .bind(req.credits)
        .bind(&req.description)
        .bind(&req.syllabus_url)
        .bind(&req.materials_url)
        .bind(&req.content)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    #[tracing::instrument(skip(self), fields(db.table = "courses", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use faculty_core::{
    models::{CreateAssignmentRequest, HomeworkAssignment, UpdateAssignmentRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const ASSIGNMENT_COLUMNS: &str =
    "id, course_id, title, description, start_date, due_date, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Latest due date first
    #[tracing::instrument(skip(self), fields(db.table = "homework_assignments", db.operation = "select"))]
    pub async fn list(
        &self,
        course_id: Option<Uuid>,
        is_active: Option<bool>,
    ) -> Result<Vec<HomeworkAssignment>, AppError> {
        let assignments = sqlx::query_as::<Postgres, HomeworkAssignment>(&format!(
            r#"
            SELECT {}
            FROM homework_assignments
            WHERE ($1::UUID IS NULL OR course_id = $1)
              AND ($2::BOOLEAN IS NULL OR is_active = $2)
            ORDER BY due_date DESC
            "#,
            ASSIGNMENT_COLUMNS
        ))
        .bind(course_id)
        .bind(is_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homework_assignments", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<HomeworkAssignment>, AppError> {
        let assignment = sqlx::query_as::<Postgres, HomeworkAssignment>(&format!(
            "SELECT {} FROM homework_assignments WHERE id = $1",
            ASSIGNMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "homework_assignments", db.operation = "insert"))]
    pub async fn create(&self, req: &CreateAssignmentRequest) -> Result<HomeworkAssignment, AppError> {
        let assignment = sqlx::query_as::<Postgres, HomeworkAssignment>(&format!(
            r#"
            INSERT INTO homework_assignments (course_id, title, description, start_date, due_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ASSIGNMENT_COLUMNS
        ))
        .bind(req.course_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.start_date)
        .bind(req.due_date)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    #[tracing::instrument(skip(self, req), fields(db.table = "homework_assignments", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateAssignmentRequest,
    ) -> Result<Option<HomeworkAssignment>, AppError> {
        let assignment = sqlx::query_as::<Postgres, HomeworkAssignment>(&format!(
            r#"
            UPDATE homework_assignments SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                due_date = COALESCE($5, due_date),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ASSIGNMENT_COLUMNS
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.start_date)
        .bind(req.due_date)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homework_assignments", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM homework_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

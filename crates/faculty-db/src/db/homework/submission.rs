use faculty_core::{
    models::{Homework, NewHomework},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const HOMEWORK_COLUMNS: &str = "id, assignment_id, student_id, course_id, student_number, \
     student_name, course_code, course_name, file_url, upload_date, notes";

/// Repository for submitted homework files
#[derive(Clone)]
pub struct HomeworkRepository {
    pool: PgPool,
}

impl HomeworkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The live submission of `student_number` for `assignment_id`, if any.
    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "select"))]
    pub async fn find_for_assignment(
        &self,
        student_number: &str,
        assignment_id: Uuid,
    ) -> Result<Option<Homework>, AppError> {
        let homework = sqlx::query_as::<Postgres, Homework>(&format!(
            "SELECT {} FROM homeworks WHERE student_number = $1 AND assignment_id = $2",
            HOMEWORK_COLUMNS
        ))
        .bind(student_number)
        .bind(assignment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(homework)
    }

    /// Insert `new`, removing the row `replaces` in the same transaction.
    #[tracing::instrument(skip(self, new), fields(db.table = "homeworks", db.operation = "replace", student_number = %new.student_number))]
    pub async fn replace(
        &self,
        replaces: Option<Uuid>,
        new: &NewHomework,
    ) -> Result<Homework, AppError> {
        let mut tx = self.pool.begin().await?;

        if let Some(previous) = replaces {
            sqlx::query("DELETE FROM homeworks WHERE id = $1")
                .bind(previous)
                .execute(&mut *tx)
                .await?;
        }

        let inserted = sqlx::query_as::<Postgres, Homework>(&format!(
            r#"
            INSERT INTO homeworks (assignment_id, student_id, course_id, student_number, student_name,
                                   course_code, course_name, file_url, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            HOMEWORK_COLUMNS
        ))
        .bind(new.assignment_id)
        .bind(new.student_id)
        .bind(new.course_id)
        .bind(&new.student_number)
        .bind(&new.student_name)
        .bind(&new.course_code)
        .bind(&new.course_name)
        .bind(&new.file_url)
        .bind(&new.notes)
        .fetch_one(&mut *tx)
        .await;

        let homework = match inserted {
            Ok(homework) => homework,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(AppError::BadRequest(
                    "Another submission for this assignment is in progress".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(homework)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "select"))]
    pub async fn list_for_student(&self, student_number: &str) -> Result<Vec<Homework>, AppError> {
        let homeworks = sqlx::query_as::<Postgres, Homework>(&format!(
            "SELECT {} FROM homeworks WHERE student_number = $1 ORDER BY upload_date DESC",
            HOMEWORK_COLUMNS
        ))
        .bind(student_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(homeworks)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<Homework>, AppError> {
        let homeworks = sqlx::query_as::<Postgres, Homework>(&format!(
            "SELECT {} FROM homeworks ORDER BY upload_date DESC",
            HOMEWORK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(homeworks)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Homework>, AppError> {
        let homework = sqlx::query_as::<Postgres, Homework>(&format!(
            "DELETE FROM homeworks WHERE id = $1 RETURNING {}",
            HOMEWORK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(homework)
    }

    /// Files of submissions that a cascading student delete will remove.
    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "select"))]
    pub async fn file_urls_for_student(&self, student_id: Uuid) -> Result<Vec<String>, AppError> {
        let urls = sqlx::query_scalar::<Postgres, String>(
            "SELECT file_url FROM homeworks WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(urls)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "select"))]
    pub async fn file_urls_for_semester(
        &self,
        semester: &str,
        academic_year: &str,
    ) -> Result<Vec<String>, AppError> {
        let urls = sqlx::query_scalar::<Postgres, String>(
            r#"
            SELECT h.file_url
            FROM homeworks h
            JOIN students s ON s.id = h.student_id
            WHERE s.semester = $1 AND s.academic_year = $2
            "#,
        )
        .bind(semester)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await?;

        Ok(urls)
    }

    #[tracing::instrument(skip(self), fields(db.table = "homeworks", db.operation = "select"))]
    pub async fn file_urls_for_course(&self, course_id: Uuid) -> Result<Vec<String>, AppError> {
        let urls = sqlx::query_scalar::<Postgres, String>(
            "SELECT file_url FROM homeworks WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(urls)
    }
}

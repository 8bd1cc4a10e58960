use chrono::{DateTime, Utc};
use faculty_core::{
    models::{NewStudent, Student},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const STUDENT_COLUMNS: &str = "id, student_number, full_name, email, password_hash, department, \
     year, semester, academic_year, is_active, enrolled_courses, created_at, last_login";

/// Repository for student accounts
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, student), fields(db.table = "students", db.operation = "insert", student_number = %student.student_number))]
    pub async fn create(&self, student: &NewStudent) -> Result<Student, AppError> {
        let created = sqlx::query_as::<Postgres, Student>(&format!(
            r#"
            INSERT INTO students (student_number, full_name, email, password_hash, department,
                                  year, semester, academic_year, is_active, enrolled_courses)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9)
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        ))
        .bind(&student.student_number)
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(&student.password_hash)
        .bind(&student.department)
        .bind(student.year)
        .bind(&student.semester)
        .bind(&student.academic_year)
        .bind(&student.enrolled_courses)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Insert many students in one transaction, skipping rows that collide
    /// with an existing number or email. Returns the numbers actually inserted.
    #[tracing::instrument(skip(self, students), fields(db.table = "students", db.operation = "insert", count = students.len()))]
    pub async fn create_many(&self, students: &[NewStudent]) -> Result<Vec<String>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(students.len());

        for student in students {
            let number = sqlx::query_scalar::<Postgres, String>(
                r#"
                INSERT INTO students (student_number, full_name, email, password_hash, department,
                                      year, semester, academic_year, is_active, enrolled_courses)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9)
                ON CONFLICT DO NOTHING
                RETURNING student_number
                "#,
            )
            .bind(&student.student_number)
            .bind(&student.full_name)
            .bind(&student.email)
            .bind(&student.password_hash)
            .bind(&student.department)
            .bind(student.year)
            .bind(&student.semester)
            .bind(&student.academic_year)
            .bind(&student.enrolled_courses)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(number) = number {
                inserted.push(number);
            }
        }

        tx.commit().await?;
        Ok(inserted)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "select"))]
    pub async fn get_by_number(&self, student_number: &str) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<Postgres, Student>(&format!(
            "SELECT {} FROM students WHERE student_number = $1",
            STUDENT_COLUMNS
        ))
        .bind(student_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "select"))]
    pub async fn number_exists(&self, student_number: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_number = $1)",
        )
        .bind(student_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "select"))]
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Which of `numbers` are already registered.
    #[tracing::instrument(skip(self, numbers), fields(db.table = "students", db.operation = "select", count = numbers.len()))]
    pub async fn existing_numbers(&self, numbers: &[String]) -> Result<Vec<String>, AppError> {
        let existing = sqlx::query_scalar::<Postgres, String>(
            "SELECT student_number FROM students WHERE student_number = ANY($1)",
        )
        .bind(numbers)
        .fetch_all(&self.pool)
        .await?;

        Ok(existing)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "select"))]
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<Postgres, Student>(&format!(
            "SELECT {} FROM students ORDER BY student_number ASC OFFSET $1 LIMIT $2",
            STUDENT_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "update", db.record_id = %id))]
    pub async fn record_login(&self, id: Uuid) -> Result<DateTime<Utc>, AppError> {
        let last_login = sqlx::query_scalar::<Postgres, DateTime<Utc>>(
            "UPDATE students SET last_login = NOW() WHERE id = $1 RETURNING last_login",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        Ok(last_login)
    }

    /// Returns the deleted row, `None` if there was none.
    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<Postgres, Student>(&format!(
            "DELETE FROM students WHERE id = $1 RETURNING {}",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "delete"))]
    pub async fn delete_by_semester(
        &self,
        semester: &str,
        academic_year: &str,
    ) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM students WHERE semester = $1 AND academic_year = $2")
                .bind(semester)
                .bind(academic_year)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}

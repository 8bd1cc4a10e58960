use async_trait::async_trait;
use faculty_core::{
    models::{Course, Homework, HomeworkAssignment, NewHomework, Student},
    AppError,
};
use faculty_db::{AssignmentRepository, CourseRepository, HomeworkRepository, StudentRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// Records the submission flow reads and writes.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn course(&self, id: Uuid) -> Result<Option<Course>, AppError>;

    async fn assignment(&self, id: Uuid) -> Result<Option<HomeworkAssignment>, AppError>;

    async fn student_by_number(&self, student_number: &str) -> Result<Option<Student>, AppError>;

    async fn find_submission(
        &self,
        student_number: &str,
        assignment_id: Uuid,
    ) -> Result<Option<Homework>, AppError>;

    /// Atomically drop `replaces` (if any) and insert `new`.
    async fn replace_submission(
        &self,
        replaces: Option<Uuid>,
        new: &NewHomework,
    ) -> Result<Homework, AppError>;
}

#[derive(Clone)]
pub struct PgSubmissionStore {
    courses: CourseRepository,
    assignments: AssignmentRepository,
    students: StudentRepository,
    homeworks: HomeworkRepository,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            courses: CourseRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            homeworks: HomeworkRepository::new(pool),
        }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        self.courses.get(id).await
    }

    async fn assignment(&self, id: Uuid) -> Result<Option<HomeworkAssignment>, AppError> {
        self.assignments.get(id).await
    }

    async fn student_by_number(&self, student_number: &str) -> Result<Option<Student>, AppError> {
        self.students.get_by_number(student_number).await
    }

    async fn find_submission(
        &self,
        student_number: &str,
        assignment_id: Uuid,
    ) -> Result<Option<Homework>, AppError> {
        self.homeworks
            .find_for_assignment(student_number, assignment_id)
            .await
    }

    async fn replace_submission(
        &self,
        replaces: Option<Uuid>,
        new: &NewHomework,
    ) -> Result<Homework, AppError> {
        self.homeworks.replace(replaces, new).await
    }
}

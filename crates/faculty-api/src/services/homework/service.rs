use std::sync::Arc;

use faculty_core::{
    models::{Homework, NewHomework},
    AppError,
};
use faculty_processing::{AssetCleanup, AssetValidator, IncomingUpload, UploadPipeline};
use faculty_storage::{Clock, SystemClock};
use uuid::Uuid;

use super::locks::KeyedLocks;
use super::rules;
use super::store::SubmissionStore;

/// A homework upload as it arrives from the form.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub student_number: String,
    pub student_name: String,
    pub course_id: Uuid,
    pub assignment_id: Option<Uuid>,
    pub notes: Option<String>,
    pub file: IncomingUpload,
}

#[derive(Clone)]
pub struct HomeworkService {
    store: Arc<dyn SubmissionStore>,
    pipeline: UploadPipeline,
    cleanup: AssetCleanup,
    locks: KeyedLocks<(String, Uuid)>,
    max_size: usize,
    clock: Arc<dyn Clock>,
}

impl HomeworkService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        pipeline: UploadPipeline,
        cleanup: AssetCleanup,
        max_size: usize,
    ) -> Self {
        Self {
            store,
            pipeline,
            cleanup,
            locks: KeyedLocks::new(),
            max_size,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Check, store and record a submission.
    ///
    /// Every refusal happens before the file is written. A previous
    /// submission for the same assignment is replaced: its row goes in the
    /// same transaction as the insert, its file once that committed.
    #[tracing::instrument(
        skip(self, req),
        fields(
            student_number = %req.student_number,
            course_id = %req.course_id,
            assignment_id = ?req.assignment_id,
            size_bytes = req.file.data.len()
        )
    )]
    pub async fn submit(&self, req: SubmissionRequest) -> Result<Homework, AppError> {
        let course = self
            .store
            .course(req.course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if let Some(assignment_id) = req.assignment_id {
            let assignment = self
                .store
                .assignment(assignment_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

            rules::evaluate(&assignment, self.clock.now()).into_result()?;
        }

        AssetValidator::pdf(self.max_size).validate(&req.file.content_type, req.file.data.len())?;

        let student = self
            .store
            .student_by_number(&req.student_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let _guard = match req.assignment_id {
            Some(assignment_id) => Some(
                self.locks
                    .lock((req.student_number.clone(), assignment_id))
                    .await,
            ),
            None => None,
        };

        let previous = match req.assignment_id {
            Some(assignment_id) => {
                self.store
                    .find_submission(&req.student_number, assignment_id)
                    .await?
            }
            None => None,
        };

        let stored = self
            .pipeline
            .accept_pdf_with_limit(req.file, self.max_size)
            .await?;

        let new = NewHomework {
            assignment_id: req.assignment_id,
            student_id: student.id,
            course_id: course.id,
            student_number: req.student_number,
            student_name: req.student_name,
            course_code: course.code,
            course_name: course.name,
            file_url: stored.url.clone(),
            notes: req.notes,
        };

        let homework = match self
            .store
            .replace_submission(previous.as_ref().map(|p| p.id), &new)
            .await
        {
            Ok(homework) => homework,
            Err(e) => {
                self.cleanup.release(Some(stored.url.as_str())).await;
                return Err(e);
            }
        };

        if let Some(previous) = previous {
            self.cleanup
                .release_replaced(Some(previous.file_url.as_str()), Some(homework.file_url.as_str()))
                .await;
            tracing::info!(
                previous_id = %previous.id,
                previous_file = %previous.file_url,
                "Replaced earlier submission"
            );
        }

        tracing::info!(
            homework_id = %homework.id,
            course_code = %homework.course_code,
            file_url = %homework.file_url,
            "Homework submitted"
        );

        Ok(homework)
    }
}

use chrono::{DateTime, Utc};
use faculty_core::{models::HomeworkAssignment, AppError};

/// How window boundaries are shown to students.
pub const WINDOW_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Inactive,
    NotOpenYet,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowDecision {
    Accepted,
    Rejected {
        reason: RejectReason,
        detail: String,
    },
}

/// Whether `assignment` takes submissions at `now`.
///
/// An inactive assignment is rejected whatever its window. Both window
/// boundaries are inclusive.
pub fn evaluate(assignment: &HomeworkAssignment, now: DateTime<Utc>) -> WindowDecision {
    if !assignment.is_active {
        return WindowDecision::Rejected {
            reason: RejectReason::Inactive,
            detail: "This assignment is inactive, uploads are not accepted".to_string(),
        };
    }

    if now < assignment.start_date {
        return WindowDecision::Rejected {
            reason: RejectReason::NotOpenYet,
            detail: format!(
                "Assignment has not started yet. Starts: {}",
                assignment.start_date.format(WINDOW_TIME_FORMAT)
            ),
        };
    }

    if now > assignment.due_date {
        return WindowDecision::Rejected {
            reason: RejectReason::Closed,
            detail: format!(
                "Submission deadline has passed. Due: {}",
                assignment.due_date.format(WINDOW_TIME_FORMAT)
            ),
        };
    }

    WindowDecision::Accepted
}

impl WindowDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, WindowDecision::Accepted)
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            WindowDecision::Accepted => Ok(()),
            WindowDecision::Rejected { reason, detail } => Err(match reason {
                RejectReason::Inactive => AppError::AssignmentInactive(detail),
                RejectReason::NotOpenYet => AppError::AssignmentNotOpenYet(detail),
                RejectReason::Closed => AppError::AssignmentClosed(detail),
            }),
        }
    }
}

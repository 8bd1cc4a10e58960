//! Faculty API Library
//!
//! HTTP handlers, authentication, the homework submission service and
//! application setup for the department website backend.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::announcements::{AnnouncementService, AnnouncementStore};
pub use services::homework::{HomeworkService, PgSubmissionStore, SubmissionStore};
pub use state::AppState;

//! Database repositories for data access layer
//!
//! Repositories are organized into control/ (administrators, students),
//! content/ (public site content) and homework/ (assignments, submissions).
//
// Accounts
pub mod control;
//
// Site content
pub mod content;
//
// Homework workflow
pub mod homework;
//
// Liveness
pub mod health;

pub use content::{
    AnalyticsRepository, AnnouncementRepository, CourseRepository, CvRepository,
    GalleryRepository, PublicationRepository,
};
pub use control::{StudentRepository, UserRepository};
pub use health::ping;
pub use homework::{AssignmentRepository, HomeworkRepository};

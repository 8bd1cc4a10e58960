pub mod assignment;
pub mod submission;

pub use assignment::AssignmentRepository;
pub use submission::HomeworkRepository;

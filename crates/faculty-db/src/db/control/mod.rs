pub mod student;
pub mod user;

pub use student::StudentRepository;
pub use user::UserRepository;

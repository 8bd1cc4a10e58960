use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_DEPARTMENT: &str = "Mekatronik Mühendisliği";
pub const DEFAULT_SEMESTER: &str = "Güz";
pub const DEFAULT_ACADEMIC_YEAR: &str = "2024-2025";
pub const MIN_STUDENT_PASSWORD_LEN: usize = 6;
/// Number of generated credentials echoed back by a bulk create.
pub const BULK_CREATE_ECHO_LIMIT: usize = 10;

#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub year: i32,
    pub semester: String,
    pub academic_year: String,
    pub is_active: bool,
    pub enrolled_courses: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: Uuid,
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub year: i32,
    pub semester: String,
    pub academic_year: String,
    pub is_active: bool,
    pub enrolled_courses: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        StudentResponse {
            id: student.id,
            student_number: student.student_number,
            full_name: student.full_name,
            email: student.email,
            department: student.department,
            year: student.year,
            semester: student.semester,
            academic_year: student.academic_year,
            is_active: student.is_active,
            enrolled_courses: student.enrolled_courses,
            created_at: student.created_at,
            last_login: student.last_login,
        }
    }
}

/// Values needed to insert a student row, after hashing.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub year: i32,
    pub semester: String,
    pub academic_year: String,
    pub enrolled_courses: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SelfRegisterRequest {
    #[validate(length(min = 1, max = 20, message = "Student number must be between 1 and 20 characters"))]
    pub student_number: String,
    #[validate(length(min = 1, max = 200, message = "Full name must be between 1 and 200 characters"))]
    pub full_name: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub course_ids: Vec<Uuid>,
}

fn default_department() -> String {
    DEFAULT_DEPARTMENT.to_string()
}

fn default_year() -> i32 {
    1
}

fn default_semester() -> String {
    DEFAULT_SEMESTER.to_string()
}

fn default_academic_year() -> String {
    DEFAULT_ACADEMIC_YEAR.to_string()
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, max = 20, message = "Student number must be between 1 and 20 characters"))]
    pub student_number: String,
    #[validate(length(min = 1, max = 200, message = "Full name must be between 1 and 200 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default = "default_year")]
    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year: i32,
    #[serde(default = "default_semester")]
    pub semester: String,
    #[serde(default = "default_academic_year")]
    pub academic_year: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StudentLoginRequest {
    #[validate(length(min = 1, message = "Student number is required"))]
    pub student_number: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentLoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub student: StudentResponse,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct BulkCreateStudentsRequest {
    #[validate(range(min = 1, max = 5000, message = "Count must be between 1 and 5000"))]
    pub count: u32,
    #[validate(length(min = 1, max = 50, message = "Password prefix must be between 1 and 50 characters"))]
    pub password_prefix: String,
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "default_semester")]
    pub semester: String,
    #[serde(default = "default_academic_year")]
    pub academic_year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedStudentCredentials {
    pub student_number: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkCreateStudentsResponse {
    pub success: bool,
    pub created_count: usize,
    pub error_count: usize,
    pub students: Vec<GeneratedStudentCredentials>,
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BulkDeleteStudentsQuery {
    pub semester: String,
    pub academic_year: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkDeleteStudentsResponse {
    pub success: bool,
    pub deleted_count: u64,
    pub semester: String,
    pub academic_year: String,
}

/// Institutional address derived from the student number.
pub fn student_email(student_number: &str, domain: &str) -> String {
    format!("{}@{}", student_number, domain)
}

/// Student number of the `index`-th bulk generated account, e.g. `2025000042`.
pub fn bulk_student_number(year: i32, index: u32) -> String {
    format!("{}{:06}", year, index)
}

/// Initial password of the `index`-th bulk generated account, e.g. `student042`.
pub fn bulk_password(prefix: &str, index: u32) -> String {
    format!("{}{:03}", prefix, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_student_number_is_zero_padded() {
        assert_eq!(bulk_student_number(2025, 1), "2025000001");
        assert_eq!(bulk_student_number(2025, 123456), "2025123456");
    }

    #[test]
    fn test_bulk_password_is_zero_padded() {
        assert_eq!(bulk_password("student", 7), "student007");
        assert_eq!(bulk_password("pw", 1234), "pw1234");
    }

    #[test]
    fn test_student_email() {
        assert_eq!(
            student_email("2025000001", "ogrenci.karabuk.edu.tr"),
            "2025000001@ogrenci.karabuk.edu.tr"
        );
    }

    #[test]
    fn test_register_request_defaults() {
        let req: RegisterStudentRequest = serde_json::from_value(serde_json::json!({
            "student_number": "2025000001",
            "full_name": "Ayşe Demir",
            "email": "ayse@example.com",
            "password": "secret1"
        }))
        .unwrap();
        assert_eq!(req.department, DEFAULT_DEPARTMENT);
        assert_eq!(req.year, 1);
        assert_eq!(req.semester, DEFAULT_SEMESTER);
        assert!(req.validate().is_ok());
    }
}

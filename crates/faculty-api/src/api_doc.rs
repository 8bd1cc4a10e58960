//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use faculty_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Faculty Website API",
        version = "0.1.0",
        description = "Backend for an academic department website: announcements, courses, publications, gallery, CV, student accounts and homework submissions. All endpoints are under /api/."
    ),
    paths(
        // Auth
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::change_password,
        // Announcements
        handlers::announcements::list_announcements,
        handlers::announcements::get_announcement,
        handlers::announcements::create_announcement,
        handlers::announcements::update_announcement,
        handlers::announcements::delete_announcement,
        handlers::announcements::upload_announcement_image,
        // Courses
        handlers::courses::list_courses,
        handlers::courses::get_course,
        handlers::courses::create_course,
        handlers::courses::update_course,
        handlers::courses::delete_course,
        // Publications
        handlers::publications::list_publications,
        handlers::publications::get_publication,
        handlers::publications::create_publication,
        handlers::publications::update_publication,
        handlers::publications::delete_publication,
        handlers::publications::upload_publication_pdf,
        // Gallery
        handlers::gallery::list_gallery,
        handlers::gallery::create_gallery_item,
        handlers::gallery::delete_gallery_item,
        handlers::gallery::upload_gallery_photo,
        // CV
        handlers::cv::get_cv,
        handlers::cv::create_cv,
        handlers::cv::update_cv,
        handlers::cv::upload_cv_pdf,
        handlers::cv::upload_cv_photo,
        // Students
        handlers::students::self_register,
        handlers::students::register,
        handlers::students::login,
        handlers::students::bulk_create,
        handlers::students::list_students,
        handlers::students::delete_student,
        handlers::students::bulk_delete_by_semester,
        // Homework
        handlers::assignments::create_assignment,
        handlers::assignments::list_assignments,
        handlers::assignments::get_assignment,
        handlers::assignments::update_assignment,
        handlers::assignments::delete_assignment,
        handlers::homeworks::submit_homework,
        handlers::homeworks::upload_homework_file,
        handlers::homeworks::list_student_homeworks,
        handlers::homeworks::list_homeworks,
        handlers::homeworks::delete_homework,
        // Site
        handlers::analytics::get_analytics,
        handlers::files::view_pdf,
        handlers::files::view_image,
    ),
    components(
        schemas(
            // Accounts
            models::LoginRequest,
            models::ChangePasswordRequest,
            models::TokenResponse,
            models::UserResponse,
            models::MessageResponse,
            // Content
            models::Announcement,
            models::CreateAnnouncementRequest,
            models::UpdateAnnouncementRequest,
            models::Course,
            models::CreateCourseRequest,
            models::UpdateCourseRequest,
            models::PublicationResponse,
            models::CreatePublicationRequest,
            models::UpdatePublicationRequest,
            models::GalleryItemResponse,
            models::CreateGalleryItemRequest,
            models::CvResponse,
            models::CreateCvRequest,
            models::UpdateCvRequest,
            models::AnalyticsSnapshot,
            // Uploads
            models::AssetClass,
            models::UploadResponse,
            // Students
            models::StudentResponse,
            models::SelfRegisterRequest,
            models::RegisterStudentRequest,
            models::StudentLoginRequest,
            models::StudentLoginResponse,
            models::BulkCreateStudentsRequest,
            models::GeneratedStudentCredentials,
            models::BulkCreateStudentsResponse,
            models::BulkDeleteStudentsResponse,
            // Homework
            models::HomeworkAssignment,
            models::CreateAssignmentRequest,
            models::UpdateAssignmentRequest,
            models::Homework,
            handlers::homeworks::HomeworkFileResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Administrator login and password management"),
        (name = "announcements", description = "Department announcements"),
        (name = "courses", description = "Course catalogue"),
        (name = "publications", description = "Publications with optional PDF"),
        (name = "gallery", description = "Photo and video gallery"),
        (name = "cv", description = "Faculty member CV"),
        (name = "students", description = "Student accounts"),
        (name = "homework-assignments", description = "Homework assignments and their submission windows"),
        (name = "homeworks", description = "Homework submissions"),
        (name = "analytics", description = "Site counters"),
        (name = "files", description = "Stored PDF and image views")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_homework_routes() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/homeworks"));
        assert!(spec
            .paths
            .paths
            .contains_key("/api/homeworks/my-homeworks/{student_number}"));
        assert!(spec.paths.paths.contains_key("/api/files/pdf/{name}"));
    }
}

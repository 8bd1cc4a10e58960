//! Domain route groups (content, students, homework).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;

pub fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/auth/login", API_PREFIX), post(handlers::auth::login))
        .route(&format!("{}/auth/me", API_PREFIX), get(handlers::auth::me))
        .route(
            &format!("{}/auth/change-password", API_PREFIX),
            post(handlers::auth::change_password),
        )
        .with_state(state)
}

pub fn announcement_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::announcements::*;

    Router::new()
        .route(
            &format!("{}/announcements", API_PREFIX),
            get(list_announcements).post(create_announcement),
        )
        .route(
            &format!("{}/announcements/upload-image", API_PREFIX),
            post(upload_announcement_image),
        )
        .route(
            &format!("{}/announcements/{{id}}", API_PREFIX),
            get(get_announcement)
                .put(update_announcement)
                .delete(delete_announcement),
        )
        .with_state(state)
}

pub fn course_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::courses::*;

    Router::new()
        .route(
            &format!("{}/courses", API_PREFIX),
            get(list_courses).post(create_course),
        )
        .route(
            &format!("{}/courses/{{id}}", API_PREFIX),
            get(get_course).put(update_course).delete(delete_course),
        )
        .with_state(state)
}

pub fn publication_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::publications::*;

    Router::new()
        .route(
            &format!("{}/publications", API_PREFIX),
            get(list_publications).post(create_publication),
        )
        .route(
            &format!("{}/publications/upload-pdf", API_PREFIX),
            post(upload_publication_pdf),
        )
        .route(
            &format!("{}/publications/{{id}}", API_PREFIX),
            get(get_publication)
                .put(update_publication)
                .delete(delete_publication),
        )
        .with_state(state)
}

pub fn gallery_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::gallery::*;

    Router::new()
        .route(
            &format!("{}/gallery", API_PREFIX),
            get(list_gallery).post(create_gallery_item),
        )
        .route(
            &format!("{}/gallery/upload-photo", API_PREFIX),
            post(upload_gallery_photo),
        )
        .route(
            &format!("{}/gallery/{{id}}", API_PREFIX),
            delete(delete_gallery_item),
        )
        .with_state(state)
}

pub fn cv_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::cv::*;

    Router::new()
        .route(
            &format!("{}/cv", API_PREFIX),
            get(get_cv).post(create_cv).put(update_cv),
        )
        .route(&format!("{}/cv/upload-pdf", API_PREFIX), post(upload_cv_pdf))
        .route(&format!("{}/cv/upload-photo", API_PREFIX), post(upload_cv_photo))
        .with_state(state)
}

pub fn student_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::students::*;

    Router::new()
        .route(&format!("{}/students", API_PREFIX), get(list_students))
        .route(
            &format!("{}/students/self-register", API_PREFIX),
            post(self_register),
        )
        .route(&format!("{}/students/register", API_PREFIX), post(register))
        .route(&format!("{}/students/login", API_PREFIX), post(login))
        .route(&format!("{}/students/bulk-create", API_PREFIX), post(bulk_create))
        .route(
            &format!("{}/students/bulk-delete-by-semester", API_PREFIX),
            delete(bulk_delete_by_semester),
        )
        .route(
            &format!("{}/students/{{id}}", API_PREFIX),
            delete(delete_student),
        )
        .with_state(state)
}

pub fn assignment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::assignments::*;

    Router::new()
        .route(
            &format!("{}/homework-assignments", API_PREFIX),
            get(list_assignments).post(create_assignment),
        )
        .route(
            &format!("{}/homework-assignments/{{id}}", API_PREFIX),
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        .with_state(state)
}

pub fn homework_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::homeworks::*;

    Router::new()
        .route(
            &format!("{}/homeworks", API_PREFIX),
            get(list_homeworks).post(submit_homework),
        )
        .route(
            &format!("{}/homeworks/upload", API_PREFIX),
            post(upload_homework_file),
        )
        .route(
            &format!("{}/homeworks/my-homeworks/{{student_number}}", API_PREFIX),
            get(list_student_homeworks),
        )
        .route(
            &format!("{}/homeworks/{{id}}", API_PREFIX),
            delete(delete_homework),
        )
        .with_state(state)
}

pub fn analytics_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/analytics", API_PREFIX),
            get(handlers::analytics::get_analytics),
        )
        .with_state(state)
}

pub fn file_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/files/pdf/{{name}}", API_PREFIX),
            get(handlers::files::view_pdf),
        )
        .route(
            &format!("{}/files/image/{{name}}", API_PREFIX),
            get(handlers::files::view_image),
        )
        .with_state(state)
}

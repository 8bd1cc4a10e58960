//! Student account handlers
//!
//! Registration and login are public. Listing, bulk creation and deletion
//! need an administrator.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use faculty_core::models::{
    bulk_password, bulk_student_number, student_email, BulkCreateStudentsRequest,
    BulkCreateStudentsResponse, BulkDeleteStudentsQuery, BulkDeleteStudentsResponse,
    GeneratedStudentCredentials, MessageResponse, NewStudent, Pagination, RegisterStudentRequest,
    SelfRegisterRequest, StudentLoginRequest, StudentLoginResponse, StudentResponse,
    BULK_CREATE_ECHO_LIMIT, DEFAULT_ACADEMIC_YEAR, DEFAULT_DEPARTMENT, DEFAULT_SEMESTER,
    MIN_STUDENT_PASSWORD_LEN,
};
use faculty_core::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{AdminContext, TokenKind};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

fn number_taken() -> AppError {
    AppError::BadRequest("Student number already registered".to_string())
}

/// Self registration checks that need no database round trip.
fn check_self_registration(request: &SelfRegisterRequest) -> Result<(), AppError> {
    if request.password != request.password_confirm {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }
    if request.password.chars().count() < MIN_STUDENT_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_STUDENT_PASSWORD_LEN
        )));
    }
    if request.course_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one course must be selected".to_string(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/students/self-register",
    tag = "students",
    request_body = SelfRegisterRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 400, description = "Invalid registration", body = ErrorResponse),
        (status = 404, description = "A selected course does not exist", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(student_number = %request.student_number))]
pub async fn self_register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SelfRegisterRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    check_self_registration(&request)?;

    let students = &state.db.student_repository;
    if students.number_exists(&request.student_number).await? {
        return Err(number_taken().into());
    }

    let missing = state
        .db
        .course_repository
        .missing_ids(&request.course_ids)
        .await?;
    if let Some(id) = missing.first() {
        return Err(AppError::NotFound(format!("Course not found: {}", id)).into());
    }

    let new_student = NewStudent {
        email: student_email(&request.student_number, &state.config.student_email_domain),
        student_number: request.student_number,
        full_name: request.full_name,
        password_hash: hash_password_blocking(request.password).await?,
        department: DEFAULT_DEPARTMENT.to_string(),
        year: 1,
        semester: DEFAULT_SEMESTER.to_string(),
        academic_year: DEFAULT_ACADEMIC_YEAR.to_string(),
        enrolled_courses: request.course_ids,
    };

    let student = students.create(&new_student).await?;
    tracing::info!(
        student_number = %student.student_number,
        courses = student.enrolled_courses.len(),
        "Student self-registered"
    );

    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

#[utoipa::path(
    post,
    path = "/api/students/register",
    tag = "students",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 400, description = "Number or email already registered", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(student_number = %request.student_number))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterStudentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let students = &state.db.student_repository;
    if students.number_exists(&request.student_number).await? {
        return Err(number_taken().into());
    }
    if students.email_exists(&request.email).await? {
        return Err(AppError::BadRequest("Email already registered".to_string()).into());
    }

    let new_student = NewStudent {
        student_number: request.student_number,
        full_name: request.full_name,
        email: request.email,
        password_hash: hash_password_blocking(request.password).await?,
        department: request.department,
        year: request.year,
        semester: request.semester,
        academic_year: request.academic_year,
        enrolled_courses: Vec::new(),
    };

    let student = students.create(&new_student).await?;
    tracing::info!(student_number = %student.student_number, "Student registered");

    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

#[utoipa::path(
    post,
    path = "/api/students/login",
    tag = "students",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = StudentLoginResponse),
        (status = 401, description = "Incorrect student number or password", body = ErrorResponse),
        (status = 403, description = "Account inactive", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(student_number = %request.student_number))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<StudentLoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let rejected = || AppError::Unauthorized("Incorrect student number or password".to_string());

    let mut student = state
        .db
        .student_repository
        .get_by_number(&request.student_number)
        .await?
        .ok_or_else(rejected)?;

    if !verify_password_blocking(request.password, student.password_hash.clone()).await? {
        return Err(rejected().into());
    }

    if !student.is_active {
        return Err(AppError::Forbidden("Student account is inactive".to_string()).into());
    }

    student.last_login = Some(state.db.student_repository.record_login(student.id).await?);
    let access_token = state.jwt.issue(&student.student_number, TokenKind::Student)?;
    tracing::info!(student_number = %student.student_number, "Student logged in");

    Ok(Json(StudentLoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        student: StudentResponse::from(student),
    }))
}

/// Generate `count` accounts numbered `{current year}{i:06}`.
///
/// Numbers that already exist are reported in `errors` and skipped. At most
/// ten credentials and ten errors are echoed back.
#[utoipa::path(
    post,
    path = "/api/students/bulk-create",
    tag = "students",
    request_body = BulkCreateStudentsRequest,
    responses(
        (status = 201, description = "Accounts created", body = BulkCreateStudentsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, admin, request), fields(user_id = %admin.user_id, count = request.count))]
pub async fn bulk_create(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    ValidatedJson(request): ValidatedJson<BulkCreateStudentsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let current_year = Utc::now().year();
    let numbers: Vec<String> = (1..=request.count)
        .map(|i| bulk_student_number(current_year, i))
        .collect();

    let existing: HashSet<String> = state
        .db
        .student_repository
        .existing_numbers(&numbers)
        .await?
        .into_iter()
        .collect();

    let mut errors = Vec::new();
    let mut credentials = Vec::new();
    let mut new_students = Vec::new();

    for (i, student_number) in (1..=request.count).zip(numbers) {
        if existing.contains(&student_number) {
            errors.push(format!("Student {} already exists", student_number));
            continue;
        }

        let password = bulk_password(&request.password_prefix, i);
        let email = student_email(&student_number, &state.config.student_email_domain);
        let full_name = format!("Öğrenci {}", i);

        new_students.push(NewStudent {
            student_number: student_number.clone(),
            full_name: full_name.clone(),
            email: email.clone(),
            password_hash: hash_password_blocking(password.clone()).await?,
            department: request.department.clone(),
            year: request.year,
            semester: request.semester.clone(),
            academic_year: request.academic_year.clone(),
            enrolled_courses: Vec::new(),
        });
        credentials.push(GeneratedStudentCredentials {
            student_number,
            password,
            email,
            full_name,
        });
    }

    let inserted: HashSet<String> = state
        .db
        .student_repository
        .create_many(&new_students)
        .await?
        .into_iter()
        .collect();

    // Rows that lost a race with a concurrent insert are skipped by the repository
    for credential in &credentials {
        if !inserted.contains(&credential.student_number) {
            errors.push(format!("Student {} already exists", credential.student_number));
        }
    }
    credentials.retain(|c| inserted.contains(&c.student_number));

    tracing::info!(
        created = credentials.len(),
        skipped = errors.len(),
        "Bulk student creation finished"
    );

    let response = BulkCreateStudentsResponse {
        success: true,
        created_count: credentials.len(),
        error_count: errors.len(),
        students: credentials.into_iter().take(BULK_CREATE_ECHO_LIMIT).collect(),
        errors: errors.into_iter().take(BULK_CREATE_ECHO_LIMIT).collect(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    params(Pagination),
    responses(
        (status = 200, description = "Students ordered by number", body = Vec<StudentResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (skip, limit) = page.bounds();
    let students = state.db.student_repository.list(skip, limit).await?;

    let responses: Vec<StudentResponse> =
        students.into_iter().map(StudentResponse::from).collect();
    Ok(Json(responses))
}

/// The student's homework rows cascade in the database; their files are released here.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file_urls = state
        .db
        .homework_repository
        .file_urls_for_student(id)
        .await?;

    let student = state
        .db
        .student_repository
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    state
        .uploads
        .cleanup
        .release_all(file_urls.iter().map(|url| Some(url.as_str())).collect::<Vec<_>>())
        .await;
    tracing::info!(
        student_number = %student.student_number,
        released_files = file_urls.len(),
        "Student deleted"
    );

    Ok(Json(MessageResponse::new("Student deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/students/bulk-delete-by-semester",
    tag = "students",
    params(BulkDeleteStudentsQuery),
    responses(
        (status = 200, description = "Students of the term deleted", body = BulkDeleteStudentsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn bulk_delete_by_semester(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Query(query): Query<BulkDeleteStudentsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file_urls = state
        .db
        .homework_repository
        .file_urls_for_semester(&query.semester, &query.academic_year)
        .await?;

    let deleted_count = state
        .db
        .student_repository
        .delete_by_semester(&query.semester, &query.academic_year)
        .await?;

    state
        .uploads
        .cleanup
        .release_all(file_urls.iter().map(|url| Some(url.as_str())).collect::<Vec<_>>())
        .await;
    tracing::info!(
        semester = %query.semester,
        academic_year = %query.academic_year,
        deleted_count,
        "Students of term deleted"
    );

    Ok(Json(BulkDeleteStudentsResponse {
        success: true,
        deleted_count,
        semester: query.semester,
        academic_year: query.academic_year,
    }))
}

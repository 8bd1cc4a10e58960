//! Router-level tests for the routes that need no database.
//!
//! Run with: `cargo test -p faculty-api --test routes_test`

mod helpers;

use helpers::fixtures::pdf_bytes;
use helpers::{api_path, setup_test_app};

#[tokio::test]
async fn test_root_message() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/")).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Academic Website API - Backend is running!");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/openapi.json")).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/homeworks"].is_object());
}

#[tokio::test]
async fn test_health_reports_upload_directories() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/health")).await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["storage"], "healthy");
    assert!(body["database"].is_string());
}

#[tokio::test]
async fn test_view_stored_pdf() {
    let app = setup_test_app().await;
    let data = pdf_bytes(512);
    std::fs::write(app.upload_root().join("pdfs").join("makale.pdf"), &data).unwrap();

    let response = app.client().get(&api_path("/files/pdf/makale.pdf")).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(response.as_bytes().as_ref(), data.as_slice());
}

#[tokio::test]
async fn test_view_missing_file_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/files/image/missing.jpg"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "ASSET_NOT_FOUND");
    assert!(!body.to_string().contains(app.upload_root().to_str().unwrap()));
}

#[tokio::test]
async fn test_view_file_does_not_escape_upload_dir() {
    let app = setup_test_app().await;
    std::fs::write(app.upload_root().join("secret.pdf"), pdf_bytes(64)).unwrap();

    let response = app
        .client()
        .get(&api_path("/files/pdf/..%2Fsecret.pdf"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_uploads_are_served_statically() {
    let app = setup_test_app().await;
    std::fs::write(app.upload_root().join("pdfs").join("ders.pdf"), pdf_bytes(128)).unwrap();

    let response = app.client().get("/uploads/pdfs/ders.pdf").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().len(), 128);
}

#[tokio::test]
async fn test_admin_routes_reject_missing_or_invalid_tokens() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/announcements"))
        .json(&serde_json::json!({ "title": "Duyuru", "content": "..." }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .client()
        .get(&api_path("/analytics"))
        .add_header("Authorization", "Bearer not-a-jwt")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 401);

    let token = app.student_token("2025000001");
    let response = app
        .client()
        .delete(&api_path(&format!("/courses/{}", uuid::Uuid::new_v4())))
        .add_header("Authorization", format!("Bearer {}", token))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_upload_requires_admin_before_reading_body() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_part(
        "file",
        helpers::fixtures::pdf_part(256),
    );
    let response = app
        .client()
        .post(&api_path("/publications/upload-pdf"))
        .multipart(form)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(app.stored_pdfs().is_empty());
}

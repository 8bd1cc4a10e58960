//! Announcement deletes and their image cascade.
//!
//! Run with: `cargo test -p faculty-api --test announcement_test`

mod helpers;

use faculty_core::{AppError, ErrorMetadata};
use helpers::setup_test_app;
use uuid::Uuid;

#[tokio::test]
async fn test_delete_announcement_with_missing_image_succeeds() {
    let app = setup_test_app().await;
    let announcement = app
        .store
        .add_announcement(Some("/uploads/images/already_removed.jpg"));
    assert!(!app
        .upload_root()
        .join("images")
        .join("already_removed.jpg")
        .exists());

    let deleted = app
        .state
        .announcements
        .delete(announcement.id)
        .await
        .expect("delete should succeed");

    assert_eq!(deleted.id, announcement.id);
    assert!(!app.store.has_announcement(announcement.id));
}

#[tokio::test]
async fn test_delete_announcement_removes_image_and_thumbnail() {
    let app = setup_test_app().await;
    let image = app.upload_root().join("images").join("afis.jpg");
    let thumb = app.upload_root().join("thumbnails").join("thumb_afis.jpg");
    std::fs::write(&image, b"jpeg").unwrap();
    std::fs::write(&thumb, b"thumb").unwrap();
    let announcement = app.store.add_announcement(Some("/uploads/images/afis.jpg"));

    app.state
        .announcements
        .delete(announcement.id)
        .await
        .expect("delete should succeed");

    assert!(!app.store.has_announcement(announcement.id));
    assert!(!image.exists());
    assert!(!thumb.exists());
}

#[tokio::test]
async fn test_delete_announcement_without_image() {
    let app = setup_test_app().await;
    let announcement = app.store.add_announcement(None);

    app.state
        .announcements
        .delete(announcement.id)
        .await
        .expect("delete should succeed");

    assert!(!app.store.has_announcement(announcement.id));
}

#[tokio::test]
async fn test_delete_unknown_announcement_is_not_found() {
    let app = setup_test_app().await;

    let err = app.state.announcements.delete(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.http_status_code(), 404);
}

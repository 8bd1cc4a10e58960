use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use faculty_core::AssetClass;
use faculty_processing::{
    IncomingUpload, NormalizerSettings, PipelineError, ThumbnailSettings, UploadPipeline,
    ValidationError,
};
use faculty_storage::{FixedClock, LocalStorage, SequentialIds, UniqueNamer, UploadDirs};
use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

const MB: usize = 1024 * 1024;

async fn setup_pipeline() -> (UploadPipeline, TempDir) {
    let temp = tempfile::tempdir().unwrap();
    let dirs = UploadDirs::new(temp.path());
    dirs.ensure_dirs().await.unwrap();

    let instant = Utc.with_ymd_and_hms(2025, 1, 1, 14, 22, 58).unwrap();
    let storage = LocalStorage::with_namer(
        dirs,
        UniqueNamer::new(Arc::new(FixedClock(instant)), Arc::new(SequentialIds::default())),
    );
    let pipeline = UploadPipeline::new(
        storage,
        NormalizerSettings::default(),
        ThumbnailSettings::default(),
        10 * MB,
    );
    (pipeline, temp)
}

fn png_upload(filename: &str, width: u32, height: u32) -> IncomingUpload {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 128]))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    IncomingUpload {
        filename: filename.to_string(),
        content_type: "image/png".to_string(),
        data: Bytes::from(out.into_inner()),
    }
}

fn pdf_upload(size: usize) -> IncomingUpload {
    let mut data = b"%PDF-1.4\n".to_vec();
    data.resize(size, b'0');
    IncomingUpload {
        filename: "Ödev 1.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        data: Bytes::from(data),
    }
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_text_plain_to_image_endpoint_writes_nothing() {
    let (pipeline, temp) = setup_pipeline().await;
    let upload = IncomingUpload {
        filename: "notes.txt".to_string(),
        content_type: "text/plain".to_string(),
        data: Bytes::from_static(b"hello"),
    };

    let result = pipeline.accept(AssetClass::Image, upload).await;

    assert!(matches!(
        result,
        Err(PipelineError::Validation(ValidationError::InvalidContentType { .. }))
    ));
    assert_eq!(file_count(&temp.path().join("images")), 0);
    assert_eq!(file_count(&temp.path().join("thumbnails")), 0);
}

#[tokio::test]
async fn test_image_upload_is_normalized_and_thumbnailed() {
    let (pipeline, temp) = setup_pipeline().await;

    let response = pipeline
        .accept(AssetClass::Image, png_upload("Kampüs Fotoğrafı.png", 2400, 1200))
        .await
        .unwrap();

    assert_eq!(response.filename, "Kampus_Fotografi_14225801012025_00000001.png");
    assert_eq!(response.url, format!("/uploads/images/{}", response.filename));
    assert_eq!(
        response.thumbnail_url.as_deref(),
        Some(format!("/uploads/thumbnails/thumb_{}", response.filename).as_str())
    );

    let stored = std::fs::read(temp.path().join("images").join(&response.filename)).unwrap();
    assert_eq!(response.optimized_size, Some(stored.len() as u64));
    let decoded = image::load_from_memory(&stored).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1920, 960));

    let thumb_path = temp
        .path()
        .join("thumbnails")
        .join(format!("thumb_{}", response.filename));
    let thumb = image::load_from_memory(&std::fs::read(thumb_path).unwrap()).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (300, 150));
}

#[tokio::test]
async fn test_thumbnail_failure_still_succeeds() {
    let (pipeline, temp) = setup_pipeline().await;
    let thumbnails = temp.path().join("thumbnails");
    std::fs::remove_dir(&thumbnails).unwrap();
    std::fs::write(&thumbnails, b"not a directory").unwrap();

    let response = pipeline
        .accept(AssetClass::Image, png_upload("photo.png", 64, 64))
        .await
        .unwrap();

    assert!(response.thumbnail_url.is_none());
    assert!(response.optimized_size.is_some());
    assert!(temp.path().join("images").join(&response.filename).exists());
}

#[tokio::test]
async fn test_undecodable_image_is_removed() {
    let (pipeline, temp) = setup_pipeline().await;
    let upload = IncomingUpload {
        filename: "fake.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        data: Bytes::from_static(b"this is not a jpeg"),
    };

    let result = pipeline.accept(AssetClass::Image, upload).await;

    assert!(matches!(result, Err(PipelineError::Image(_))));
    assert_eq!(file_count(&temp.path().join("images")), 0);
}

#[tokio::test]
async fn test_pdf_is_stored_as_is() {
    let (pipeline, temp) = setup_pipeline().await;
    let upload = pdf_upload(2048);
    let expected = upload.data.clone();

    let response = pipeline.accept(AssetClass::Pdf, upload).await.unwrap();

    assert_eq!(response.filename, "Odev_1_14225801012025_00000001.pdf");
    assert_eq!(response.size, 2048);
    assert!(response.thumbnail_url.is_none());
    assert!(response.optimized_size.is_none());
    let on_disk = std::fs::read(temp.path().join("pdfs").join(&response.filename)).unwrap();
    assert_eq!(on_disk, expected.to_vec());
}

#[tokio::test]
async fn test_homework_ceiling_rejects_before_write() {
    let (pipeline, temp) = setup_pipeline().await;

    let result = pipeline
        .accept_pdf_with_limit(pdf_upload(3 * MB + 1), 3 * MB)
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::Validation(ValidationError::FileTooLarge { .. }))
    ));
    assert_eq!(file_count(&temp.path().join("pdfs")), 0);
}

#[tokio::test]
async fn test_general_pdf_ceiling() {
    let (pipeline, _temp) = setup_pipeline().await;

    assert!(pipeline.accept(AssetClass::Pdf, pdf_upload(10 * MB)).await.is_ok());
    assert!(pipeline
        .accept(AssetClass::Pdf, pdf_upload(10 * MB + 1))
        .await
        .is_err());
}

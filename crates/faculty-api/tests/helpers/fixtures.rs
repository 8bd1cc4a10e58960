//! Request bodies used across tests.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use uuid::Uuid;

/// Minimal PDF padded to `size` bytes.
pub fn pdf_bytes(size: usize) -> Vec<u8> {
    let mut data = b"%PDF-1.4\n%test\n".to_vec();
    data.resize(size.max(data.len()), b' ');
    data
}

pub fn pdf_part(size: usize) -> Part {
    Part::bytes(bytes::Bytes::from(pdf_bytes(size)))
        .file_name("odev.pdf")
        .mime_type("application/pdf")
}

pub fn submission_form(
    student_number: &str,
    course_id: Uuid,
    assignment_id: Option<Uuid>,
    file: Part,
) -> MultipartForm {
    let form = MultipartForm::new()
        .add_text("student_number", student_number.to_string())
        .add_text("student_name", "Test Student")
        .add_text("course_id", course_id.to_string());
    let form = match assignment_id {
        Some(id) => form.add_text("assignment_id", id.to_string()),
        None => form,
    };
    form.add_part("file", file)
}

//! Tests for the high-level extraction API.

mod common;

use common::{DocBuilder, RANGE_CMAP};
use pdfsift_core::api::{
    ExtractOptions, extract_text, extract_text_from_bytes, extract_text_to_file,
    extract_text_to_writer,
};
use pdfsift_core::parser::PdfReader;
use pdfsift_core::pipeline::text_only_filter;
use pdfsift_core::PdfError;
use std::path::PathBuf;

fn sample() -> Vec<u8> {
    DocBuilder::new()
        .dict("<< /Type /Catalog /Pages 2 0 R >>")
        .dict("<< /Type /Pages /Kids [3 0 R] /Count 1 >>")
        .dict("<< /Type /Page /Parent 2 0 R /Contents 4 0 R >>")
        .flate_stream(b"BT /F1 12 Tf 72 720 Td (Hello-World) Tj T* (second line) Tj ET")
        .stream("/Type /XObject /Subtype /Image ", b"\x89PNG")
        .build()
}

fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("sample.pdf");
    std::fs::write(&path, sample()).unwrap();
    path
}

#[test]
fn test_extract_text_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);
    let text = extract_text(&path, None).unwrap();
    assert_eq!(text, "Hello World\nsecond line");
}

#[test]
fn test_extract_text_from_bytes_matches_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);
    let options = ExtractOptions::default().with_workers(3).with_buffer_size(16);
    assert_eq!(
        extract_text_from_bytes("sample", &sample(), Some(options.clone())).unwrap(),
        extract_text(&path, Some(options)).unwrap()
    );
}

#[test]
fn test_extract_text_maps_hex() {
    let data = DocBuilder::new()
        .stream("", RANGE_CMAP)
        .stream("", b"BT <00080009> Tj ET")
        .build();
    let text = extract_text_from_bytes("hex", &data, None).unwrap();
    assert_eq!(text, "\0H\0I");
}

#[test]
fn test_extract_text_to_writer() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);
    let mut out = Vec::new();
    let written = extract_text_to_writer(&path, &mut out, None).unwrap();
    assert_eq!(written, out.len());
    assert!(out.starts_with(b"Hello World"));
}

#[test]
fn test_extract_text_to_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);
    let output = dir.path().join("result.txt");
    let written = extract_text_to_file(&path, Some(&output), None).unwrap();
    assert_eq!(written, output);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Hello World\nsecond line"
    );
}

#[test]
fn test_page_and_content_stream_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.pdf");
    let data = DocBuilder::new()
        .dict("<< /Type /Page >>")
        .flate_stream(b"BT (Hello) Tj ET")
        .build();
    std::fs::write(&path, data).unwrap();

    let pdf = PdfReader::open(&path, 4096).unwrap().read_all().unwrap();
    assert_eq!(pdf.count(), 2);
    let kept: Vec<_> = pdf
        .objects()
        .iter()
        .filter(|o| text_only_filter(o))
        .map(|o| o.position().object)
        .collect();
    assert_eq!(kept, vec![2]);

    let written = extract_text_to_file(&path, None, None).unwrap();
    assert_eq!(written, dir.path().join("hello.pdf.txt"));
    assert_eq!(std::fs::read_to_string(&written).unwrap(), "Hello");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = extract_text(dir.path().join("absent.pdf"), None);
    assert!(matches!(result, Err(PdfError::Io(_))));
}

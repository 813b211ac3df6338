//! Tests for the pdfsift CLI tool:
//! - Output to <FILE>.txt next to the input (default)
//! - Output to a chosen file (-o)
//! - Printing to stdout (--stdout)
//! - Diagnostics on malformed input

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run pdfsift in `dir` with given arguments and return (exit_code, stdout, stderr).
fn run_pdfsift(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_pdfsift"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute pdfsift");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

/// Write a one-page document with a compressed content stream.
fn write_fixture(dir: &Path, name: &str) -> PathBuf {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"BT (Hello) Tj T* (CLI) Tj ET").unwrap();
    let compressed = encoder.finish().unwrap();

    let mut data = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n".to_vec();
    data.extend_from_slice(
        format!(
            "2 0 obj\n<< /Length {} /Filter /FlateDecode >>\nstream\n",
            compressed.len()
        )
        .as_bytes(),
    );
    data.extend_from_slice(&compressed);
    data.extend_from_slice(b"\nendstream\nendobj\n%%EOF\n");

    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_default_output_follows_input_directory() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    std::fs::create_dir(&docs).unwrap();
    write_fixture(&docs, "report.pdf");
    let (code, _, stderr) = run_pdfsift(dir.path(), &["docs/report.pdf"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(docs.join("report.pdf.txt").exists());
    assert!(!dir.path().join("report.pdf.txt").exists());
}

#[test]
fn test_default_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "report.pdf");
    let (code, _, stderr) = run_pdfsift(dir.path(), &["report.pdf"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let text = std::fs::read_to_string(dir.path().join("report.pdf.txt")).unwrap();
    assert_eq!(text, "Hello\nCLI");
}

#[test]
fn test_explicit_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.pdf");
    let output = dir.path().join("custom.txt");
    let (code, _, _) = run_pdfsift(
        dir.path(),
        &[input.to_str().unwrap(), "-o", output.to_str().unwrap(), "-j", "2"],
    );
    assert_eq!(code, 0);
    assert_eq!(std::fs::read_to_string(output).unwrap(), "Hello\nCLI");
}

#[test]
fn test_stdout() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "in.pdf");
    let (code, stdout, _) = run_pdfsift(dir.path(), &["in.pdf", "--stdout"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "Hello\nCLI\n");
}

#[test]
fn test_missing_argument() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_pdfsift(dir.path(), &[]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_malformed_document_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.pdf"),
        b"%PDF-1.4\n1 0 obj\n<< /Length 4x >>\nendobj\n",
    )
    .unwrap();
    let (code, _, stderr) = run_pdfsift(dir.path(), &["bad.pdf"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
}

use std::fs;

use sheetpress_engine::{artifact_filename, ensure_output_dir, ArtifactStore, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("sheet.pdf", b"%PDF first").unwrap();
    assert_eq!(first.file_name().unwrap(), "sheet.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"%PDF first");

    let second = writer.write("sheet.pdf", b"%PDF second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"%PDF second");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("sheet.pdf", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("sheet.pdf").exists());
}

#[test]
fn artifact_store_returns_file_url_to_bytes() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().join("artifacts"));

    let url = store.store(b"%PDF-1.4 rendered").unwrap();
    assert!(url.starts_with("file://"), "{url}");
    assert!(url.ends_with(&artifact_filename(b"%PDF-1.4 rendered")));

    let path = url::Url::parse(&url).unwrap().to_file_path().unwrap();
    assert_eq!(fs::read(path).unwrap(), b"%PDF-1.4 rendered");
}

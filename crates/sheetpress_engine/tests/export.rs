use std::fs;

use pretty_assertions::assert_eq;
use sheetpress_engine::{
    ArtifactStore, ExportError, ExportSettings, Exporter, FileTarget, TextTarget,
    UnavailableTarget,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn exporter_into(download_to: std::path::PathBuf) -> Exporter {
    Exporter::new(
        ExportSettings {
            download_to,
            ..ExportSettings::default()
        },
        Box::new(UnavailableTarget),
    )
    .unwrap()
}

#[tokio::test]
async fn downloads_local_artifact_into_directory() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().join("artifacts"));
    let artifact_url = store.store(b"%PDF local").unwrap();

    let downloads = temp.path().join("downloads");
    fs::create_dir_all(&downloads).unwrap();
    let saved = exporter_into(downloads.clone())
        .download(&artifact_url)
        .await
        .unwrap();

    assert_eq!(saved.parent().unwrap(), downloads.as_path());
    assert_eq!(fs::read(saved).unwrap(), b"%PDF local");
}

#[tokio::test]
async fn downloads_remote_artifact_to_explicit_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/out/1.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF remote".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let target = temp.path().join("mine.pdf");
    let saved = exporter_into(target.clone())
        .download(&format!("{}/out/1.pdf", server.uri()))
        .await
        .unwrap();

    assert_eq!(saved, target);
    assert_eq!(fs::read(target).unwrap(), b"%PDF remote");
}

#[tokio::test]
async fn remote_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/out/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let err = exporter_into(temp.path().to_path_buf())
        .download(&format!("{}/out/missing.pdf", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "download failed: http status 404");
}

#[tokio::test]
async fn relative_reference_is_unsupported() {
    let temp = TempDir::new().unwrap();
    let err = exporter_into(temp.path().to_path_buf())
        .download("/out/1.pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedUrl(_)));
}

#[test]
fn file_target_receives_text() {
    let temp = TempDir::new().unwrap();
    let target = FileTarget::new(temp.path().join("sheet.tex"));
    let summary = target.copy_text("\\documentclass{article}").unwrap();

    assert!(summary.starts_with("copied 23 characters"), "{summary}");
    assert_eq!(
        fs::read_to_string(temp.path().join("sheet.tex")).unwrap(),
        "\\documentclass{article}"
    );
}

#[test]
fn unavailable_target_fails() {
    let temp = TempDir::new().unwrap();
    let err = exporter_into(temp.path().to_path_buf())
        .copy_text("text")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "copy target unavailable: no copy target configured"
    );
}

#[tokio::test]
async fn oversized_remote_artifact_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/out/big.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.5 oversized".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let exporter = Exporter::new(
        ExportSettings {
            download_to: temp.path().to_path_buf(),
            max_bytes: 8,
            ..ExportSettings::default()
        },
        Box::new(UnavailableTarget),
    )
    .unwrap();

    let err = exporter
        .download(&format!("{}/out/big.pdf", server.uri()))
        .await
        .unwrap_err();
    match err {
        ExportError::Http(message) => assert!(message.contains("too large"), "{message}"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

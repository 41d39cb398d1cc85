use std::time::Duration;
use workbook_import::models::internal::PendingFile;
use workbook_import::services::upload_client::{ArtifactUploader, UploadClient, UploadError};
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pending(name: &str, bytes: &[u8]) -> PendingFile {
    PendingFile {
        name: name.to_string(),
        raw_bytes: bytes.to_vec(),
    }
}

#[test]
fn test_upload_client_new() {
    let client = UploadClient::new("http://localhost:8000/api/upload".to_string());
    assert_eq!(client.upload_url(), "http://localhost:8000/api/upload");
}

#[test]
fn test_upload_client_with_timeout() {
    let client = UploadClient::with_timeout(
        "http://localhost:8000/api/upload".to_string(),
        Duration::from_secs(5),
    );
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_upload_sends_raw_bytes_and_file_name() {
    let mock_server = MockServer::start().await;
    let client = UploadClient::new(format!("{}/api/upload", mock_server.uri()));

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(header("content-type", "application/octet-stream"))
        .and(header(
            "content-disposition",
            "attachment; filename=\"report.xlsx\"",
        ))
        .and(body_bytes(b"PK\x03\x04raw".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"converted".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let artifact = client
        .upload(pending("report.xlsx", b"PK\x03\x04raw"))
        .await
        .unwrap();

    assert_eq!(artifact.as_bytes(), b"converted");
}

#[tokio::test]
async fn test_upload_rejected_by_endpoint() {
    let mock_server = MockServer::start().await;
    let client = UploadClient::new(format!("{}/api/upload", mock_server.uri()));

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(415).set_body_string("unsupported file"))
        .mount(&mock_server)
        .await;

    let err = client.upload(pending("notes.txt", b"hello")).await.unwrap_err();

    match &err {
        UploadError::ApiError { status, message } => {
            assert_eq!(*status, 415);
            assert_eq!(message, "unsupported file");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "Network response was not ok");
}

#[tokio::test]
async fn test_upload_connection_refused() {
    // Nothing listens on the discard port
    let client = UploadClient::new("http://127.0.0.1:9/api/upload".to_string());

    let err = client.upload(pending("a.txt", b"a")).await.unwrap_err();

    assert!(matches!(err, UploadError::HttpError(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_upload_empty_success_body() {
    let mock_server = MockServer::start().await;
    let client = UploadClient::new(mock_server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let artifact = client.upload(pending("empty.xlsx", b"")).await.unwrap();
    assert!(artifact.is_empty());
}

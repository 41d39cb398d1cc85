use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use std::time::Duration;

use crate::models::internal::{Artifact, PendingFile};

/// Reason shown when the endpoint answers with a non-success status.
pub const REJECTED_REASON: &str = "Network response was not ok";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),
    #[error("{}", REJECTED_REASON)]
    ApiError { status: u16, message: String },
    #[error("{0}")]
    ReadError(#[from] std::io::Error),
}

/// Sends one file to the import endpoint and returns what it converted.
#[async_trait]
pub trait ArtifactUploader: Send + Sync {
    async fn upload(&self, file: PendingFile) -> Result<Artifact, UploadError>;
}

#[derive(Clone)]
pub struct UploadClient {
    client: reqwest::Client,
    upload_url: String,
}

impl UploadClient {
    pub fn new(upload_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
        }
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(upload_url: String, timeout: Duration) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, upload_url })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl ArtifactUploader for UploadClient {
    async fn upload(&self, file: PendingFile) -> Result<Artifact, UploadError> {
        let response = self
            .client
            .post(&self.upload_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_DISPOSITION, content_disposition(&file.name))
            .body(file.raw_bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UploadError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.bytes().await?;
        Ok(Artifact(body.to_vec()))
    }
}

/// `attachment; filename="..."` with quotes and backslashes escaped.
pub fn content_disposition(file_name: &str) -> String {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}

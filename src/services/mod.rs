pub mod upload_client;

// Re-export for convenience
pub use upload_client::{ArtifactUploader, UploadClient, UploadError};

//! Workbook Import - drag-and-drop upload workflow for the spreadsheet front end

pub mod config;
pub mod host;
pub mod import;
pub mod models;
pub mod services;
pub mod switcher;

// Re-export main types for convenience
pub use crate::config::Config;
pub use crate::import::{DragEvent, ImportController, ImportHandle, SessionSnapshot};
pub use crate::models::internal::{Artifact, DocumentId, DocumentRef, FileHandle};
pub use crate::services::upload_client::{ArtifactUploader, UploadClient, UploadError};
pub use crate::switcher::{DocumentHost, DocumentSwitcher, MenuEntry, SwitcherAction};

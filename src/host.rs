//! Directory-backed host: existing `.xlsx` files are the document list and
//! imported workbooks are saved next to them.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::models::internal::{Artifact, DocumentId, DocumentRef};
use crate::switcher::DocumentHost;

const WORKBOOK_EXTENSION: &str = "xlsx";

pub struct WorkbookFolder {
    dir: PathBuf,
    next_index: usize,
    saved: Vec<PathBuf>,
}

impl WorkbookFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_index: 1,
            saved: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written by this host, in the order they were saved.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Workbooks already in the folder, sorted by label.
    pub fn documents(&self) -> io::Result<Vec<DocumentRef>> {
        let mut docs = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == WORKBOOK_EXTENSION) {
                let id = path.file_name().unwrap_or_default().to_string_lossy().into_owned();
                let label = path.file_stem().unwrap_or_default().to_string_lossy().into_owned();
                docs.push(DocumentRef::new(id, label));
            }
        }
        docs.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(docs)
    }

    /// Writes `bytes` to the first `imported-{n}.xlsx` that does not exist yet.
    pub fn save(&mut self, bytes: &[u8]) -> io::Result<PathBuf> {
        loop {
            let path = self
                .dir
                .join(format!("imported-{}.{}", self.next_index, WORKBOOK_EXTENSION));
            self.next_index += 1;

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)?;
                    self.saved.push(path.clone());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl DocumentHost for WorkbookFolder {
    fn create_new(&mut self) {
        info!("New document requested");
    }

    fn switch_to(&mut self, id: &DocumentId) {
        info!(document = %id, "Switch requested");
    }

    fn artifact_imported(&mut self, artifact: Artifact) {
        match self.save(artifact.as_bytes()) {
            Ok(path) => info!(path = %path.display(), bytes = artifact.len(), "Workbook saved"),
            Err(e) => error!(dir = %self.dir.display(), error = %e, "Failed to save workbook"),
        }
    }

    fn download(&mut self) {
        info!("Download requested");
    }
}

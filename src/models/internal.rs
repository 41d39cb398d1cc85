use std::fmt;
use std::path::PathBuf;

/// Opaque identifier of a stored document (the host decides the format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One existing document as listed in the file menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: DocumentId,
    pub label: String,
}

impl DocumentRef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: DocumentId(id.into()),
            label: label.into(),
        }
    }
}

/// A file as it enters the import surface, before its bytes are read.
#[derive(Debug, Clone)]
pub enum FileHandle {
    /// File on the local filesystem (picker or CLI)
    Path(PathBuf),
    /// Contents already in memory (drop payloads, tests)
    Memory { name: String, bytes: Vec<u8> },
}

impl FileHandle {
    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        FileHandle::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Display name used in status messages and the upload metadata.
    pub fn name(&self) -> String {
        match self {
            FileHandle::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            FileHandle::Memory { name, .. } => name.clone(),
        }
    }

    /// Reads the whole file into memory.
    pub async fn read(self) -> std::io::Result<PendingFile> {
        let name = self.name();
        let raw_bytes = match self {
            FileHandle::Path(path) => tokio::fs::read(&path).await?,
            FileHandle::Memory { bytes, .. } => bytes,
        };
        Ok(PendingFile { name, raw_bytes })
    }
}

/// A file whose contents are loaded and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub raw_bytes: Vec<u8>,
}

/// Binary payload returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact(pub Vec<u8>);

impl Artifact {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Kind reported by a drag payload entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    String,
}

/// One entry of a drop payload's item list.
#[derive(Debug, Clone)]
pub struct DataTransferItem {
    pub kind: ItemKind,
    /// `None` when the item is not a file, or the file could not be resolved
    pub file: Option<FileHandle>,
}

impl DataTransferItem {
    pub fn file(handle: FileHandle) -> Self {
        Self {
            kind: ItemKind::File,
            file: Some(handle),
        }
    }

    pub fn text() -> Self {
        Self {
            kind: ItemKind::String,
            file: None,
        }
    }
}

/// What a drop event carries.
#[derive(Debug, Clone)]
pub enum DropPayload {
    /// Item list; non-file entries are skipped
    Items(Vec<DataTransferItem>),
    /// Plain file list from environments without an item list
    Files(Vec<FileHandle>),
}

impl DropPayload {
    /// Files that should be uploaded, in payload order.
    pub fn into_files(self) -> Vec<FileHandle> {
        match self {
            DropPayload::Items(items) => items
                .into_iter()
                .filter(|item| item.kind == ItemKind::File)
                .filter_map(|item| item.file)
                .collect(),
            DropPayload::Files(files) => files,
        }
    }
}

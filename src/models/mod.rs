pub mod internal;

pub use internal::{
    Artifact, DataTransferItem, DocumentId, DocumentRef, DropPayload, FileHandle, ItemKind,
    PendingFile,
};

//! File menu: existing documents plus New / Import / Download entries.

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::import::ImportController;
use crate::models::internal::{Artifact, DocumentId, DocumentRef};

const SELECTED_MARKER: &str = "•";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwitcherError {
    #[error("Duplicate document id: {0}")]
    DuplicateId(DocumentId),
    #[error("Selected document not in list: {0}")]
    UnknownSelection(DocumentId),
    #[error("Document not found: {0}")]
    NotFound(DocumentId),
}

/// Callbacks the host application provides to the file menu.
pub trait DocumentHost {
    fn create_new(&mut self);
    fn switch_to(&mut self, id: &DocumentId);
    /// Parses the uploaded payload into a newly loaded document.
    fn artifact_imported(&mut self, artifact: Artifact);
    fn download(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    New,
    Import,
    Download,
    Document(DocumentId),
}

/// The action a menu selection resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitcherAction {
    CreateNew,
    Import,
    Download,
    SwitchTo(DocumentId),
}

#[derive(Debug)]
pub struct DocumentSwitcher {
    documents: Vec<DocumentRef>,
    selected: Option<DocumentId>,
    menu_open: bool,
}

impl DocumentSwitcher {
    pub fn new(
        documents: Vec<DocumentRef>,
        selected: Option<DocumentId>,
    ) -> Result<Self, SwitcherError> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if !seen.insert(&doc.id) {
                return Err(SwitcherError::DuplicateId(doc.id.clone()));
            }
        }
        if let Some(ref id) = selected {
            if !seen.contains(id) {
                return Err(SwitcherError::UnknownSelection(id.clone()));
            }
        }

        Ok(Self {
            documents,
            selected,
            menu_open: false,
        })
    }

    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    pub fn selected(&self) -> Option<&DocumentId> {
        self.selected.as_ref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Document rows as `(marker, label)`; the selected one is marked.
    pub fn document_rows(&self) -> Vec<(&'static str, &str)> {
        self.documents
            .iter()
            .map(|doc| {
                let marker = if self.selected.as_ref() == Some(&doc.id) {
                    SELECTED_MARKER
                } else {
                    ""
                };
                (marker, doc.label.as_str())
            })
            .collect()
    }

    /// Resolves a menu click. Choosing Import opens the import surface.
    pub fn choose(
        &mut self,
        entry: MenuEntry,
        importer: &mut ImportController,
    ) -> Result<SwitcherAction, SwitcherError> {
        let action = match entry {
            MenuEntry::New => SwitcherAction::CreateNew,
            MenuEntry::Download => SwitcherAction::Download,
            MenuEntry::Import => {
                importer.open();
                SwitcherAction::Import
            }
            MenuEntry::Document(id) => {
                if !self.documents.iter().any(|d| d.id == id) {
                    return Err(SwitcherError::NotFound(id));
                }
                self.selected = Some(id.clone());
                SwitcherAction::SwitchTo(id)
            }
        };

        debug!(?action, "File menu selection");
        self.close_menu();
        Ok(action)
    }

    /// Forwards a resolved action to the host.
    pub fn dispatch(action: &SwitcherAction, host: &mut dyn DocumentHost) {
        match action {
            SwitcherAction::CreateNew => host.create_new(),
            SwitcherAction::SwitchTo(id) => host.switch_to(id),
            SwitcherAction::Download => host.download(),
            SwitcherAction::Import => {}
        }
    }
}

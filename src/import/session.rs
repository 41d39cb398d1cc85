use uuid::Uuid;

use super::drag::DragMachine;

pub const INITIAL_PROMPT: &str = "Drop file here";
pub const BROWSE_PROMPT: &str = "Drag and drop a file here or click to browse";
pub const DIALOG_TITLE: &str = "Import a .xlsx File";

pub fn uploading_message(name: &str) -> String {
    format!("Uploading {}...", name)
}

pub fn uploaded_message(name: &str) -> String {
    format!("File {} uploaded successfully!", name)
}

pub fn failed_message(reason: &str) -> String {
    format!("Error uploading file: {}", reason)
}

/// State of one open-to-close cycle of the import surface.
#[derive(Debug)]
pub struct ImportSession {
    pub id: Uuid,
    pub generation: u64,
    drag: DragMachine,
    status_message: String,
}

impl ImportSession {
    pub fn new(generation: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation,
            drag: DragMachine::new(),
            status_message: INITIAL_PROMPT.to_string(),
        }
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag.is_active()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Back to the initial prompt with no drag in progress; id and
    /// generation are kept.
    pub fn reset(&mut self) {
        self.drag.reset();
        self.status_message = INITIAL_PROMPT.to_string();
    }

    pub(crate) fn set_status(&mut self, message: String) {
        self.status_message = message;
    }

    pub(crate) fn drag_mut(&mut self) -> &mut DragMachine {
        &mut self.drag
    }

    /// Text shown inside the drop zone.
    pub fn drop_zone_label(&self) -> &'static str {
        if self.is_drag_active() {
            INITIAL_PROMPT
        } else {
            BROWSE_PROMPT
        }
    }
}

//! Drag lifecycle of the drop zone.

use crate::models::internal::{DropPayload, FileHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DragOver,
}

/// Raw drag events forwarded by the presentation layer.
#[derive(Debug, Clone)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Exit,
    Drop(DropPayload),
}

impl DragEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DragEvent::Enter => "dragenter",
            DragEvent::Over => "dragover",
            DragEvent::Leave => "dragleave",
            DragEvent::Exit => "dragexit",
            DragEvent::Drop(_) => "drop",
        }
    }
}

/// Drop effect advertised to the browser during `dragover`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Copy,
}

/// How the presentation layer must treat the native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub drop_effect: Option<DropEffect>,
}

impl DragResponse {
    fn handled() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
            drop_effect: None,
        }
    }

    /// Response for events that arrive while the surface is hidden.
    pub fn ignored() -> Self {
        Self::default()
    }
}

/// Result of feeding one event to the machine.
#[derive(Debug)]
pub struct Transition {
    pub response: DragResponse,
    /// Files to hand to the upload routine (only non-empty on drop)
    pub files: Vec<FileHandle>,
}

#[derive(Debug, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == DragState::DragOver
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn handle(&mut self, event: DragEvent) -> Transition {
        let mut response = DragResponse::handled();
        let files = match event {
            DragEvent::Enter => {
                self.state = DragState::DragOver;
                Vec::new()
            }
            DragEvent::Over => {
                // keeps the drop target live; state untouched
                response.drop_effect = Some(DropEffect::Copy);
                Vec::new()
            }
            DragEvent::Leave | DragEvent::Exit => {
                self.state = DragState::Idle;
                Vec::new()
            }
            DragEvent::Drop(payload) => {
                self.state = DragState::Idle;
                payload.into_files()
            }
        };

        Transition { response, files }
    }
}

pub mod controller;
pub mod drag;
pub mod event_loop;
pub mod session;

pub use controller::{ArtifactHandler, ImportController};
pub use drag::{DragEvent, DragResponse, DragState, DropEffect};
pub use event_loop::{ImportHandle, LoopStopped, SessionSnapshot};
pub use session::ImportSession;

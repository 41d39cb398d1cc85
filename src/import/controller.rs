//! Import orchestration: drag events and file picks in, uploads out,
//! one status line and an artifact callback back to the host.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use super::drag::{DragEvent, DragResponse};
use super::session::{self, ImportSession};
use crate::models::internal::{Artifact, FileHandle};
use crate::services::upload_client::{ArtifactUploader, UploadError};

/// Receives each artifact returned by a successful upload.
pub type ArtifactHandler = Box<dyn FnMut(Artifact) + Send>;

const STATUS_CHANNEL_CAPACITY: usize = 64;

const NO_RUNTIME_REASON: &str = "no async runtime available";

/// Posted by an upload task once its read and request have finished.
#[derive(Debug)]
pub(crate) struct UploadCompletion {
    generation: u64,
    file_name: String,
    outcome: Result<Artifact, UploadError>,
}

/// Upload tasks run on the runtime captured by [`ImportController::new`]
/// (or set with [`ImportController::with_runtime`]). Without one, files
/// entered fail with an error status instead of being uploaded.
pub struct ImportController {
    runtime: Option<Handle>,
    uploader: Arc<dyn ArtifactUploader>,
    on_artifact: ArtifactHandler,
    session: Option<ImportSession>,
    generation: u64,
    in_flight: usize,
    completions_tx: mpsc::UnboundedSender<UploadCompletion>,
    pub(crate) completions_rx: mpsc::UnboundedReceiver<UploadCompletion>,
    status_tx: broadcast::Sender<String>,
}

impl ImportController {
    pub fn new(uploader: Arc<dyn ArtifactUploader>, on_artifact: ArtifactHandler) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (status_tx, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);

        Self {
            runtime: Handle::try_current().ok(),
            uploader,
            on_artifact,
            session: None,
            generation: 0,
            in_flight: 0,
            completions_tx,
            completions_rx,
            status_tx,
        }
    }

    /// Runtime that upload tasks are spawned on.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Shows the import surface. An already open session is reset in place
    /// and keeps receiving the uploads it issued.
    pub fn open(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset();
            info!(
                session_id = %session.id,
                generation = session.generation,
                "Import surface reopened"
            );
            self.publish_status();
            return;
        }

        self.generation += 1;
        let session = ImportSession::new(self.generation);
        info!(
            session_id = %session.id,
            generation = self.generation,
            "Import surface opened"
        );
        self.session = Some(session);
        self.publish_status();
    }

    /// Hides the surface. Uploads already issued keep running, but their
    /// completions no longer touch any session.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                session_id = %session.id,
                outstanding = self.in_flight,
                "Import surface closed"
            );
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ImportSession> {
        self.session.as_ref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.status_message())
    }

    pub fn is_drag_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_drag_active())
    }

    pub fn title(&self) -> &'static str {
        session::DIALOG_TITLE
    }

    /// Number of uploads issued whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Every status change of every session, in the order it was applied.
    pub fn subscribe_status(&self) -> broadcast::Receiver<String> {
        self.status_tx.subscribe()
    }

    pub fn handle_drag(&mut self, event: DragEvent) -> DragResponse {
        let Some(session) = self.session.as_mut() else {
            debug!(event = event.name(), "Drag event while import surface is closed");
            return DragResponse::ignored();
        };

        debug!(session_id = %session.id, event = event.name(), "Drag event");
        let transition = session.drag_mut().handle(event);
        if !transition.files.is_empty() {
            self.on_files_entered(transition.files);
        }
        transition.response
    }

    /// Starts one independent upload per file.
    pub fn on_files_entered(&mut self, files: Vec<FileHandle>) {
        let Some(session) = self.session.as_mut() else {
            warn!(count = files.len(), "Files entered while import surface is closed");
            return;
        };
        let generation = session.generation;

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(count = files.len(), "No async runtime to run uploads on");
            session.set_status(session::failed_message(NO_RUNTIME_REASON));
            let _ = self.status_tx.send(session.status_message().to_string());
            return;
        };

        for file in files {
            let file_name = file.name();
            info!(session_id = %session.id, file = %file_name, "Upload started");
            session.set_status(session::uploading_message(&file_name));
            let _ = self.status_tx.send(session.status_message().to_string());

            self.in_flight += 1;
            let uploader = self.uploader.clone();
            let completions = self.completions_tx.clone();
            runtime.spawn(async move {
                let outcome = match file.read().await {
                    Ok(pending) => uploader.upload(pending).await,
                    Err(e) => Err(UploadError::ReadError(e)),
                };
                let completion = UploadCompletion {
                    generation,
                    file_name,
                    outcome,
                };
                if completions.send(completion).is_err() {
                    debug!("Import controller dropped before upload finished");
                }
            });
        }
    }

    /// Waits for the next finished upload and applies it. Returns `false`
    /// when nothing is outstanding.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Applies completions until every issued upload has finished.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    pub(crate) fn apply_completion(&mut self, completion: UploadCompletion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let session = match self.session.as_mut() {
            Some(session) if session.generation == completion.generation => session,
            _ => {
                debug!(
                    file = %completion.file_name,
                    generation = completion.generation,
                    "Ignoring upload that finished after its session closed"
                );
                return;
            }
        };

        match completion.outcome {
            Ok(artifact) => {
                info!(
                    session_id = %session.id,
                    file = %completion.file_name,
                    bytes = artifact.len(),
                    "Upload succeeded"
                );
                session.set_status(session::uploaded_message(&completion.file_name));
                self.publish_status();
                (self.on_artifact)(artifact);
            }
            Err(e) => {
                warn!(
                    session_id = %session.id,
                    file = %completion.file_name,
                    error = %e,
                    "Upload failed"
                );
                session.set_status(session::failed_message(&e.to_string()));
                self.publish_status();
            }
        }
    }

    fn publish_status(&self) {
        if let Some(message) = self.status_message() {
            // no subscribers is fine
            let _ = self.status_tx.send(message.to_string());
        }
    }
}

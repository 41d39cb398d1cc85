//! Task that owns an [`ImportController`] and serializes host commands with
//! upload completions, so views only ever hold an [`ImportHandle`].

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use super::controller::{ImportController, UploadCompletion};
use super::drag::{DragEvent, DragResponse};
use crate::models::internal::FileHandle;

const COMMAND_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, thiserror::Error)]
#[error("import event loop has stopped")]
pub struct LoopStopped;

/// What a view needs to render the import dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub title: &'static str,
    pub is_drag_active: bool,
    pub status_message: String,
    pub drop_zone_label: &'static str,
    pub uploads_in_flight: usize,
}

enum ImportCommand {
    Open,
    Close,
    Drag(DragEvent, oneshot::Sender<DragResponse>),
    FilesEntered(Vec<FileHandle>),
    Snapshot(oneshot::Sender<Option<SessionSnapshot>>),
}

enum Step {
    Command(Option<ImportCommand>),
    Completion(UploadCompletion),
}

#[derive(Clone)]
pub struct ImportHandle {
    commands: mpsc::Sender<ImportCommand>,
}

impl ImportHandle {
    pub async fn open(&self) -> Result<(), LoopStopped> {
        self.send(ImportCommand::Open).await
    }

    pub async fn close(&self) -> Result<(), LoopStopped> {
        self.send(ImportCommand::Close).await
    }

    pub async fn drag(&self, event: DragEvent) -> Result<DragResponse, LoopStopped> {
        let (tx, rx) = oneshot::channel();
        self.send(ImportCommand::Drag(event, tx)).await?;
        rx.await.map_err(|_| LoopStopped)
    }

    pub async fn files_entered(&self, files: Vec<FileHandle>) -> Result<(), LoopStopped> {
        self.send(ImportCommand::FilesEntered(files)).await
    }

    /// Current dialog state, or `None` while the surface is closed.
    pub async fn snapshot(&self) -> Result<Option<SessionSnapshot>, LoopStopped> {
        let (tx, rx) = oneshot::channel();
        self.send(ImportCommand::Snapshot(tx)).await?;
        rx.await.map_err(|_| LoopStopped)
    }

    async fn send(&self, command: ImportCommand) -> Result<(), LoopStopped> {
        self.commands.send(command).await.map_err(|_| LoopStopped)
    }
}

impl ImportController {
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session().map(|s| SessionSnapshot {
            title: self.title(),
            is_drag_active: s.is_drag_active(),
            status_message: s.status_message().to_string(),
            drop_zone_label: s.drop_zone_label(),
            uploads_in_flight: self.in_flight(),
        })
    }

    /// Moves the controller onto its own task. The task stops once every
    /// handle is dropped, after applying the uploads still outstanding.
    pub fn spawn(mut self) -> (ImportHandle, JoinHandle<()>) {
        let (commands_tx, mut commands_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let task = tokio::spawn(async move {
            loop {
                let step = tokio::select! {
                    command = commands_rx.recv() => Step::Command(command),
                    Some(completion) = self.completions_rx.recv() => Step::Completion(completion),
                };

                match step {
                    Step::Completion(completion) => self.apply_completion(completion),
                    Step::Command(Some(command)) => self.execute(command),
                    Step::Command(None) => break,
                }
            }

            debug!(outstanding = self.in_flight(), "Import handles dropped, settling");
            self.settle().await;
        });

        (
            ImportHandle {
                commands: commands_tx,
            },
            task,
        )
    }

    fn execute(&mut self, command: ImportCommand) {
        match command {
            ImportCommand::Open => self.open(),
            ImportCommand::Close => self.close(),
            ImportCommand::Drag(event, reply) => {
                let response = self.handle_drag(event);
                let _ = reply.send(response);
            }
            ImportCommand::FilesEntered(files) => self.on_files_entered(files),
            ImportCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }
}

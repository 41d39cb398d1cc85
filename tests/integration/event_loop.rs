// tests/integration/event_loop.rs
use super::MockUploader;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use workbook_import::import::{DragEvent, ImportController};
use workbook_import::models::internal::{Artifact, DataTransferItem, DropPayload, FileHandle};

fn spawn_loop(
    uploader: MockUploader,
) -> (
    workbook_import::ImportHandle,
    tokio::task::JoinHandle<()>,
    mpsc::UnboundedReceiver<Artifact>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = ImportController::new(
        Arc::new(uploader),
        Box::new(move |artifact| {
            let _ = tx.send(artifact);
        }),
    );
    let (handle, task) = controller.spawn();
    (handle, task, rx)
}

#[tokio::test]
async fn test_handle_drives_drop_to_artifact() {
    let mut uploader = MockUploader::new();
    uploader
        .expect_upload()
        .times(1)
        .returning(|file| Ok(Artifact(file.raw_bytes)));

    let (handle, task, mut artifacts) = spawn_loop(uploader);

    assert_eq!(handle.snapshot().await.unwrap(), None);
    handle.open().await.unwrap();

    let response = handle.drag(DragEvent::Enter).await.unwrap();
    assert!(response.prevent_default);

    let snapshot = handle.snapshot().await.unwrap().unwrap();
    assert!(snapshot.is_drag_active);
    assert_eq!(snapshot.drop_zone_label, "Drop file here");
    assert_eq!(snapshot.title, "Import a .xlsx File");

    handle
        .drag(DragEvent::Drop(DropPayload::Items(vec![
            DataTransferItem::text(),
            DataTransferItem::file(FileHandle::in_memory("report.xlsx", b"xl".to_vec())),
        ])))
        .await
        .unwrap();

    let artifact = tokio::time::timeout(Duration::from_secs(5), artifacts.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(artifact.as_bytes(), b"xl");

    let snapshot = handle.snapshot().await.unwrap().unwrap();
    assert!(!snapshot.is_drag_active);
    assert_eq!(snapshot.status_message, "File report.xlsx uploaded successfully!");
    assert_eq!(snapshot.uploads_in_flight, 0);
    assert_eq!(
        snapshot.drop_zone_label,
        "Drag and drop a file here or click to browse"
    );

    drop(handle);
    task.await.unwrap();
}

#[tokio::test]
async fn test_handle_pick_and_close() {
    let mut uploader = MockUploader::new();
    uploader
        .expect_upload()
        .times(2)
        .returning(|file| Ok(Artifact(file.raw_bytes)));

    let (handle, task, mut artifacts) = spawn_loop(uploader);
    handle.open().await.unwrap();
    handle
        .files_entered(vec![
            FileHandle::in_memory("a.txt", b"a".to_vec()),
            FileHandle::in_memory("b.txt", b"b".to_vec()),
        ])
        .await
        .unwrap();

    let mut received = Vec::new();
    for _ in 0..2 {
        let artifact = tokio::time::timeout(Duration::from_secs(5), artifacts.recv())
            .await
            .unwrap()
            .unwrap();
        received.push(artifact.into_bytes());
    }
    received.sort();
    assert_eq!(received, vec![b"a".to_vec(), b"b".to_vec()]);

    handle.close().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap(), None);

    drop(handle);
    task.await.unwrap();
}

#[tokio::test]
async fn test_handle_fails_after_loop_stops() {
    let (handle, task, _artifacts) = spawn_loop(MockUploader::new());
    let spare = handle.clone();
    task.abort();
    let _ = task.await;

    assert!(spare.open().await.is_err());
    drop(handle);
}

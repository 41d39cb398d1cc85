use workbook_import::import::session::{
    failed_message, uploaded_message, uploading_message, ImportSession, BROWSE_PROMPT,
    INITIAL_PROMPT,
};

#[test]
fn test_new_session_defaults() {
    let session = ImportSession::new(1);
    assert_eq!(session.status_message(), "Drop file here");
    assert!(!session.is_drag_active());
    assert_eq!(session.generation, 1);
}

#[test]
fn test_sessions_get_distinct_ids() {
    let a = ImportSession::new(1);
    let b = ImportSession::new(2);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_drop_zone_label_when_idle() {
    let session = ImportSession::new(1);
    assert_eq!(session.drop_zone_label(), BROWSE_PROMPT);
}

#[test]
fn test_status_formats() {
    assert_eq!(INITIAL_PROMPT, "Drop file here");
    assert_eq!(uploading_message("report.xlsx"), "Uploading report.xlsx...");
    assert_eq!(
        uploaded_message("report.xlsx"),
        "File report.xlsx uploaded successfully!"
    );
    assert_eq!(failed_message("timeout"), "Error uploading file: timeout");
}

#[test]
fn test_reset_keeps_identity() {
    let mut session = ImportSession::new(3);
    let id = session.id;

    session.reset();

    assert_eq!(session.id, id);
    assert_eq!(session.generation, 3);
    assert_eq!(session.status_message(), INITIAL_PROMPT);
    assert!(!session.is_drag_active());
}

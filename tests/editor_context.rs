use std::sync::Arc;

use parking_lot::Mutex;
use proof_studio::action::{AssetPicker, ExportRenderer, HistoryManager, PersistenceService};
use proof_studio::error::ActionResult;
use proof_studio::{
    Action, ActionDispatcher, ActionError, ActionOutcome, Command, Document, EditorContext, EditorError,
    EditorEvent, ImageAssetRef, LayerEvent, LayerId, LayerUpdate, SelectionEvent, ToolKind,
};

type Recorded<T> = Arc<Mutex<Vec<T>>>;

/// Editor over the seeded proof, with every event and message recorded
fn recording_editor() -> (EditorContext, Recorded<EditorEvent>, Recorded<String>) {
    recording_editor_with(ActionDispatcher::new())
}

fn recording_editor_with(
    dispatcher: ActionDispatcher,
) -> (EditorContext, Recorded<EditorEvent>, Recorded<String>) {
    let events: Recorded<EditorEvent> = Arc::default();
    let messages: Recorded<String> = Arc::default();

    let sink = messages.clone();
    let editor = EditorContext::new(Document::seeded())
        .with_dispatcher(dispatcher)
        .with_notifier(move |message: &str| sink.lock().push(message.to_string()));

    let recorder = events.clone();
    editor.subscribe(move |event: &EditorEvent| recorder.lock().push(event.clone()));

    (editor, events, messages)
}

fn id(raw: &str) -> LayerId {
    LayerId::new(raw)
}

#[test]
fn test_select_notifies_with_layer_name() {
    let (mut editor, events, messages) = recording_editor();

    editor.select(&id("design-1")).unwrap();

    assert_eq!(messages.lock().as_slice(), &["Selected Front Logo".to_string()]);
    assert_eq!(
        events.lock().as_slice(),
        &[EditorEvent::SelectionChanged(SelectionEvent::Selected {
            previous: Some(id("background-1")),
            current: id("design-1"),
        })]
    );
}

#[test]
fn test_invalid_selection_is_reported_and_ignored() {
    let (mut editor, events, messages) = recording_editor();

    let err = editor.select(&id("nonexistent-id")).unwrap_err();

    assert_eq!(err, EditorError::InvalidSelection(id("nonexistent-id")));
    assert_eq!(editor.document().selection().active_id(), Some(&id("background-1")));
    assert!(events.lock().is_empty());
    assert!(messages.lock().is_empty());
}

#[test]
fn test_deleting_active_layer_never_exposes_dangling_selection() {
    let (mut editor, _events, messages) = recording_editor();

    let seen: Recorded<Option<LayerId>> = Arc::default();
    let seen_by_handler = seen.clone();
    editor.subscribe(move |event: &EditorEvent| {
        if let EditorEvent::SelectionChanged(SelectionEvent::Cleared { previous }) = event {
            seen_by_handler.lock().push(Some(previous.clone()));
        }
    });
    let deleted = editor.delete(&id("background-1")).unwrap();

    assert!(deleted.was_active);
    assert!(editor.document().selection().active_id().is_none());
    let remaining: Vec<&str> = editor.document().layers().iter().map(|l| l.id().as_str()).collect();
    assert_eq!(remaining, vec!["product-1", "design-1"]);
    assert_eq!(seen.lock().as_slice(), &[Some(id("background-1"))]);
    assert_eq!(messages.lock().as_slice(), &["Deleted Business Background".to_string()]);
}

#[test]
fn test_layer_events_carry_document_version() {
    let (mut editor, events, _messages) = recording_editor();

    editor.toggle_lock(&id("product-1")).unwrap();
    editor.toggle_visibility(&id("product-1")).unwrap();

    let events = events.lock();
    assert_eq!(
        events.as_slice(),
        &[
            EditorEvent::LayerChanged {
                version: 1,
                change: LayerEvent::LockChanged {
                    id: id("product-1"),
                    locked: true,
                },
            },
            EditorEvent::LayerChanged {
                version: 2,
                change: LayerEvent::VisibilityChanged {
                    id: id("product-1"),
                    visible: false,
                },
            },
        ]
    );
}

#[test]
fn test_set_tool_notifies_and_emits() {
    let (mut editor, events, messages) = recording_editor();
    assert_eq!(editor.current_tool(), ToolKind::Select);

    let previous = editor.set_tool(ToolKind::Rectangle);

    assert_eq!(previous, ToolKind::Select);
    assert_eq!(editor.current_tool(), ToolKind::Rectangle);
    assert_eq!(messages.lock().as_slice(), &["Switched to rectangle tool".to_string()]);
    assert_eq!(
        events.lock().as_slice(),
        &[EditorEvent::ToolChanged {
            old: ToolKind::Select,
            new: ToolKind::Rectangle,
        }]
    );
}

#[test]
fn test_tool_ids_round_trip_through_toolbar_names() {
    for tool in ToolKind::ALL {
        assert_eq!(ToolKind::from_id(tool.id()), Some(tool));
    }
    assert_eq!(ToolKind::from_id("lasso"), None);
}

#[test]
fn test_unconnected_actions_only_notify() {
    let (mut editor, events, messages) = recording_editor();
    let before = editor.snapshot();

    assert_eq!(editor.dispatch(Action::Save).unwrap(), ActionOutcome::Saved);
    assert_eq!(editor.dispatch(Action::Export).unwrap(), ActionOutcome::Exported);
    assert_eq!(editor.dispatch(Action::Share).unwrap(), ActionOutcome::Shared { link: None });
    assert_eq!(
        editor.dispatch(Action::Undo).unwrap(),
        ActionOutcome::HistoryStepped { applied: false }
    );
    assert_eq!(
        editor.dispatch(Action::Redo).unwrap(),
        ActionOutcome::HistoryStepped { applied: false }
    );
    assert_eq!(editor.dispatch(Action::Upload(None)).unwrap(), ActionOutcome::AwaitingAsset);

    assert_eq!(editor.document(), &before);
    assert_eq!(
        messages.lock().as_slice(),
        &[
            "Project saved successfully!".to_string(),
            "Exporting proof...".to_string(),
            "Generating share link...".to_string(),
            "Undoing last action...".to_string(),
            "Redoing action...".to_string(),
            "Opening file browser...".to_string(),
        ]
    );
    assert_eq!(events.lock().len(), 6);
}

#[test]
fn test_zoom_actions_change_view() {
    let (mut editor, events, messages) = recording_editor();

    editor.dispatch(Action::ZoomIn).unwrap();
    editor.dispatch(Action::ZoomIn).unwrap();
    assert!((editor.view().zoom() - 1.5625).abs() < 1e-6);

    editor.dispatch(Action::ZoomOut).unwrap();
    assert!((editor.view().zoom() - 1.25).abs() < 1e-6);

    assert_eq!(
        editor.dispatch(Action::ResetView).unwrap(),
        ActionOutcome::ViewChanged { zoom: 1.0 }
    );
    assert!(events.lock().contains(&EditorEvent::ViewChanged { zoom: 1.0 }));
    assert_eq!(messages.lock().last().unwrap(), "Resetting view...");
}

#[test]
fn test_action_ids_match_toolbar() {
    let ids = ["save", "download", "share", "upload", "undo", "redo", "zoom-in", "zoom-out", "reset"];
    for raw in ids {
        let action = Action::from_id(raw).unwrap();
        assert_eq!(action.id(), raw);
    }
    assert_eq!(Action::from_id("export"), Some(Action::Export));
    assert_eq!(Action::from_id("print"), None);
}

#[test]
fn test_upload_with_asset_sets_active_layer_image() {
    let (mut editor, events, _messages) = recording_editor();
    editor.select(&id("product-1")).unwrap();

    let asset = ImageAssetRef::new("/photos/mug.png");
    let outcome = editor.dispatch(Action::Upload(Some(asset.clone()))).unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::ImageSet {
            layer: id("product-1"),
            image: asset.clone(),
        }
    );
    assert_eq!(editor.document().layer(&id("product-1")).unwrap().image(), Some(&asset));
    assert!(events.lock().iter().any(|event| matches!(
        event,
        EditorEvent::LayerChanged {
            change: LayerEvent::Updated { .. },
            ..
        }
    )));
}

#[test]
fn test_upload_without_selection_fails() {
    let (mut editor, _events, messages) = recording_editor();
    editor.clear_selection();

    let err = editor
        .dispatch(Action::Upload(Some(ImageAssetRef::new("logo.png"))))
        .unwrap_err();

    assert!(matches!(err, ActionError::NoActiveLayer));
    assert_eq!(
        messages.lock().as_slice(),
        &[
            "Opening file browser...".to_string(),
            "Upload failed: No layer is selected".to_string(),
        ]
    );
}

struct FixedPicker(&'static str);

impl AssetPicker for FixedPicker {
    fn pick(&mut self) -> ActionResult<Option<ImageAssetRef>> {
        Ok(Some(ImageAssetRef::new(self.0)))
    }
}

struct OfflineStore;

impl PersistenceService for OfflineStore {
    fn save(&mut self, _document: &Document) -> ActionResult<()> {
        Err(ActionError::Unavailable("persistence"))
    }

    fn share(&mut self, _document: &Document) -> ActionResult<Option<String>> {
        Ok(Some("https://proofs.example/abc".to_string()))
    }
}

struct JammedPrinter;

impl ExportRenderer for JammedPrinter {
    fn export(&mut self, _document: &Document) -> ActionResult<()> {
        Err(ActionError::Failed("printer jammed".to_string()))
    }
}

/// Undo only knows how to restore opacity on the background layer
#[derive(Default)]
struct OpacityHistory;

impl HistoryManager for OpacityHistory {
    fn undo(&mut self, document: &mut Document) -> ActionResult<bool> {
        document.update_fields(&LayerId::new("background-1"), &LayerUpdate::new().opacity(100))?;
        Ok(true)
    }

    fn redo(&mut self, _document: &mut Document) -> ActionResult<bool> {
        Ok(false)
    }
}

#[test]
fn test_connected_collaborators_are_used() {
    let dispatcher = ActionDispatcher::new()
        .with_picker(FixedPicker("/art/logo.svg"))
        .with_persistence(OfflineStore)
        .with_export(JammedPrinter)
        .with_history(OpacityHistory);
    let (mut editor, _events, messages) = recording_editor_with(dispatcher);

    let outcome = editor.dispatch(Action::Upload(None)).unwrap();
    assert!(matches!(outcome, ActionOutcome::ImageSet { .. }));
    assert_eq!(
        editor.document().active_layer().unwrap().image().unwrap().display_name(),
        "logo.svg"
    );

    assert!(matches!(editor.dispatch(Action::Save), Err(ActionError::Unavailable("persistence"))));
    assert!(messages.lock().iter().any(|m| m.starts_with("Save failed")));

    assert!(editor.dispatch(Action::Export).is_err());
    assert_eq!(
        messages.lock().last().unwrap(),
        "Export failed: Action failed: printer jammed"
    );

    editor.dispatch(Action::Share).unwrap();
    assert_eq!(messages.lock().last().unwrap(), "Share link: https://proofs.example/abc");

    editor
        .update_fields(&id("background-1"), LayerUpdate::new().opacity(20))
        .unwrap();
    assert_eq!(
        editor.dispatch(Action::Undo).unwrap(),
        ActionOutcome::HistoryStepped { applied: true }
    );
    assert_eq!(editor.document().layer(&id("background-1")).unwrap().opacity(), 100);
}

#[test]
fn test_history_changes_are_broadcast() {
    let dispatcher = ActionDispatcher::new().with_history(OpacityHistory);
    let (mut editor, events, _messages) = recording_editor_with(dispatcher);
    let version_before = editor.document().version();

    editor.dispatch(Action::Undo).unwrap();

    let version = editor.document().version();
    assert_eq!(version, version_before + 1);
    assert_eq!(
        events.lock().as_slice(),
        &[
            EditorEvent::DocumentChanged { version },
            EditorEvent::ActionDispatched(Action::Undo),
        ]
    );

    // Nothing to redo: no document event
    events.lock().clear();
    editor.dispatch(Action::Redo).unwrap();
    assert_eq!(events.lock().as_slice(), &[EditorEvent::ActionDispatched(Action::Redo)]);
}

#[test]
fn test_queued_commands_apply_in_order_and_report_failures() {
    let (mut editor, _events, messages) = recording_editor();

    editor.submit(Command::SetTool(ToolKind::Text));
    editor.submit(Command::ToggleLock(id("missing")));
    editor.submit(Command::Select(id("design-1")));
    editor.submit(Command::Update {
        layer: id("design-1"),
        update: LayerUpdate::new().opacity(55).position(40, 60),
    });
    editor.submit(Command::Delete(id("design-1")));
    assert_eq!(editor.pending_commands(), 5);

    let failures = editor.process_commands();

    assert_eq!(editor.pending_commands(), 0);
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        ActionError::Editor(EditorError::NotFound(missing)) if missing.as_str() == "missing"
    ));
    assert_eq!(editor.current_tool(), ToolKind::Text);
    assert!(!editor.document().contains(&id("design-1")));
    assert!(editor.document().active_layer().is_none());
    assert_eq!(
        messages.lock().as_slice(),
        &[
            "Switched to text tool".to_string(),
            "Toggle Lock failed: Layer not found: missing".to_string(),
            "Selected Front Logo".to_string(),
            "Deleted Front Logo".to_string(),
        ]
    );
}

#[test]
fn test_empty_update_still_reports_missing_layer() {
    let (mut editor, events, _messages) = recording_editor();
    assert!(editor.update_fields(&id("background-1"), LayerUpdate::new()).is_ok());
    assert_eq!(
        editor.update_fields(&id("missing"), LayerUpdate::new()),
        Err(EditorError::NotFound(id("missing")))
    );
    assert!(events.lock().is_empty());
}

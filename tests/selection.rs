use proof_studio::{Document, EditorError, Layer, LayerId, LayerKind, Selection};

fn layers() -> Vec<Layer> {
    vec![
        Layer::new("background-1", "Business Background", LayerKind::Background),
        Layer::new("product-1", "Product Photo", LayerKind::Product),
    ]
}

#[test]
fn test_select_existing_layer() {
    let layers = layers();
    let mut selection = Selection::new();

    let previous = selection.select(&LayerId::new("product-1"), &layers).unwrap();
    assert!(previous.is_none());
    assert_eq!(selection.active_layer(&layers).unwrap().name(), "Product Photo");

    let previous = selection.select(&LayerId::new("background-1"), &layers).unwrap();
    assert_eq!(previous, Some(LayerId::new("product-1")));
}

#[test]
fn test_select_missing_layer_is_rejected() {
    let layers = layers();
    let mut selection = Selection::new();
    selection.select(&LayerId::new("background-1"), &layers).unwrap();

    let missing = LayerId::new("nonexistent-id");
    assert_eq!(
        selection.select(&missing, &layers),
        Err(EditorError::InvalidSelection(missing))
    );
    assert_eq!(selection.active_id(), Some(&LayerId::new("background-1")));
}

#[test]
fn test_clear() {
    let layers = layers();
    let mut selection = Selection::new();
    assert!(selection.clear().is_none());

    selection.select(&LayerId::new("product-1"), &layers).unwrap();
    assert_eq!(selection.clear(), Some(LayerId::new("product-1")));
    assert!(selection.is_empty());
    assert!(selection.active_layer(&layers).is_none());
}

#[test]
fn test_document_select_rejects_missing_layer() {
    let mut document = Document::seeded();
    let version = document.version();
    let missing = LayerId::new("nonexistent-id");

    assert_eq!(document.select(&missing), Err(EditorError::InvalidSelection(missing)));
    assert_eq!(document.selection().active_id(), Some(&LayerId::new("background-1")));
    assert_eq!(document.version(), version);
}

#[test]
fn test_deleted_layer_cannot_be_reselected() {
    let mut document = Document::seeded();
    let product = LayerId::new("product-1");
    document.select(&product).unwrap();
    document.delete(&product).unwrap();

    assert!(document.active_layer().is_none());
    assert!(matches!(document.select(&product), Err(EditorError::InvalidSelection(_))));
}

use crate::document::Document;
use crate::error::ActionResult;
use crate::layer::ImageAssetRef;

/// Stores and shares projects
pub trait PersistenceService: Send {
    fn save(&mut self, document: &Document) -> ActionResult<()>;

    /// Returns a share link if one was produced
    fn share(&mut self, document: &Document) -> ActionResult<Option<String>>;
}

/// Renders the proof for download
pub trait ExportRenderer: Send {
    fn export(&mut self, document: &Document) -> ActionResult<()>;
}

/// Undo/redo history. Returns `false` when there is nothing to step over.
pub trait HistoryManager: Send {
    fn undo(&mut self, document: &mut Document) -> ActionResult<bool>;
    fn redo(&mut self, document: &mut Document) -> ActionResult<bool>;
}

/// The file picker. `Ok(None)` means no asset was chosen (yet).
pub trait AssetPicker: Send {
    fn pick(&mut self) -> ActionResult<Option<ImageAssetRef>>;
}

/// Stand-in for every collaborator: accepts the call and does nothing.
///
/// Users still get the action's notice, which is all the editor promises
/// until real services are plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconnected;

impl PersistenceService for Unconnected {
    fn save(&mut self, document: &Document) -> ActionResult<()> {
        log::debug!("save requested for {} layers; no persistence service connected", document.len());
        Ok(())
    }

    fn share(&mut self, _document: &Document) -> ActionResult<Option<String>> {
        Ok(None)
    }
}

impl ExportRenderer for Unconnected {
    fn export(&mut self, document: &Document) -> ActionResult<()> {
        log::debug!("export requested for {} layers; no renderer connected", document.len());
        Ok(())
    }
}

impl HistoryManager for Unconnected {
    fn undo(&mut self, _document: &mut Document) -> ActionResult<bool> {
        Ok(false)
    }

    fn redo(&mut self, _document: &mut Document) -> ActionResult<bool> {
        Ok(false)
    }
}

impl AssetPicker for Unconnected {
    fn pick(&mut self) -> ActionResult<Option<ImageAssetRef>> {
        Ok(None)
    }
}

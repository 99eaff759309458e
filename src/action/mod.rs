//! Discrete user commands from the toolbar (save, export, undo, zoom...) and
//! the dispatcher that routes them to their collaborators.

mod collaborators;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use collaborators::{AssetPicker, ExportRenderer, HistoryManager, PersistenceService, Unconnected};

use crate::config::ZoomConfig;
use crate::document::Document;
use crate::error::{ActionError, ActionResult};
use crate::layer::{ImageAssetRef, LayerId};
use crate::state::ViewState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Save,
    /// Render the proof for download
    Export,
    Share,
    /// Put an image on the active layer. Without an asset the file picker is asked for one.
    Upload(Option<ImageAssetRef>),
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    ResetView,
}

impl Action {
    /// Stable identifier, as used by toolbar buttons
    pub fn id(&self) -> &'static str {
        match self {
            Action::Save => "save",
            Action::Export => "download",
            Action::Share => "share",
            Action::Upload(_) => "upload",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::ZoomIn => "zoom-in",
            Action::ZoomOut => "zoom-out",
            Action::ResetView => "reset",
        }
    }

    /// Parses a toolbar identifier. `upload` parses without an asset.
    pub fn from_id(id: &str) -> Option<Self> {
        let action = match id {
            "save" => Action::Save,
            "download" | "export" => Action::Export,
            "share" => Action::Share,
            "upload" => Action::Upload(None),
            "undo" => Action::Undo,
            "redo" => Action::Redo,
            "zoom-in" => Action::ZoomIn,
            "zoom-out" => Action::ZoomOut,
            "reset" => Action::ResetView,
            _ => return None,
        };
        Some(action)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Save => "Save",
            Action::Export => "Export",
            Action::Share => "Share",
            Action::Upload(_) => "Upload",
            Action::Undo => "Undo",
            Action::Redo => "Redo",
            Action::ZoomIn => "Zoom In",
            Action::ZoomOut => "Zoom Out",
            Action::ResetView => "Reset View",
        }
    }

    /// Message shown to the user when the action starts
    pub fn notice(&self) -> &'static str {
        match self {
            Action::Save => "Project saved successfully!",
            Action::Export => "Exporting proof...",
            Action::Share => "Generating share link...",
            Action::Upload(_) => "Opening file browser...",
            Action::Undo => "Undoing last action...",
            Action::Redo => "Redoing action...",
            Action::ZoomIn => "Zooming in...",
            Action::ZoomOut => "Zooming out...",
            Action::ResetView => "Resetting view...",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a dispatched action ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Saved,
    Exported,
    Shared { link: Option<String> },
    ImageSet { layer: LayerId, image: ImageAssetRef },
    /// The picker was opened but produced no asset yet
    AwaitingAsset,
    /// `applied` is false when there was nothing to undo or redo
    HistoryStepped { applied: bool },
    ViewChanged { zoom: f32 },
}

/// Routes actions to the collaborators that implement them
pub struct ActionDispatcher {
    persistence: Box<dyn PersistenceService>,
    export: Box<dyn ExportRenderer>,
    history: Box<dyn HistoryManager>,
    picker: Box<dyn AssetPicker>,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher").finish_non_exhaustive()
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self {
            persistence: Box::new(Unconnected),
            export: Box::new(Unconnected),
            history: Box::new(Unconnected),
            picker: Box::new(Unconnected),
        }
    }
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persistence(mut self, persistence: impl PersistenceService + 'static) -> Self {
        self.persistence = Box::new(persistence);
        self
    }

    pub fn with_export(mut self, export: impl ExportRenderer + 'static) -> Self {
        self.export = Box::new(export);
        self
    }

    pub fn with_history(mut self, history: impl HistoryManager + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    pub fn with_picker(mut self, picker: impl AssetPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn route(
        &mut self,
        action: &Action,
        document: &mut Document,
        view: &mut ViewState,
        zoom: &ZoomConfig,
    ) -> ActionResult<ActionOutcome> {
        match action {
            Action::Save => {
                self.persistence.save(document)?;
                Ok(ActionOutcome::Saved)
            }
            Action::Share => {
                let link = self.persistence.share(document)?;
                Ok(ActionOutcome::Shared { link })
            }
            Action::Export => {
                self.export.export(document)?;
                Ok(ActionOutcome::Exported)
            }
            Action::Upload(asset) => {
                let asset = match asset {
                    Some(asset) => asset.clone(),
                    None => match self.picker.pick()? {
                        Some(asset) => asset,
                        None => return Ok(ActionOutcome::AwaitingAsset),
                    },
                };
                let layer = document
                    .selection()
                    .active_id()
                    .cloned()
                    .ok_or(ActionError::NoActiveLayer)?;
                document.set_image(&layer, Some(asset.clone()))?;
                Ok(ActionOutcome::ImageSet { layer, image: asset })
            }
            Action::Undo => Ok(ActionOutcome::HistoryStepped {
                applied: self.history.undo(document)?,
            }),
            Action::Redo => Ok(ActionOutcome::HistoryStepped {
                applied: self.history.redo(document)?,
            }),
            Action::ZoomIn => Ok(ActionOutcome::ViewChanged {
                zoom: view.zoom_in(zoom),
            }),
            Action::ZoomOut => Ok(ActionOutcome::ViewChanged {
                zoom: view.zoom_out(zoom),
            }),
            Action::ResetView => Ok(ActionOutcome::ViewChanged { zoom: view.reset() }),
        }
    }
}

use crate::action::Action;
use crate::layer::{LayerId, LayerUpdate};
use crate::tool::ToolKind;

/// Something observable changed. Events are emitted after the change is
/// complete, so handlers always see a consistent document.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    LayerChanged {
        /// Document version after the change
        version: u64,
        change: LayerEvent,
    },
    SelectionChanged(SelectionEvent),
    /// A collaborator (history, for one) changed the document in ways not
    /// described by a single layer event. Observers should re-read it.
    DocumentChanged {
        version: u64,
    },
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    ActionDispatched(Action),
    ViewChanged {
        zoom: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    Added { id: LayerId, index: usize },
    Removed { id: LayerId, index: usize },
    Reordered {
        id: LayerId,
        old_index: usize,
        new_index: usize,
    },
    VisibilityChanged { id: LayerId, visible: bool },
    LockChanged { id: LayerId, locked: bool },
    Updated { id: LayerId, update: LayerUpdate },
    Rotated { id: LayerId, rotation_deg: i32 },
    Flipped { id: LayerId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Selected {
        previous: Option<LayerId>,
        current: LayerId,
    },
    Cleared {
        previous: LayerId,
    },
}

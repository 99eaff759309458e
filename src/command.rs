use std::collections::VecDeque;

use crate::action::Action;
use crate::layer::{FlipAxis, ImageAssetRef, LayerId, LayerKind, LayerUpdate};
use crate::tool::ToolKind;

/// A request to change editor state, produced by the UI and applied by
/// [`EditorContext::execute`](crate::EditorContext::execute).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(LayerId),
    ClearSelection,
    ToggleVisibility(LayerId),
    ToggleLock(LayerId),
    Delete(LayerId),
    Update {
        layer: LayerId,
        update: LayerUpdate,
    },
    SetImage {
        layer: LayerId,
        image: Option<ImageAssetRef>,
    },
    Rotate {
        layer: LayerId,
        degrees: i32,
    },
    Flip {
        layer: LayerId,
        axis: FlipAxis,
    },
    AddLayer {
        kind: LayerKind,
        name: String,
    },
    MoveLayer {
        layer: LayerId,
        index: usize,
    },
    SetTool(ToolKind),
    Dispatch(Action),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select(_) => "Select",
            Command::ClearSelection => "Clear Selection",
            Command::ToggleVisibility(_) => "Toggle Visibility",
            Command::ToggleLock(_) => "Toggle Lock",
            Command::Delete(_) => "Delete Layer",
            Command::Update { .. } => "Update Layer",
            Command::SetImage { .. } => "Set Image",
            Command::Rotate { .. } => "Rotate Layer",
            Command::Flip { .. } => "Flip Layer",
            Command::AddLayer { .. } => "Add Layer",
            Command::MoveLayer { .. } => "Move Layer",
            Command::SetTool(_) => "Set Tool",
            Command::Dispatch(_) => "Dispatch Action",
        }
    }
}

/// FIFO of commands waiting for the state owner to apply them
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

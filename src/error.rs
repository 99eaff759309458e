use thiserror::Error;

use crate::layer::LayerId;

/// Errors reported by the layer store and the selection controller.
///
/// None of these are fatal: the operation that produced one leaves the
/// document exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("Layer not found: {0}")]
    NotFound(LayerId),

    #[error("Cannot select missing layer: {0}")]
    InvalidSelection(LayerId),

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Layer is locked: {0}")]
    Locked(LayerId),

    #[error("Duplicate layer id: {0}")]
    DuplicateId(LayerId),

    #[error("Layer {id} has no {field} field")]
    UnsupportedField { id: LayerId, field: &'static str },
}

/// Result type for layer and selection operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors produced while routing an action to its collaborator
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No collaborator available for {0}")]
    Unavailable(&'static str),

    #[error("No layer is selected")]
    NoActiveLayer,

    #[error("Action failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Result type for dispatched actions
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

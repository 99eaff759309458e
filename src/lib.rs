#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod layer;
pub mod notify;
pub mod panels;
pub mod selection;
pub mod state;
pub mod tool;
mod util;

pub use action::{Action, ActionDispatcher, ActionOutcome};
pub use app::ProofApp;
pub use command::{Command, CommandQueue};
pub use config::{ProofConfig, ProofGeometry};
pub use document::{DeletedLayer, Document};
pub use error::{ActionError, ConfigError, EditorError, EditorResult};
pub use event::{EditorEvent, EventBus, EventHandler, LayerEvent, SelectionEvent};
pub use layer::{FlipAxis, ImageAssetRef, Layer, LayerContent, LayerId, LayerKind, LayerUpdate, Position, Size, Transform};
pub use notify::{Notifier, ToastQueue};
pub use selection::Selection;
pub use state::{EditorContext, ViewState};
pub use tool::{ToolKind, ToolState};

//! The single owner of editor state.
//!
//! `EditorContext` holds the document (layers and selection), the current
//! tool, the view, and the action dispatcher. It is the only writer: every
//! mutation goes through one of its methods, which
//!
//! 1. applies the change to the [`Document`] (or rejects it, leaving it untouched),
//! 2. broadcasts an [`EditorEvent`] on the event bus,
//! 3. sends the user-visible message, if any, to the [`Notifier`].
//!
//! Handlers therefore never observe a half-applied change: deleting the
//! active layer and clearing the selection happen in the same call, before
//! any event goes out.
//!
//! UI code that cannot borrow the context mutably while drawing can instead
//! [`submit`](EditorContext::submit) [`Command`]s and let the owner apply
//! them with [`process_commands`](EditorContext::process_commands).
//!
//! # Example
//!
//! ```rust
//! use proof_studio::{Document, EditorContext, LayerId, ToolKind};
//!
//! let mut editor = EditorContext::new(Document::seeded());
//! editor.set_tool(ToolKind::Text);
//! editor.delete(&LayerId::new("background-1")).unwrap();
//! assert!(editor.document().active_layer().is_none());
//! ```

use crate::action::{Action, ActionDispatcher, ActionOutcome};
use crate::command::{Command, CommandQueue};
use crate::config::ProofConfig;
use crate::document::{DeletedLayer, Document};
use crate::error::{ActionError, ActionResult, EditorResult};
use crate::event::{EditorEvent, EventBus, EventHandler, LayerEvent, SelectionEvent};
use crate::layer::{FlipAxis, ImageAssetRef, LayerId, LayerKind, LayerUpdate};
use crate::notify::{LogNotifier, Notifier};
use crate::tool::{ToolKind, ToolState};
use super::ViewState;

pub struct EditorContext {
    document: Document,
    tools: ToolState,
    view: ViewState,
    config: ProofConfig,
    dispatcher: ActionDispatcher,
    event_bus: EventBus,
    notifier: Box<dyn Notifier>,
    queue: CommandQueue,
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("document", &self.document)
            .field("tools", &self.tools)
            .field("view", &self.view)
            .field("event_bus", &self.event_bus)
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl EditorContext {
    /// Creates a context with default config, no collaborators and
    /// notifications going to the log.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            tools: ToolState::new(),
            view: ViewState::default(),
            config: ProofConfig::default(),
            dispatcher: ActionDispatcher::new(),
            event_bus: EventBus::new(),
            notifier: Box::new(LogNotifier),
            queue: CommandQueue::new(),
        }
    }

    pub fn with_config(mut self, config: ProofConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: ActionDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// A copy of the document as of now
    pub fn snapshot(&self) -> Document {
        self.document.clone()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.event_bus.subscribe(Box::new(handler));
    }

    fn layer_event(&self, change: LayerEvent) {
        self.event_bus.emit(EditorEvent::LayerChanged {
            version: self.document.version(),
            change,
        });
    }

    fn layer_name(&self, id: &LayerId) -> String {
        self.document
            .layer(id)
            .map(|layer| layer.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Logs rejected operations; the caller still gets the error.
    fn report<T>(operation: &str, result: EditorResult<T>) -> EditorResult<T> {
        if let Err(err) = &result {
            log::warn!("{} rejected: {}", operation, err);
        }
        result
    }

    pub fn select(&mut self, id: &LayerId) -> EditorResult<()> {
        let previous = Self::report("select", self.document.select(id))?;
        self.event_bus.emit(EditorEvent::SelectionChanged(SelectionEvent::Selected {
            previous,
            current: id.clone(),
        }));
        let message = format!("Selected {}", self.layer_name(id));
        self.notifier.notify(&message);
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Option<LayerId> {
        let previous = self.document.clear_selection()?;
        self.event_bus.emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared {
            previous: previous.clone(),
        }));
        Some(previous)
    }

    pub fn toggle_visibility(&mut self, id: &LayerId) -> EditorResult<bool> {
        let visible = Self::report("toggle visibility", self.document.toggle_visibility(id))?;
        self.layer_event(LayerEvent::VisibilityChanged {
            id: id.clone(),
            visible,
        });
        Ok(visible)
    }

    pub fn toggle_lock(&mut self, id: &LayerId) -> EditorResult<bool> {
        let locked = Self::report("toggle lock", self.document.toggle_lock(id))?;
        self.layer_event(LayerEvent::LockChanged {
            id: id.clone(),
            locked,
        });
        Ok(locked)
    }

    pub fn delete(&mut self, id: &LayerId) -> EditorResult<DeletedLayer> {
        let deleted = Self::report("delete", self.document.delete(id))?;
        self.layer_event(LayerEvent::Removed {
            id: id.clone(),
            index: deleted.index,
        });
        if deleted.was_active {
            self.event_bus.emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared {
                previous: id.clone(),
            }));
        }
        let message = format!("Deleted {}", deleted.layer.name());
        self.notifier.notify(&message);
        Ok(deleted)
    }

    pub fn update_fields(&mut self, id: &LayerId, update: LayerUpdate) -> EditorResult<()> {
        if update.is_empty() {
            // Still report a missing layer
            self.document.layer(id)?;
            return Ok(());
        }
        Self::report("update", self.document.update_fields(id, &update))?;
        self.layer_event(LayerEvent::Updated {
            id: id.clone(),
            update,
        });
        Ok(())
    }

    pub fn set_image(&mut self, id: &LayerId, image: Option<ImageAssetRef>) -> EditorResult<()> {
        self.update_fields(id, LayerUpdate::new().image(image))
    }

    pub fn rotate_by(&mut self, id: &LayerId, degrees: i32) -> EditorResult<i32> {
        let rotation_deg = Self::report("rotate", self.document.rotate_by(id, degrees))?;
        self.layer_event(LayerEvent::Rotated {
            id: id.clone(),
            rotation_deg,
        });
        Ok(rotation_deg)
    }

    pub fn flip(&mut self, id: &LayerId, axis: FlipAxis) -> EditorResult<()> {
        Self::report("flip", self.document.flip(id, axis))?;
        self.layer_event(LayerEvent::Flipped { id: id.clone() });
        Ok(())
    }

    pub fn add_layer(&mut self, kind: LayerKind, name: &str) -> LayerId {
        let id = self.document.add_layer(kind, name);
        self.layer_event(LayerEvent::Added {
            id: id.clone(),
            index: self.document.len() - 1,
        });
        self.notifier.notify(&format!("Added {}", name));
        id
    }

    pub fn move_layer(&mut self, id: &LayerId, index: usize) -> EditorResult<()> {
        let old_index = Self::report("move", self.document.move_layer(id, index))?;
        let new_index = self.document.index_of(id).unwrap_or(old_index);
        self.layer_event(LayerEvent::Reordered {
            id: id.clone(),
            old_index,
            new_index,
        });
        Ok(())
    }

    /// Switches tool, returning the previous one
    pub fn set_tool(&mut self, tool: ToolKind) -> ToolKind {
        let old = self.tools.set_tool(tool);
        log::info!("Tool changed: {} -> {}", old, tool);
        self.event_bus.emit(EditorEvent::ToolChanged { old, new: tool });
        self.notifier.notify(&format!("Switched to {} tool", tool));
        old
    }

    /// Routes an action to its collaborator.
    ///
    /// The action's notice goes out first; a failure is reported with a
    /// second message and returned.
    pub fn dispatch(&mut self, action: Action) -> ActionResult<ActionOutcome> {
        log::info!("Dispatching {}", action);
        self.notifier.notify(action.notice());
        let version_before = self.document.version();
        let outcome = match self.dispatcher.route(
            &action,
            &mut self.document,
            &mut self.view,
            &self.config.zoom,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{} failed: {}", action, err);
                self.notifier.notify(&format!("{} failed: {}", action.label(), err));
                return Err(err);
            }
        };

        match &outcome {
            ActionOutcome::ImageSet { layer, image } => self.layer_event(LayerEvent::Updated {
                id: layer.clone(),
                update: LayerUpdate::new().image(Some(image.clone())),
            }),
            ActionOutcome::ViewChanged { zoom } => {
                self.event_bus.emit(EditorEvent::ViewChanged { zoom: *zoom });
            }
            ActionOutcome::Shared { link: Some(link) } => {
                self.notifier.notify(&format!("Share link: {}", link));
            }
            _ => {}
        }
        let reported = matches!(outcome, ActionOutcome::ImageSet { .. });
        if !reported && self.document.version() != version_before {
            self.event_bus.emit(EditorEvent::DocumentChanged {
                version: self.document.version(),
            });
        }
        self.event_bus.emit(EditorEvent::ActionDispatched(action));
        Ok(outcome)
    }

    /// Applies one command
    pub fn execute(&mut self, command: Command) -> ActionResult<()> {
        log::debug!("Executing {}", command.name());
        match command {
            Command::Select(id) => self.select(&id)?,
            Command::ClearSelection => {
                self.clear_selection();
            }
            Command::ToggleVisibility(id) => {
                self.toggle_visibility(&id)?;
            }
            Command::ToggleLock(id) => {
                self.toggle_lock(&id)?;
            }
            Command::Delete(id) => {
                self.delete(&id)?;
            }
            Command::Update { layer, update } => self.update_fields(&layer, update)?,
            Command::SetImage { layer, image } => self.set_image(&layer, image)?,
            Command::Rotate { layer, degrees } => {
                self.rotate_by(&layer, degrees)?;
            }
            Command::Flip { layer, axis } => self.flip(&layer, axis)?,
            Command::AddLayer { kind, name } => {
                self.add_layer(kind, &name);
            }
            Command::MoveLayer { layer, index } => self.move_layer(&layer, index)?,
            Command::SetTool(tool) => {
                self.set_tool(tool);
            }
            Command::Dispatch(action) => {
                self.dispatch(action)?;
            }
        }
        Ok(())
    }

    /// Queues a command for the next [`process_commands`](Self::process_commands)
    pub fn submit(&mut self, command: Command) {
        self.queue.push(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Applies every queued command in order. Failures are shown to the user
    /// and do not stop the rest. Returns the failures.
    pub fn process_commands(&mut self) -> Vec<ActionError> {
        let mut failures = Vec::new();
        while let Some(command) = self.queue.pop() {
            let name = command.name();
            let is_dispatch = matches!(command, Command::Dispatch(_));
            if let Err(err) = self.execute(command) {
                // Dispatch reports its own failures
                if !is_dispatch {
                    self.notifier.notify(&format!("{} failed: {}", name, err));
                }
                failures.push(err);
            }
        }
        failures
    }
}

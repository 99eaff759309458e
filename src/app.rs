use std::time::Duration;

use crate::command::Command;
use crate::config::{CONFIG_ENV_VAR, ProofConfig};
use crate::document::Document;
use crate::file_handler::FileHandler;
use crate::notify::ToastQueue;
use crate::panels::{self, CanvasState, PropertyTab};
use crate::state::EditorContext;

/// eframe storage key for the persisted [`ProofConfig`]
pub const CONFIG_KEY: &str = "proof_studio_config";

/// The desktop proofing editor: panels around an [`EditorContext`]
pub struct ProofApp {
    editor: EditorContext,
    toasts: ToastQueue,
    file_handler: FileHandler,
    canvas_state: CanvasState,
    property_tab: PropertyTab,
}

impl ProofApp {
    /// Called once before the first frame.
    ///
    /// Config comes from the file named by `PROOF_STUDIO_CONFIG` if set,
    /// then from the previous session, then the defaults.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let stored = cc
            .storage
            .and_then(|storage| eframe::get_value::<ProofConfig>(storage, CONFIG_KEY));
        let config = if std::env::var_os(CONFIG_ENV_VAR).is_some() {
            ProofConfig::from_env().unwrap_or_else(|err| {
                log::error!("Ignoring config file: {}", err);
                stored.unwrap_or_default()
            })
        } else {
            stored.unwrap_or_default()
        };
        Self::with_config(config)
    }

    /// Builds the app around the seeded proof without an eframe context
    pub fn with_config(config: ProofConfig) -> Self {
        let toasts = ToastQueue::default();
        let editor = EditorContext::new(Document::seeded())
            .with_config(config)
            .with_notifier(toasts.clone());
        Self {
            editor,
            toasts,
            file_handler: FileHandler::new(),
            canvas_state: CanvasState::default(),
            property_tab: PropertyTab::default(),
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        let lifetime = self.editor.config().toast_lifetime_secs;
        let live = self.toasts.live(crate::util::time::current_time_secs(), lifetime);
        if live.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &live {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(toast.message.as_str());
                    });
                }
            });
        // Keep repainting so toasts disappear on time
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl eframe::App for ProofApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, self.editor.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for command in self.file_handler.take_dropped_files(ctx) {
            self.editor.submit(command);
        }

        let mut commands: Vec<Command> = Vec::new();
        panels::toolbar_panel(ctx, &self.editor, &mut commands);
        panels::layer_panel(ctx, self.editor.document(), &mut commands);
        panels::property_panel(ctx, self.editor.document(), &mut self.property_tab, &mut commands);
        panels::canvas_panel(ctx, &self.editor, &mut self.canvas_state, &mut commands);

        self.file_handler.preview_files_being_dropped(ctx);
        self.show_toasts(ctx);

        for command in commands {
            self.editor.submit(command);
        }
        if self.editor.pending_commands() > 0 {
            self.editor.process_commands();
            ctx.request_repaint();
        }
    }
}

use egui::{Sense, vec2};

use crate::command::Command;
use crate::document::Document;
use crate::layer::LayerKind;
use super::kind_color;

/// Lists layers top-most first, with visibility, lock, order and delete controls
pub fn layer_panel(ctx: &egui::Context, document: &Document, commands: &mut Vec<Command>) {
    egui::SidePanel::left("layer_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Layers");

            ui.horizontal(|ui| {
                for kind in LayerKind::ALL {
                    if ui.small_button(format!("+ {}", kind)).clicked() {
                        commands.push(Command::AddLayer {
                            kind,
                            name: format!("New {}", kind.placeholder_label()),
                        });
                    }
                }
            });

            ui.separator();

            if document.is_empty() {
                ui.weak("No layers");
                return;
            }

            let count = document.len();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, layer) in document.layers().iter().enumerate().rev() {
                    let id = layer.id();
                    let active = document.selection().is_active(id);

                    ui.horizontal(|ui| {
                        let (swatch, _) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
                        ui.painter().circle_filled(swatch.center(), 5.0, kind_color(layer.kind()));

                        let name = if layer.is_visible() {
                            egui::RichText::new(layer.name())
                        } else {
                            egui::RichText::new(layer.name()).weak()
                        };
                        if ui.selectable_label(active, name).clicked() {
                            commands.push(Command::Select(id.clone()));
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("🗑").on_hover_text("Delete layer").clicked() {
                                commands.push(Command::Delete(id.clone()));
                            }

                            let lock_icon = if layer.is_locked() { "🔒" } else { "🔓" };
                            if ui.small_button(lock_icon).on_hover_text("Toggle lock").clicked() {
                                commands.push(Command::ToggleLock(id.clone()));
                            }

                            let eye_icon = if layer.is_visible() { "👁" } else { "—" };
                            if ui.small_button(eye_icon).on_hover_text("Toggle visibility").clicked() {
                                commands.push(Command::ToggleVisibility(id.clone()));
                            }

                            if ui
                                .add_enabled(index > 0, egui::Button::new("⏷").small())
                                .on_hover_text("Move down")
                                .clicked()
                            {
                                commands.push(Command::MoveLayer {
                                    layer: id.clone(),
                                    index: index - 1,
                                });
                            }
                            if ui
                                .add_enabled(index + 1 < count, egui::Button::new("⏶").small())
                                .on_hover_text("Move up")
                                .clicked()
                            {
                                commands.push(Command::MoveLayer {
                                    layer: id.clone(),
                                    index: index + 1,
                                });
                            }

                            ui.weak(format!("{}%", layer.opacity()));
                        });
                    });
                }
            });
        });
}

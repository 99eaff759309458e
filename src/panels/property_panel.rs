use crate::action::Action;
use crate::command::Command;
use crate::document::Document;
use crate::layer::{FlipAxis, Layer, LayerContent, LayerUpdate, ROTATION_LIMIT_DEG};
use super::capitalize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropertyTab {
    #[default]
    Transform,
    Content,
}

/// Editor for the active layer's transform and content
pub fn property_panel(
    ctx: &egui::Context,
    document: &Document,
    tab: &mut PropertyTab,
    commands: &mut Vec<Command>,
) {
    egui::SidePanel::right("property_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            let Some(layer) = document.active_layer() else {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.weak("Select a layer to edit properties");
                });
                return;
            };

            ui.heading(format!("{} Properties", capitalize(layer.kind().as_str())));
            ui.horizontal(|ui| {
                ui.selectable_value(tab, PropertyTab::Transform, "Transform");
                ui.selectable_value(tab, PropertyTab::Content, "Content");
            });
            ui.separator();

            let mut push_update = |update: LayerUpdate| {
                commands.push(Command::Update {
                    layer: layer.id().clone(),
                    update,
                });
            };

            match tab {
                PropertyTab::Transform => transform_tab(ui, layer, &mut push_update),
                PropertyTab::Content => content_tab(ui, layer, &mut push_update),
            }

            ui.separator();
            ui.horizontal(|ui| {
                let locked = layer.is_locked();
                ui.add_enabled_ui(!locked, |ui| {
                    if ui.button("⟳ 90°").on_hover_text("Rotate 90°").clicked() {
                        commands.push(Command::Rotate {
                            layer: layer.id().clone(),
                            degrees: 90,
                        });
                    }
                    if ui.button("⇆").on_hover_text("Flip horizontal").clicked() {
                        commands.push(Command::Flip {
                            layer: layer.id().clone(),
                            axis: FlipAxis::Horizontal,
                        });
                    }
                    if ui.button("⇅").on_hover_text("Flip vertical").clicked() {
                        commands.push(Command::Flip {
                            layer: layer.id().clone(),
                            axis: FlipAxis::Vertical,
                        });
                    }
                });
            });

            ui.separator();
            let upload_label = match layer.content() {
                LayerContent::Background { .. } => "Upload Background Image",
                LayerContent::Product { .. } => "Upload Product Image",
                LayerContent::Design => "Upload Logo/Design",
            };
            if ui.button(upload_label).clicked() {
                commands.push(Command::Dispatch(Action::Upload(None)));
            }
            match layer.image() {
                Some(image) => {
                    ui.horizontal(|ui| {
                        ui.label(image.display_name()).on_hover_text(image.as_str());
                        if ui.small_button("Remove").clicked() {
                            commands.push(Command::SetImage {
                                layer: layer.id().clone(),
                                image: None,
                            });
                        }
                    });
                }
                None => {
                    ui.weak("Or drop an image file onto the window");
                }
            }
        });
}

fn transform_tab(ui: &mut egui::Ui, layer: &Layer, push_update: &mut impl FnMut(LayerUpdate)) {
    let transform = *layer.transform();
    if layer.is_locked() {
        ui.weak("🔒 Layer is locked");
    }

    ui.add_enabled_ui(!layer.is_locked(), |ui| {
        egui::Grid::new("transform_grid")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                let (mut x, mut y) = (transform.position.x, transform.position.y);
                ui.label("Position");
                let changed_x = ui.add(egui::DragValue::new(&mut x).prefix("X ")).changed();
                let changed_y = ui.add(egui::DragValue::new(&mut y).prefix("Y ")).changed();
                if changed_x || changed_y {
                    push_update(LayerUpdate::new().position(x, y));
                }
                ui.end_row();

                let (mut width, mut height) = (transform.size.width, transform.size.height);
                ui.label("Size");
                let changed_w = ui
                    .add(egui::DragValue::new(&mut width).range(1..=i32::MAX).prefix("W "))
                    .changed();
                let changed_h = ui
                    .add(egui::DragValue::new(&mut height).range(1..=i32::MAX).prefix("H "))
                    .changed();
                if changed_w || changed_h {
                    push_update(LayerUpdate::new().size(width, height));
                }
                ui.end_row();
            });

        let mut rotation = transform.rotation_deg;
        let rotation_range = -ROTATION_LIMIT_DEG..=ROTATION_LIMIT_DEG;
        if ui
            .add(egui::Slider::new(&mut rotation, rotation_range).text("Rotation").suffix("°"))
            .changed()
        {
            push_update(LayerUpdate::new().rotation(rotation));
        }
    });

    let mut opacity = i32::from(layer.opacity());
    if ui
        .add(egui::Slider::new(&mut opacity, 0..=100).text("Opacity").suffix("%"))
        .changed()
    {
        push_update(LayerUpdate::new().opacity(opacity));
    }
}

fn content_tab(ui: &mut egui::Ui, layer: &Layer, push_update: &mut impl FnMut(LayerUpdate)) {
    let mut name = layer.name().to_string();
    ui.label("Layer name");
    if ui.text_edit_singleline(&mut name).changed() {
        push_update(LayerUpdate::new().name(name));
    }

    match layer.content() {
        LayerContent::Background { company_name, tagline } => {
            ui.label("Business details");
            let mut company_name = company_name.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut company_name).hint_text("Company Name"))
                .changed()
            {
                push_update(LayerUpdate::new().company_name(company_name));
            }
            let mut tagline = tagline.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut tagline).hint_text("Tagline"))
                .changed()
            {
                push_update(LayerUpdate::new().tagline(tagline));
            }
        }
        LayerContent::Product { product_type } => {
            ui.label("Product type");
            let mut product_type = product_type.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut product_type).hint_text("T-Shirt, Mug, etc."))
                .changed()
            {
                push_update(LayerUpdate::new().product_type(product_type));
            }
        }
        LayerContent::Design => {
            ui.weak("Logo and design artwork comes from the uploaded image.");
        }
    }
}

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2, pos2, vec2};

use crate::command::Command;
use crate::geometry::hit_testing::{HANDLE_RADIUS, draggable_layer_at, topmost_layer_at};
use crate::layer::{Layer, LayerId, LayerKind, LayerUpdate, Position};
use crate::state::EditorContext;
use crate::tool::ToolKind;
use super::kind_color;

/// Drag bookkeeping that has to survive between frames
#[derive(Debug, Default)]
pub struct CanvasState {
    drag: Option<DragOrigin>,
}

#[derive(Debug)]
struct DragOrigin {
    layer: LayerId,
    position: Position,
    pointer: Pos2,
}

/// Draws the proof and turns clicks and drags into selection and move commands.
///
/// Paints in document order so later layers cover earlier ones.
pub fn canvas_panel(
    ctx: &egui::Context,
    editor: &EditorContext,
    state: &mut CanvasState,
    commands: &mut Vec<Command>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(Color32::from_gray(45)))
        .show(ctx, |ui| {
            let config = editor.config();
            let zoom = editor.view().zoom();
            let scale = config.geometry.display_scale() * zoom;
            let [width, height] = config.geometry.display_size(zoom);

            let available = ui.available_rect_before_wrap();
            let proof_rect = Rect::from_center_size(available.center(), vec2(width, height));
            let response = ui.allocate_rect(proof_rect, Sense::click_and_drag());
            let painter = ui.painter_at(available);

            painter.rect_filled(proof_rect, 6.0, Color32::WHITE);
            if config.show_grid {
                paint_grid(&painter, proof_rect, config.grid_spacing_px * zoom);
            }

            let document = editor.document();
            for layer in document.layers().iter().filter(|layer| layer.is_visible()) {
                let active = document.selection().is_active(layer.id());
                paint_layer(&painter, proof_rect.min, scale, layer, active);
            }

            paint_kind_legend(&painter, proof_rect);
            painter.text(
                proof_rect.right_bottom() - vec2(8.0, 8.0),
                Align2::RIGHT_BOTTOM,
                config.geometry.size_label(),
                FontId::proportional(12.0),
                Color32::DARK_GRAY,
            );

            if editor.current_tool() != ToolKind::Select {
                state.drag = None;
                return;
            }

            let to_proof = |pointer: Pos2| -> Position {
                let local = (pointer - proof_rect.min) / scale;
                Position::new(local.x.floor() as i32, local.y.floor() as i32)
            };

            if response.clicked() {
                match response
                    .interact_pointer_pos()
                    .and_then(|pointer| topmost_layer_at(document.layers(), to_proof(pointer)))
                {
                    Some(layer) if !document.selection().is_active(layer.id()) => {
                        commands.push(Command::Select(layer.id().clone()));
                    }
                    Some(_) => {}
                    None => commands.push(Command::ClearSelection),
                }
            }

            if response.drag_started() {
                let press = ui.input(|i| i.pointer.press_origin()).or(response.interact_pointer_pos());
                state.drag = press.and_then(|pointer| {
                    let layer = draggable_layer_at(document.layers(), to_proof(pointer))?;
                    if !document.selection().is_active(layer.id()) {
                        commands.push(Command::Select(layer.id().clone()));
                    }
                    Some(DragOrigin {
                        layer: layer.id().clone(),
                        position: layer.position(),
                        pointer,
                    })
                });
            }

            if response.dragged() {
                if let (Some(origin), Some(pointer)) = (&state.drag, response.interact_pointer_pos()) {
                    let target = dragged_position(origin, pointer, scale);
                    let moved = document
                        .layer(&origin.layer)
                        .map(|layer| layer.position() != target)
                        .unwrap_or(false);
                    if moved {
                        commands.push(Command::Update {
                            layer: origin.layer.clone(),
                            update: LayerUpdate::new().position(target.x, target.y),
                        });
                    }
                }
            }

            if response.drag_stopped() {
                state.drag = None;
            }
        });
}

/// Where the dragged layer lands. Float-to-int casts saturate, and so does the offset.
fn dragged_position(origin: &DragOrigin, pointer: Pos2, scale: f32) -> Position {
    let delta = (pointer - origin.pointer) / scale;
    origin
        .position
        .saturating_offset(delta.x.round() as i32, delta.y.round() as i32)
}

fn paint_grid(painter: &egui::Painter, rect: Rect, spacing: f32) {
    if spacing < 4.0 {
        return;
    }
    let stroke = Stroke::new(1.0, Color32::from_black_alpha(20));
    let mut x = rect.left() + spacing;
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        x += spacing;
    }
    let mut y = rect.top() + spacing;
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        y += spacing;
    }
}

/// Corners of the layer on screen, rotated about its centre
fn layer_corners(origin: Pos2, scale: f32, layer: &Layer) -> [Pos2; 4] {
    let transform = layer.transform();
    let min = origin + vec2(transform.position.x as f32, transform.position.y as f32) * scale;
    let size = vec2(transform.size.width as f32, transform.size.height as f32) * scale;
    let center = min + size / 2.0;
    let (sin, cos) = (transform.rotation_deg as f32).to_radians().sin_cos();
    let rotate = |offset: Vec2| center + vec2(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos);
    let half = size / 2.0;
    [
        rotate(vec2(-half.x, -half.y)),
        rotate(vec2(half.x, -half.y)),
        rotate(vec2(half.x, half.y)),
        rotate(vec2(-half.x, half.y)),
    ]
}

fn paint_layer(painter: &egui::Painter, origin: Pos2, scale: f32, layer: &Layer, active: bool) {
    let alpha = f32::from(layer.opacity()) / 100.0;
    let corners = layer_corners(origin, scale, layer);
    let center = pos2(
        corners.iter().map(|p| p.x).sum::<f32>() / 4.0,
        corners.iter().map(|p| p.y).sum::<f32>() / 4.0,
    );

    let fill = if layer.image().is_some() {
        kind_color(layer.kind()).gamma_multiply(0.45 * alpha)
    } else {
        Color32::from_gray(200).gamma_multiply(0.5 * alpha)
    };
    painter.add(Shape::convex_polygon(corners.to_vec(), fill, Stroke::NONE));

    let transform = layer.transform();
    let mut label = match layer.image() {
        Some(image) => image.display_name().to_string(),
        None => layer.kind().placeholder_label().to_string(),
    };
    if transform.flip_horizontal || transform.flip_vertical {
        label.push_str(match (transform.flip_horizontal, transform.flip_vertical) {
            (true, true) => " ⇆⇅",
            (true, false) => " ⇆",
            _ => " ⇅",
        });
    }
    painter.text(
        center,
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(11.0),
        Color32::from_gray(60).gamma_multiply(alpha.max(0.3)),
    );

    if active {
        let mut outline = corners.to_vec();
        outline.push(corners[0]);
        let stroke = Stroke::new(2.0, Color32::from_rgb(33, 150, 243));
        painter.extend(Shape::dashed_line(&outline, stroke, 6.0, 4.0));
        for corner in corners {
            painter.circle_filled(corner, HANDLE_RADIUS, stroke.color);
        }
    }
}

fn paint_kind_legend(painter: &egui::Painter, proof_rect: Rect) {
    let mut at = proof_rect.left_top() + vec2(16.0, 16.0);
    for kind in LayerKind::ALL {
        painter.circle_filled(at, 6.0, kind_color(kind));
        at.x += 18.0;
    }
}

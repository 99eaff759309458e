//! Thin egui views over [`EditorContext`](crate::EditorContext).
//!
//! Panels only read state. Anything the user changes comes back as a
//! [`Command`](crate::Command) pushed onto the frame's command list.

mod canvas_panel;
mod layer_panel;
mod property_panel;
mod toolbar;

pub use canvas_panel::{CanvasState, canvas_panel};
pub use layer_panel::layer_panel;
pub use property_panel::{PropertyTab, property_panel};
pub use toolbar::toolbar_panel;

use egui::Color32;

use crate::layer::LayerKind;

/// Accent colour per layer kind, shared by the layer list and the canvas
pub(crate) fn kind_color(kind: LayerKind) -> Color32 {
    match kind {
        LayerKind::Background => Color32::from_rgb(236, 72, 153),
        LayerKind::Product => Color32::from_rgb(59, 130, 246),
        LayerKind::Design => Color32::from_rgb(168, 85, 247),
    }
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

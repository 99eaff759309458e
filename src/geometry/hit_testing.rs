//! Picking layers under a point, in proof-local units.
//!
//! Rotation is ignored: a layer is hit inside its unrotated bounds.

use crate::layer::{Layer, Position};

/// Radius of the corner handles drawn around the active layer, in screen pixels
pub const HANDLE_RADIUS: f32 = 4.0;

/// Half-open bounds check: the right and bottom edges are outside
pub fn layer_contains(layer: &Layer, point: Position) -> bool {
    let Position { x, y } = layer.position();
    let size = layer.size();
    let (px, py) = (point.x as i64, point.y as i64);
    let (left, top) = (x as i64, y as i64);
    px >= left && py >= top && px < left + size.width as i64 && py < top + size.height as i64
}

/// The visible layer painted on top at `point`, if any
pub fn topmost_layer_at(layers: &[Layer], point: Position) -> Option<&Layer> {
    layers
        .iter()
        .rev()
        .find(|layer| layer.is_visible() && layer_contains(layer, point))
}

/// The layer a drag starting at `point` would move: the topmost visible
/// layer there, unless it is locked
pub fn draggable_layer_at(layers: &[Layer], point: Position) -> Option<&Layer> {
    topmost_layer_at(layers, point).filter(|layer| !layer.is_locked())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{LayerKind, Size, Transform};

    fn placed(id: &str, x: i32, y: i32, size: i32) -> Layer {
        Layer::new(id, id, LayerKind::Design).with_transform(Transform {
            position: Position::new(x, y),
            size: Size::new(size, size),
            ..Transform::default()
        })
    }

    #[test]
    fn test_bounds_are_half_open() {
        let layer = placed("a", 10, 10, 20);
        assert!(layer_contains(&layer, Position::new(10, 10)));
        assert!(layer_contains(&layer, Position::new(29, 29)));
        assert!(!layer_contains(&layer, Position::new(30, 15)));
        assert!(!layer_contains(&layer, Position::new(9, 15)));
    }

    #[test]
    fn test_later_layers_win() {
        let layers = vec![placed("below", 0, 0, 100), placed("above", 50, 50, 100)];
        assert_eq!(topmost_layer_at(&layers, Position::new(60, 60)).unwrap().id().as_str(), "above");
        assert_eq!(topmost_layer_at(&layers, Position::new(10, 10)).unwrap().id().as_str(), "below");
        assert!(topmost_layer_at(&layers, Position::new(200, 200)).is_none());
    }

    #[test]
    fn test_drag_picks_layer_under_pointer() {
        let mut layers = vec![placed("below", 0, 0, 100), placed("above", 50, 50, 100)];
        fn picked(layers: &[Layer], x: i32, y: i32) -> Option<String> {
            draggable_layer_at(layers, Position::new(x, y)).map(|layer| layer.id().to_string())
        }

        assert_eq!(picked(&layers, 10, 10).as_deref(), Some("below"));
        assert_eq!(picked(&layers, 60, 60).as_deref(), Some("above"));

        // A locked layer on top blocks the drag instead of handing it to the one below
        layers[1].toggle_locked();
        assert_eq!(picked(&layers, 60, 60), None);
        assert_eq!(picked(&layers, 10, 10).as_deref(), Some("below"));
    }
}

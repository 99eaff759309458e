pub mod hit_testing;

pub use hit_testing::{draggable_layer_at, layer_contains, topmost_layer_at};

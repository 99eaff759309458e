pub mod context;
mod view;

pub use context::EditorContext;
pub use view::ViewState;

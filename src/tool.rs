use serde::{Deserialize, Serialize};
use std::fmt;

/// The interaction mode that decides how canvas gestures are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Text,
    Image,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Image,
    ];

    /// Identifier used in notifications ("Switched to select tool")
    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
            ToolKind::Image => "image",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Text => "Text",
            ToolKind::Image => "Image",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolKind::Select => "⬉",
            ToolKind::Rectangle => "▭",
            ToolKind::Circle => "◯",
            ToolKind::Text => "T",
            ToolKind::Image => "🖼",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.id() == id)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Holds the current tool. Any tool may follow any other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    current: ToolKind,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ToolKind {
        self.current
    }

    /// Overwrites the current tool and returns the previous one
    pub fn set_tool(&mut self, tool: ToolKind) -> ToolKind {
        std::mem::replace(&mut self.current, tool)
    }
}

use serde::{Deserialize, Serialize};

use crate::config::ZoomConfig;

/// How the proof is shown on screen. Does not affect the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl ViewState {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self, limits: &ZoomConfig) -> f32 {
        self.zoom = limits.zoom_in(self.zoom);
        self.zoom
    }

    pub fn zoom_out(&mut self, limits: &ZoomConfig) -> f32 {
        self.zoom = limits.zoom_out(self.zoom);
        self.zoom
    }

    pub fn reset(&mut self) -> f32 {
        self.zoom = 1.0;
        self.zoom
    }
}

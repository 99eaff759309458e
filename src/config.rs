use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "PROOF_STUDIO_CONFIG";

/// Logical size of the proof surface.
///
/// The default is a 17" x 11" sheet at 96 DPI, drawn at 680 px wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofGeometry {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: u32,
    /// On-screen width of the proof at zoom 1.0
    pub display_width_px: f32,
}

impl Default for ProofGeometry {
    fn default() -> Self {
        Self {
            width_px: 1632,
            height_px: 1056,
            dpi: 96,
            display_width_px: 680.0,
        }
    }
}

impl ProofGeometry {
    pub fn width_in(&self) -> f32 {
        self.width_px as f32 / self.dpi as f32
    }

    pub fn height_in(&self) -> f32 {
        self.height_px as f32 / self.dpi as f32
    }

    /// Screen pixels per proof pixel at zoom 1.0
    pub fn display_scale(&self) -> f32 {
        self.display_width_px / self.width_px as f32
    }

    /// On-screen size of the proof at the given zoom
    pub fn display_size(&self, zoom: f32) -> [f32; 2] {
        let scale = self.display_scale() * zoom;
        [self.width_px as f32 * scale, self.height_px as f32 * scale]
    }

    /// "17" × 11"" style label
    pub fn size_label(&self) -> String {
        format!("{}\" × {}\"", trim_float(self.width_in()), trim_float(self.height_in()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width_px == 0 || self.height_px == 0 || self.dpi == 0 {
            return Err(ConfigError::Invalid(format!(
                "proof geometry must be non-zero, got {}x{} at {} dpi",
                self.width_px, self.height_px, self.dpi
            )));
        }
        if !(self.display_width_px > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "display width must be positive, got {}",
                self.display_width_px
            )));
        }
        Ok(())
    }
}

fn trim_float(value: f32) -> String {
    if value.fract().abs() < f32::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Zoom limits applied by the zoom actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f32,
    pub max: f32,
    /// Multiplier per zoom-in / divisor per zoom-out
    pub step: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 4.0,
            step: 1.25,
        }
    }
}

impl ZoomConfig {
    pub fn zoom_in(&self, zoom: f32) -> f32 {
        (zoom * self.step).clamp(self.min, self.max)
    }

    pub fn zoom_out(&self, zoom: f32) -> f32 {
        (zoom / self.step).clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    pub geometry: ProofGeometry,
    pub zoom: ZoomConfig,
    /// Alignment grid spacing in screen pixels at zoom 1.0
    pub grid_spacing_px: f32,
    pub show_grid: bool,
    pub toast_lifetime_secs: f64,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            geometry: ProofGeometry::default(),
            zoom: ZoomConfig::default(),
            grid_spacing_px: 20.0,
            show_grid: true,
            toast_lifetime_secs: 3.0,
        }
    }
}

impl ProofConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults if unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        let zoom = &self.zoom;
        if !(zoom.min > 0.0 && zoom.min <= 1.0 && zoom.max >= 1.0 && zoom.step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom limits must bracket 1.0 with a step above 1.0, got {:?}",
                zoom
            )));
        }
        if !(self.grid_spacing_px > 0.0) {
            return Err(ConfigError::Invalid("grid spacing must be positive".to_string()));
        }
        Ok(())
    }
}

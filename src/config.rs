// src/config.rs

use crate::math::{
    error::{MathError, MathResult},
    geometry::mesh::MeshConfig,
    probability::{DEFAULT_HORIZON_DAYS, ProbabilityShape},
};
use serde::Deserialize;

pub const MIN_OPACITY: f64 = 0.1;
pub const DEFAULT_GRID_OUTLINE_WIDTH: f64 = 0.10;

/// Display parameters of a heatmap. They never change the underlying field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Cells below this probability are not shown
    pub min_probability: f64,
    /// Alpha of shown cells
    pub opacity: f64,
    pub grid_outline_width: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_probability: 0.0,
            opacity: 1.0,
            grid_outline_width: DEFAULT_GRID_OUTLINE_WIDTH,
        }
    }
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_probability(mut self, min_probability: f64) -> Self {
        self.min_probability = min_probability;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_grid_outline_width(mut self, width: f64) -> Self {
        self.grid_outline_width = width;
        self
    }

    /// Brings caller input into range: `min_probability` to `[0, 1]`,
    /// `opacity` to `[0.1, 1]`. NaN falls back to the default.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let clamp = |value: f64, min: f64, max: f64, fallback: f64| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(min, max)
            }
        };
        Self {
            min_probability: clamp(self.min_probability, 0.0, 1.0, defaults.min_probability),
            opacity: clamp(self.opacity, MIN_OPACITY, 1.0, defaults.opacity),
            grid_outline_width: if self.grid_outline_width.is_finite() {
                self.grid_outline_width.max(0.0)
            } else {
                defaults.grid_outline_width
            },
        }
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(0.0..=1.0).contains(&self.min_probability) {
            return Err(MathError::invalid_configuration(format!(
                "min_probability must be within [0, 1], got {}",
                self.min_probability
            )));
        }
        if !(MIN_OPACITY..=1.0).contains(&self.opacity) {
            return Err(MathError::invalid_configuration(format!(
                "opacity must be within [{MIN_OPACITY}, 1], got {}",
                self.opacity
            )));
        }
        if !self.grid_outline_width.is_finite() || self.grid_outline_width < 0.0 {
            return Err(MathError::invalid_configuration(format!(
                "grid_outline_width must be non-negative, got {}",
                self.grid_outline_width
            )));
        }
        Ok(())
    }
}

/// Everything a heatmap run can be configured with, as read from a JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mesh: MeshConfig,
    pub display: DisplayConfig,
    pub shape: ProbabilityShape,
    /// Forecast days ahead, clamped to 1..=30 when the key is built
    pub horizon_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mesh: MeshConfig::default(),
            display: DisplayConfig::default(),
            shape: ProbabilityShape::default(),
            horizon_days: i64::from(DEFAULT_HORIZON_DAYS),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> MathResult<()> {
        self.mesh.validate()?;
        self.display.validate()
    }
}

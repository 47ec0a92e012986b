// src/math/geometry/mesh/config.rs

use crate::math::error::{MathError, MathResult};
use serde::Deserialize;

/// Smallest accepted cell edge in kilometers.
pub const MIN_KM_STEP: f64 = 0.1;
pub const DEFAULT_KM_STEP: f64 = 1.0;

/// Configuration of a mesh build.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Requested cell edge length in kilometers, before clamping.
    pub km_step: f64,
    /// Extra margin around the projected rectangle in kilometers.
    pub padding_km: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            km_step: DEFAULT_KM_STEP,
            padding_km: 0.0,
        }
    }
}

impl MeshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_km_step(mut self, km_step: f64) -> Self {
        self.km_step = km_step;
        self
    }

    pub fn with_padding_km(mut self, padding_km: f64) -> Self {
        self.padding_km = padding_km;
        self
    }

    /// Cell edge after applying the 0.1 km floor. Zero, negative and NaN
    /// requests all land on the floor.
    pub fn effective_km_step(&self) -> f64 {
        clamp_km_step(self.km_step)
    }

    /// Cell edge in meters
    pub fn step_m(&self) -> f64 {
        self.effective_km_step() * 1000.0
    }

    pub fn padding_m(&self) -> f64 {
        self.padding_km * 1000.0
    }

    pub fn validate(&self) -> MathResult<()> {
        if !self.padding_km.is_finite() || self.padding_km < 0.0 {
            return Err(MathError::invalid_configuration(format!(
                "Mesh padding must be a non-negative number of kilometers, got {}",
                self.padding_km
            )));
        }
        if self.km_step.is_infinite() {
            return Err(MathError::invalid_configuration(
                "Mesh step must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Applies the minimum-resolution floor to a requested step in kilometers.
pub fn clamp_km_step(km_step: f64) -> f64 {
    // f64::max ignores NaN, so NaN also ends up on the floor
    km_step.max(MIN_KM_STEP)
}

// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Caller contract violation (inverted bounds, mismatched shapes, ...).
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A coordinate that the projection cannot represent. `x`/`y` hold the
    /// offending input: lon/lat for forward, easting/northing for inverse.
    #[error("Projection failed at ({x}, {y}): {reason}")]
    ProjectionError { x: f64, y: f64, reason: String },
}

impl MathError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn projection(x: f64, y: f64, reason: impl Into<String>) -> Self {
        Self::ProjectionError {
            x,
            y,
            reason: reason.into(),
        }
    }

    pub fn is_projection_error(&self) -> bool {
        matches!(self, Self::ProjectionError { .. })
    }
}

pub type MathResult<T> = Result<T, MathError>;

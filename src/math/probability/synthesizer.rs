// src/math/probability/synthesizer.rs

use super::{
    field::ProbabilityField,
    seed::{CellSeeder, ForecastKey},
};
use crate::math::geometry::mesh::Mesh;
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

/// How a uniform draw is turned into a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityShape {
    /// The draw itself
    Uniform,
    /// The draw squared, skewing the field toward low values
    #[default]
    Squared,
}

impl ProbabilityShape {
    fn apply(self, draw: f64) -> f64 {
        match self {
            Self::Uniform => draw,
            Self::Squared => draw * draw,
        }
    }
}

/// Assigns a reproducible pseudo-random probability to every cell of a mesh.
///
/// The result depends only on the key and on the `(row, col)` set of the
/// mesh, never on cell coordinates or on call history.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilitySynthesizer {
    shape: ProbabilityShape,
}

impl ProbabilitySynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: ProbabilityShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape(&self) -> ProbabilityShape {
        self.shape
    }

    pub fn synthesize(&self, mesh: &Mesh, key: &ForecastKey) -> ProbabilityField {
        let seeder = CellSeeder::new(key);
        let values = mesh
            .iter()
            .map(|cell| {
                let draw: f64 = seeder.rng_for(cell.row, cell.col).random();
                self.shape.apply(draw)
            })
            .collect();

        debug!(
            "Synthesized {}x{} probabilities for {} ({:?})",
            mesh.rows(),
            mesh.cols(),
            key,
            self.shape
        );
        ProbabilityField::from_values(mesh.rows(), mesh.cols(), mesh.step_m(), values)
    }
}

/// Synthesizes with the default shape and horizon.
pub fn synthesize(
    mesh: &Mesh,
    region_key: &str,
    species: &str,
    date: &str,
    time_of_day: &str,
) -> ProbabilityField {
    let key = ForecastKey::new(region_key, species, date, time_of_day);
    ProbabilitySynthesizer::new().synthesize(mesh, &key)
}

// src/math/probability/mod.rs

pub mod field;
pub mod seed;
pub mod synthesizer;

pub use field::ProbabilityField;
pub use seed::{CellSeeder, DEFAULT_HORIZON_DAYS, ForecastKey, clamp_horizon};
pub use synthesizer::{ProbabilityShape, ProbabilitySynthesizer, synthesize};

// src/math/probability/seed/mod.rs

pub mod cell_seed;
pub mod key;

pub use cell_seed::CellSeeder;
pub use key::{DEFAULT_HORIZON_DAYS, ForecastKey, clamp_horizon};

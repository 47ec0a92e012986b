// src/math/geometry/mesh/mod.rs

pub mod builder;
pub mod cell;
pub mod config;

pub use self::builder::{MeshBuilder, build_mesh};
pub use self::cell::{GridCell, Mesh};
pub use self::config::{DEFAULT_KM_STEP, MIN_KM_STEP, MeshConfig, clamp_km_step};

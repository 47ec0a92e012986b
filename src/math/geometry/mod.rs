// src/math/geometry/mod.rs

pub mod mesh;
pub mod projection;

// Re-exports of the core geometry types
pub use self::mesh::{GridCell, Mesh, MeshBuilder, MeshConfig, build_mesh};
pub use self::projection::{
    Hemisphere, ProjectionContext, TransverseMercator, choose_context,
};

// src/heatmap/mod.rs

pub mod assembler;
pub mod color_scale;
pub mod geojson;

pub use assembler::{RenderCell, assemble, assemble_with_scale};
pub use color_scale::{ColorScale, Rgb};
pub use geojson::to_feature_collection;

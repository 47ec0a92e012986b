// src/lib.rs
//! Probability heatmaps of wildlife appearance on a metric grid.
//!
//! A geographic box is projected to UTM, tiled into square cells, and each
//! cell gets a reproducible synthetic probability. The assembled cells can be
//! exported as GeoJSON or dumped as SVG.

pub mod config;
pub mod debug;
pub mod heatmap;
pub mod math;
pub mod pipeline;
pub mod regions;

pub use config::{AppConfig, DisplayConfig};
pub use pipeline::{HeatmapLayer, HeatmapPipeline, HeatmapRequest};

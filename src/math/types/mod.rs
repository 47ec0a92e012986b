// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export frequently used external types
pub use geo::{Coord, LineString, Polygon};

/// Planar point in projected meters (x = easting, y = northing).
pub type Point2D = Coord<f64>;
/// Geographic point, x = longitude, y = latitude, both in degrees.
pub type LonLat = Coord<f64>;

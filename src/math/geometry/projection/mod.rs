// src/math/geometry/projection/mod.rs

pub mod context;
pub mod transverse_mercator;

pub use self::context::{Hemisphere, ProjectionContext, zone_for_longitude};
pub use self::transverse_mercator::TransverseMercator;

use crate::math::types::GeoBounds;

/// Chooses the UTM context for a bounding box. Never fails for a valid box.
pub fn choose_context(bounds: &GeoBounds) -> ProjectionContext {
    ProjectionContext::choose(bounds)
}

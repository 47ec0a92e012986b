// src/regions/resolver.rs

use super::{
    centers::region_center,
    key::{RegionKey, Species},
    table::{LookupTable, RegionLookup},
};
use crate::math::types::GeoBounds;
use std::collections::HashMap;
use tracing::debug;

/// Half-size in degrees of the box drawn around a region center.
pub const CENTER_HALF_SIZE_DEG: f64 = 0.8;

/// Resolves a region to its bounding box: the injected table first, then a
/// ±0.8° box around the built-in region center.
#[derive(Debug, Clone, Default)]
pub struct BoundsResolver {
    table: LookupTable<GeoBounds>,
}

impl BoundsResolver {
    pub fn new(table: LookupTable<GeoBounds>) -> Self {
        Self { table }
    }

    pub fn resolve(&self, key: &RegionKey) -> Option<GeoBounds> {
        if let Some(bounds) = self.table.lookup(key) {
            return Some(bounds);
        }
        let center = region_center(key)?;
        debug!("No table bounds for {}, using center box", key);
        GeoBounds::around(center, CENTER_HALF_SIZE_DEG).ok()
    }
}

impl RegionLookup<GeoBounds> for BoundsResolver {
    fn lookup(&self, key: &RegionKey) -> Option<GeoBounds> {
        self.resolve(key)
    }
}

/// Per-region species presence flags, `{"東京都": {"熊": false}}`.
///
/// Anything not listed counts as present.
#[derive(Debug, Clone, Default)]
pub struct PresenceTable {
    table: LookupTable<HashMap<Species, bool>>,
}

impl PresenceTable {
    pub fn new(table: LookupTable<HashMap<Species, bool>>) -> Self {
        Self { table }
    }

    pub fn is_present(&self, key: &RegionKey, species: Species) -> bool {
        self.table
            .get(key)
            .and_then(|flags| flags.get(&species).copied())
            .unwrap_or(true)
    }
}

// src/regions/mod.rs

pub mod centers;
pub mod key;
pub mod resolver;
pub mod table;

pub use centers::{JAPAN_CENTER, prefectures, region_center};
pub use key::{HOKKAIDO, HOKKAIDO_PARTS, RegionKey, Species, TimeOfDay};
pub use resolver::{BoundsResolver, CENTER_HALF_SIZE_DEG, PresenceTable};
pub use table::{LookupTable, RegionLookup, TableError};

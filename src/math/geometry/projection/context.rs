// src/math/geometry/projection/context.rs

use super::transverse_mercator::TransverseMercator;
use crate::math::{error::*, types::*, utils::*};
use std::fmt;
use tracing::{debug, warn};

/// Transverse Mercator diverges a quarter turn away from the central meridian.
const MAX_CENTRAL_MERIDIAN_OFFSET_DEG: f64 = 90.0;

/// Hemisphere of a UTM grid; selects the false northing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn from_latitude(lat: f64) -> Self {
        if lat >= 0.0 { Self::North } else { Self::South }
    }

    fn false_northing(self) -> f64 {
        match self {
            Self::North => 0.0,
            Self::South => constants::UTM_FALSE_NORTHING_SOUTH,
        }
    }
}

/// Metric coordinate system used for one mesh build: a single UTM zone.
///
/// Derived from a bounding box by [`ProjectionContext::choose`]; all
/// projections of that build go through the same context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionContext {
    zone: u8,
    hemisphere: Hemisphere,
    central_meridian: f64,
    projection: TransverseMercator,
}

impl ProjectionContext {
    /// Context for an explicit zone (1..=60) and hemisphere.
    pub fn for_zone(zone: u8, hemisphere: Hemisphere) -> MathResult<Self> {
        if !(1..=constants::UTM_ZONE_COUNT).contains(&zone) {
            return Err(MathError::invalid_configuration(format!(
                "UTM zone must be within 1..=60, got {zone}"
            )));
        }
        Ok(Self::from_valid_zone(zone, hemisphere))
    }

    fn from_valid_zone(zone: u8, hemisphere: Hemisphere) -> Self {
        Self {
            zone,
            hemisphere,
            central_meridian: -180.0 + (f64::from(zone) - 0.5) * constants::UTM_ZONE_WIDTH_DEG,
            projection: TransverseMercator::wgs84_utm(),
        }
    }

    /// Picks the zone whose central meridian is closest to the center of
    /// `bounds` and the hemisphere of its center latitude.
    ///
    /// Boxes wider than one zone still get the center zone; the distortion
    /// towards the edges is accepted.
    pub fn choose(bounds: &GeoBounds) -> Self {
        let center = bounds.center();
        let zone = zone_for_longitude(center.x);
        let hemisphere = Hemisphere::from_latitude(center.y);

        if bounds.width_deg() > constants::UTM_ZONE_WIDTH_DEG {
            warn!(
                zone,
                width_deg = bounds.width_deg(),
                "Bounding box spans more than one UTM zone, using the center zone"
            );
        }

        let context = Self::from_valid_zone(zone, hemisphere);
        debug!(epsg = context.epsg_code(), %bounds, "Chose projection context");
        context
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Central meridian in degrees
    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    /// EPSG code of the WGS84 / UTM grid (326zz north, 327zz south)
    pub fn epsg_code(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + u32::from(self.zone)
    }

    /// Longitude/latitude in degrees to easting/northing in meters.
    pub fn forward(&self, lon: f64, lat: f64) -> MathResult<Point2D> {
        if !lon.is_finite() {
            return Err(MathError::projection(lon, lat, "non-finite longitude"));
        }
        let delta_lon = angles::longitude_offset(lon, self.central_meridian);
        if delta_lon.abs() >= MAX_CENTRAL_MERIDIAN_OFFSET_DEG {
            return Err(MathError::projection(
                lon,
                lat,
                format!(
                    "longitude is {:.1}° from the central meridian {}° of {}",
                    delta_lon.abs(),
                    self.central_meridian,
                    self
                ),
            ));
        }
        let p = self
            .projection
            .forward(delta_lon, lat)
            .map_err(|_| MathError::projection(lon, lat, "point cannot be projected to UTM"))?;
        Ok(Coord {
            x: p.x + constants::UTM_FALSE_EASTING,
            y: p.y + self.hemisphere.false_northing(),
        })
    }

    /// Easting/northing in meters back to longitude/latitude in degrees.
    /// The longitude is wrapped into [-180, 180).
    pub fn inverse(&self, x: f64, y: f64) -> MathResult<LonLat> {
        let g = self
            .projection
            .inverse(
                x - constants::UTM_FALSE_EASTING,
                y - self.hemisphere.false_northing(),
            )
            .map_err(|_| MathError::projection(x, y, "point cannot be unprojected from UTM"))?;
        Ok(Coord {
            x: angles::normalize_longitude(g.x + self.central_meridian),
            y: g.y,
        })
    }

    pub fn forward_coord(&self, point: LonLat) -> MathResult<Point2D> {
        self.forward(point.x, point.y)
    }

    pub fn inverse_coord(&self, point: Point2D) -> MathResult<LonLat> {
        self.inverse(point.x, point.y)
    }
}

impl fmt::Display for ProjectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hemisphere = match self.hemisphere {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        };
        write!(f, "UTM {}{} (EPSG:{})", self.zone, hemisphere, self.epsg_code())
    }
}

/// UTM zone number for a longitude; 180°E folds into zone 1 like -180°.
pub fn zone_for_longitude(lon: f64) -> u8 {
    let lon = angles::normalize_longitude(lon);
    let zone = ((lon + 180.0) / constants::UTM_ZONE_WIDTH_DEG).floor() as i64 + 1;
    zone.clamp(1, i64::from(constants::UTM_ZONE_COUNT)) as u8
}

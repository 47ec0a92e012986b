// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic bounding box in degrees.
///
/// Always satisfies `min_lon < max_lon` and `min_lat < max_lat`; the only way
/// to obtain one is through [`GeoBounds::new`] (or deserialization, which
/// goes through the same check).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct GeoBounds {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl GeoBounds {
    /// Creates a new bounding box, failing fast on inverted or non-finite input.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> MathResult<Self> {
        let values = [min_lon, min_lat, max_lon, max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::invalid_configuration(format!(
                "Bounding box contains non-finite values: {values:?}"
            )));
        }
        if min_lat < -90.0 || max_lat > 90.0 {
            return Err(MathError::invalid_configuration(format!(
                "Latitudes must lie within [-90, 90], got {min_lat}..{max_lat}"
            )));
        }
        if min_lon >= max_lon || min_lat >= max_lat {
            return Err(MathError::invalid_configuration(format!(
                "Invalid bounding box: min ({min_lon}, {min_lat}) must be below max ({max_lon}, {max_lat})"
            )));
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Box of `± half_extent_deg` around a center point.
    pub fn around(center: LonLat, half_extent_deg: f64) -> MathResult<Self> {
        Self::new(
            center.x - half_extent_deg,
            center.y - half_extent_deg,
            center.x + half_extent_deg,
            center.y + half_extent_deg,
        )
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn width_deg(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> LonLat {
        Coord {
            x: (self.min_lon + self.max_lon) * 0.5,
            y: (self.min_lat + self.max_lat) * 0.5,
        }
    }

    pub fn contains(&self, point: LonLat) -> bool {
        point.x >= self.min_lon
            && point.x <= self.max_lon
            && point.y >= self.min_lat
            && point.y <= self.max_lat
    }

    /// The four corners, counter-clockwise starting at the south-west corner
    pub fn corners(&self) -> [LonLat; 4] {
        [
            Coord { x: self.min_lon, y: self.min_lat },
            Coord { x: self.max_lon, y: self.min_lat },
            Coord { x: self.max_lon, y: self.max_lat },
            Coord { x: self.min_lon, y: self.max_lat },
        ]
    }

    /// Grows the box by `margin_deg` on every side.
    pub fn expanded(&self, margin_deg: f64) -> MathResult<Self> {
        Self::new(
            self.min_lon - margin_deg,
            self.min_lat - margin_deg,
            self.max_lon + margin_deg,
            self.max_lat + margin_deg,
        )
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl TryFrom<[f64; 4]> for GeoBounds {
    type Error = MathError;

    fn try_from(value: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<GeoBounds> for [f64; 4] {
    fn from(bounds: GeoBounds) -> Self {
        bounds.to_array()
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GeoBounds(lon {:.4}..{:.4}, lat {:.4}..{:.4})",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}

/// Axis-aligned rectangle in projected meters.
///
/// Unlike [`GeoBounds`] it may be degenerate (zero width or height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Smallest rectangle enclosing all points, `None` for an empty iterator
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut min = first_point;
        let mut max = first_point;

        for point in points_iter {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        Some(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min: Coord {
                x: self.min.x - margin,
                y: self.min.y - margin,
            },
            max: Coord {
                x: self.max.x + margin,
                y: self.max.y + margin,
            },
        }
    }

    pub fn contains_point(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bounds2D(({:.1}, {:.1}) to ({:.1}, {:.1}))",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = GeoBounds::new(140.0, 35.0, 139.0, 36.0).unwrap_err();
        assert!(matches!(err, MathError::InvalidConfiguration { .. }));
        assert!(GeoBounds::new(139.0, 35.0, 139.0, 36.0).is_err());
        assert!(GeoBounds::new(139.0, 36.0, 140.0, 35.0).is_err());
        assert!(GeoBounds::new(f64::NAN, 35.0, 140.0, 36.0).is_err());
    }

    #[test]
    fn test_latitude_outside_globe_rejected() {
        let err = GeoBounds::new(10.0, 89.0, 11.0, 91.0).unwrap_err();
        assert!(matches!(err, MathError::InvalidConfiguration { .. }));
        assert!(GeoBounds::new(10.0, -95.0, 11.0, -80.0).is_err());
        assert!(GeoBounds::new(10.0, 89.0, 11.0, 90.0).is_ok());
    }

    #[test]
    fn test_around_center() {
        let bounds = GeoBounds::around(Coord { x: 139.69, y: 35.69 }, 0.8).unwrap();
        assert!((bounds.min_lon() - 138.89).abs() < 1e-9);
        assert!((bounds.max_lat() - 36.49).abs() < 1e-9);
        let center = bounds.center();
        assert!((center.x - 139.69).abs() < 1e-9);
        assert!((center.y - 35.69).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GeoBounds = serde_json::from_str("[139.0, 35.0, 140.0, 36.0]").unwrap();
        assert_eq!(ok.to_array(), [139.0, 35.0, 140.0, 36.0]);
        let bad: Result<GeoBounds, _> = serde_json::from_str("[140.0, 35.0, 139.0, 36.0]");
        assert!(bad.is_err());
    }

    #[test]
    fn test_bounds2d_from_points() {
        let bounds = Bounds2D::from_points_iter([
            Coord { x: 3.0, y: -1.0 },
            Coord { x: -2.0, y: 4.0 },
            Coord { x: 1.0, y: 1.0 },
        ])
        .unwrap();
        assert_eq!(bounds.min, Coord { x: -2.0, y: -1.0 });
        assert_eq!(bounds.max, Coord { x: 3.0, y: 4.0 });
        assert_eq!(bounds.width(), 5.0);
        assert!(Bounds2D::from_points_iter(std::iter::empty()).is_none());
    }
}

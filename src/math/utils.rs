// src/math/utils.rs

/// Mathematical and geodetic constants
pub mod constants {
    pub const EPSILON_F64: f64 = 1e-10;
    /// Tolerance for the forward/inverse round trip, in degrees.
    pub const ROUND_TRIP_TOLERANCE_DEG: f64 = 1e-6;

    /// WGS84 semi-major axis in meters
    pub const WGS84_A: f64 = 6_378_137.0;
    /// WGS84 flattening
    pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

    /// UTM scale factor on the central meridian
    pub const UTM_K0: f64 = 0.9996;
    pub const UTM_FALSE_EASTING: f64 = 500_000.0;
    pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
    pub const UTM_ZONE_WIDTH_DEG: f64 = 6.0;
    pub const UTM_ZONE_COUNT: u8 = 60;
}

/// Float comparisons with tolerance
pub mod comparison {
    use super::constants::EPSILON_F64;

    /// True if both values are (nearly) equal
    pub fn nearly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON_F64
    }

    /// Same as [`nearly_equal`] with a custom tolerance
    pub fn nearly_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Linear interpolation
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }

    /// Inverse linear interpolation, 0.0 for an empty interval
    pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
        if nearly_equal(a, b) {
            0.0
        } else {
            (value - a) / (b - a)
        }
    }
}

/// Angle helpers (degrees)
pub mod angles {
    /// Wraps a longitude into [-180, 180)
    pub fn normalize_longitude(lon: f64) -> f64 {
        let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
    }

    /// Signed difference `lon - reference`, wrapped into [-180, 180)
    pub fn longitude_offset(lon: f64, reference: f64) -> f64 {
        normalize_longitude(lon - reference)
    }
}

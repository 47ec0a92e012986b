// src/math/geometry/projection/transverse_mercator.rs

use crate::math::{error::*, types::*, utils::*};

/// Order of the Krüger series. Six terms keep the error in the nanometer
/// range inside a zone and well below a millimeter a few zones away.
const SERIES_ORDER: usize = 6;
const NEWTON_MAX_ITERATIONS: usize = 16;
const NEWTON_TOLERANCE: f64 = 1e-14;

/// Transverse Mercator on an ellipsoid, Krüger series to sixth order in the
/// third flattening `n`.
///
/// Works in meters relative to the central meridian and the equator; the
/// false easting/northing of a concrete grid is applied by
/// [`ProjectionContext`](super::ProjectionContext).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    /// First eccentricity
    e: f64,
    /// Rectifying radius times the scale factor on the central meridian
    k0_a: f64,
    /// Forward series coefficients (α₁..α₆)
    alpha: [f64; SERIES_ORDER],
    /// Inverse series coefficients (β₁..β₆)
    beta: [f64; SERIES_ORDER],
}

impl TransverseMercator {
    /// Builds the series for an ellipsoid with semi-major axis `a`, flattening
    /// `f` and central scale factor `k0`.
    pub fn new(a: f64, f: f64, k0: f64) -> Self {
        let e = (f * (2.0 - f)).sqrt();
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying_radius = a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1_983_433.0 * n6 / 1_935_360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167_603.0 * n6 / 181_440.0,
            49561.0 * n4 / 161_280.0 - 179.0 * n5 / 168.0 + 6_601_661.0 * n6 / 7_257_600.0,
            34729.0 * n5 / 80640.0 - 3_418_889.0 * n6 / 1_995_840.0,
            212_378_941.0 * n6 / 319_334_400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604_800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1_118_711.0 * n6 / 3_870_720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161_280.0 - 11.0 * n5 / 504.0 - 830_251.0 * n6 / 7_257_600.0,
            4583.0 * n5 / 161_280.0 - 108_847.0 * n6 / 3_991_680.0,
            20_648_693.0 * n6 / 638_668_800.0,
        ];

        Self {
            e,
            k0_a: k0 * rectifying_radius,
            alpha,
            beta,
        }
    }

    /// WGS84 ellipsoid with the UTM scale factor.
    pub fn wgs84_utm() -> Self {
        Self::new(constants::WGS84_A, constants::WGS84_F, constants::UTM_K0)
    }

    /// Projects a point given as longitude offset from the central meridian
    /// and latitude, both in degrees. Returns meters `(x, y)` relative to the
    /// central meridian / equator.
    pub fn forward(&self, delta_lon_deg: f64, lat_deg: f64) -> MathResult<Point2D> {
        if !delta_lon_deg.is_finite() || !lat_deg.is_finite() {
            return Err(MathError::projection(
                delta_lon_deg,
                lat_deg,
                "non-finite geographic coordinate",
            ));
        }
        if lat_deg.abs() >= 90.0 {
            return Err(MathError::projection(
                delta_lon_deg,
                lat_deg,
                "transverse Mercator is undefined at the poles",
            ));
        }

        let phi = lat_deg.to_radians();
        let lambda = delta_lon_deg.to_radians();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let tau = phi.tan();
        let tau_prime = self.conformal_tau(tau);

        let xi_prime = tau_prime.atan2(cos_lambda);
        let eta_prime = (sin_lambda / (tau_prime * tau_prime + cos_lambda * cos_lambda).sqrt()).asinh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha_j) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha_j * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha_j * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        let projected = Coord {
            x: self.k0_a * eta,
            y: self.k0_a * xi,
        };
        if !projected.x.is_finite() || !projected.y.is_finite() {
            return Err(MathError::projection(
                delta_lon_deg,
                lat_deg,
                "forward projection produced a non-finite value",
            ));
        }
        Ok(projected)
    }

    /// Inverse of [`forward`](Self::forward). Returns `(delta_lon_deg, lat_deg)`.
    pub fn inverse(&self, x: f64, y: f64) -> MathResult<LonLat> {
        if !x.is_finite() || !y.is_finite() {
            return Err(MathError::projection(x, y, "non-finite planar coordinate"));
        }

        let eta = x / self.k0_a;
        let xi = y / self.k0_a;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta_j) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_prime -= beta_j * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta_j * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta_prime = eta_prime.sinh();
        let (sin_xi_prime, cos_xi_prime) = xi_prime.sin_cos();
        let tau_prime =
            sin_xi_prime / (sinh_eta_prime * sinh_eta_prime + cos_xi_prime * cos_xi_prime).sqrt();

        let tau = self.geographic_tau(tau_prime);
        let lat = tau.atan().to_degrees();
        let delta_lon = sinh_eta_prime.atan2(cos_xi_prime).to_degrees();

        if !lat.is_finite() || !delta_lon.is_finite() {
            return Err(MathError::projection(
                x,
                y,
                "inverse projection produced a non-finite value",
            ));
        }
        Ok(Coord { x: delta_lon, y: lat })
    }

    /// tan of the conformal latitude for a given tan of the geodetic latitude
    fn conformal_tau(&self, tau: f64) -> f64 {
        let sigma = (self.e * (self.e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt()
    }

    /// Newton iteration inverting [`conformal_tau`](Self::conformal_tau)
    fn geographic_tau(&self, tau_prime: f64) -> f64 {
        let one_minus_e2 = 1.0 - self.e * self.e;
        let mut tau = tau_prime;
        for _ in 0..NEWTON_MAX_ITERATIONS {
            let tau_i_prime = self.conformal_tau(tau);
            let delta = (tau_prime - tau_i_prime) / (1.0 + tau_i_prime * tau_i_prime).sqrt()
                * (1.0 + one_minus_e2 * tau * tau)
                / (one_minus_e2 * (1.0 + tau * tau).sqrt());
            tau += delta;
            if delta.abs() < NEWTON_TOLERANCE * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

impl Default for TransverseMercator {
    fn default() -> Self {
        Self::wgs84_utm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_central_meridian_maps_to_zero_easting() {
        let tm = TransverseMercator::wgs84_utm();
        let p = tm.forward(0.0, 35.0).unwrap();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        // Meridian arc length to 35°N times k0
        assert_abs_diff_eq!(p.y, 3_873_043.06, epsilon = 0.01);
    }

    #[test]
    fn test_equator_origin() {
        let tm = TransverseMercator::wgs84_utm();
        let p = tm.forward(0.0, 0.0).unwrap();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let tm = TransverseMercator::wgs84_utm();
        let east = tm.forward(2.5, 40.0).unwrap();
        let west = tm.forward(-2.5, 40.0).unwrap();
        let south = tm.forward(2.5, -40.0).unwrap();
        assert_abs_diff_eq!(east.x, -west.x, epsilon = 1e-6);
        assert_abs_diff_eq!(east.y, west.y, epsilon = 1e-6);
        assert_abs_diff_eq!(east.y, -south.y, epsilon = 1e-6);
    }

    #[test]
    fn test_round_trip_far_from_central_meridian() {
        let tm = TransverseMercator::wgs84_utm();
        for &(dlon, lat) in &[(0.0, 0.0), (3.0, 10.0), (-6.0, 45.0), (9.0, 60.0), (-12.0, -30.0)] {
            let p = tm.forward(dlon, lat).unwrap();
            let back = tm.inverse(p.x, p.y).unwrap();
            assert_abs_diff_eq!(back.x, dlon, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_poles_are_rejected() {
        let tm = TransverseMercator::wgs84_utm();
        let err = tm.forward(0.0, 90.0).unwrap_err();
        assert!(matches!(err, MathError::ProjectionError { y, .. } if y == 90.0));
        assert!(tm.forward(0.0, -91.0).is_err());
        assert!(tm.forward(f64::NAN, 10.0).is_err());
        assert!(tm.inverse(f64::INFINITY, 0.0).is_err());
    }
}

// src/heatmap/color_scale.rs

use crate::math::utils::comparison::{inverse_lerp, lerp};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Continuous color scale over the fixed domain `[0, 1]`.
///
/// Stops are sorted by position; colors between stops are interpolated
/// linearly per channel. Values outside the domain are clamped, so the same
/// probability maps to the same color for every field.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<(f64, Rgb)>,
}

impl ColorScale {
    /// The blue → purple scale used for appearance probabilities.
    pub fn blue_purple() -> Self {
        Self {
            stops: vec![
                (0.00, Rgb::new(230, 244, 255)),
                (0.10, Rgb::new(179, 218, 255)),
                (0.25, Rgb::new(128, 191, 255)),
                (0.50, Rgb::new(102, 140, 255)),
                (0.75, Rgb::new(128, 80, 200)),
                (1.00, Rgb::new(128, 0, 200)),
            ],
        }
    }

    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    pub fn sample(&self, value: f64) -> Rgb {
        let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

        let upper = self
            .stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return self.stops[0].1;
        }
        let (p0, c0) = self.stops[upper - 1];
        let (p1, c1) = self.stops[upper];
        let local = inverse_lerp(p0, p1, t);
        let channel = |a: u8, b: u8| lerp(f64::from(a), f64::from(b), local).round() as u8;
        Rgb::new(channel(c0.r, c1.r), channel(c0.g, c1.g), channel(c0.b, c1.b))
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::blue_purple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let scale = ColorScale::blue_purple();
        assert_eq!(scale.sample(0.0), Rgb::new(230, 244, 255));
        assert_eq!(scale.sample(1.0), Rgb::new(128, 0, 200));
        assert_eq!(scale.sample(0.5), Rgb::new(102, 140, 255));
    }

    #[test]
    fn test_interpolates_between_stops() {
        let scale = ColorScale::blue_purple();
        // halfway between 0.50 and 0.75
        assert_eq!(scale.sample(0.625), Rgb::new(115, 110, 228));
    }

    #[test]
    fn test_out_of_domain_is_clamped() {
        let scale = ColorScale::blue_purple();
        assert_eq!(scale.sample(-3.0), scale.sample(0.0));
        assert_eq!(scale.sample(7.0), scale.sample(1.0));
        assert_eq!(scale.sample(f64::NAN), scale.sample(0.0));
    }

    #[test]
    fn test_formats() {
        let c = Rgb::new(128, 0, 200);
        assert_eq!(c.to_string(), "rgb(128,0,200)");
        assert_eq!(c.to_hex(), "#8000c8");
    }
}

// src/math/scalar_field.rs

use crate::math::types::Point2D;

/// A two-dimensional scalar field on a regular grid.
///
/// Lets summaries and debug output work on any grid-shaped field without
/// knowing how the values are stored.
pub trait ScalarField2D {
    /// Width of the field in cells (columns).
    fn width(&self) -> usize;

    /// Height of the field in cells (rows).
    fn height(&self) -> usize;

    /// Edge length of one cell in world units.
    fn cell_size(&self) -> f64;

    /// Value of cell `(x_idx, y_idx)` (column, row), `None` outside the grid.
    fn value_at(&self, x_idx: usize, y_idx: usize) -> Option<f64>;

    /// Offset of the lower-left corner of a cell from the grid origin.
    fn cell_to_world(&self, x_idx: usize, y_idx: usize) -> Point2D {
        Point2D {
            x: x_idx as f64 * self.cell_size(),
            y: y_idx as f64 * self.cell_size(),
        }
    }
}

/// Basic statistics over all cells of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FieldStats {
    /// `None` for an empty field
    pub fn of<F: ScalarField2D + ?Sized>(field: &F) -> Option<Self> {
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for y_idx in 0..field.height() {
            for x_idx in 0..field.width() {
                if let Some(value) = field.value_at(x_idx, y_idx) {
                    count += 1;
                    min = min.min(value);
                    max = max.max(value);
                    sum += value;
                }
            }
        }
        (count > 0).then(|| Self {
            count,
            min,
            max,
            mean: sum / count as f64,
        })
    }

    /// Number of values at or above `threshold`
    pub fn count_at_least<F: ScalarField2D + ?Sized>(field: &F, threshold: f64) -> usize {
        (0..field.height())
            .flat_map(|y_idx| (0..field.width()).map(move |x_idx| (x_idx, y_idx)))
            .filter_map(|(x_idx, y_idx)| field.value_at(x_idx, y_idx))
            .filter(|value| *value >= threshold)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp;

    impl ScalarField2D for Ramp {
        fn width(&self) -> usize {
            4
        }
        fn height(&self) -> usize {
            2
        }
        fn cell_size(&self) -> f64 {
            250.0
        }
        fn value_at(&self, x_idx: usize, y_idx: usize) -> Option<f64> {
            (x_idx < 4 && y_idx < 2).then(|| (y_idx * 4 + x_idx) as f64 / 7.0)
        }
    }

    #[test]
    fn test_stats() {
        let stats = FieldStats::of(&Ramp).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert_eq!(FieldStats::count_at_least(&Ramp, 0.5), 4);
    }

    #[test]
    fn test_cell_to_world() {
        let p = Ramp.cell_to_world(3, 1);
        assert_eq!(p, Point2D { x: 750.0, y: 250.0 });
    }
}

// src/math/probability/field.rs

use crate::math::scalar_field::ScalarField2D;

/// One probability value per mesh cell, stored in the mesh's row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityField {
    rows: usize,
    cols: usize,
    step_m: f64,
    values: Vec<f64>,
}

impl ProbabilityField {
    pub(crate) fn from_values(rows: usize, cols: usize, step_m: f64, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        Self {
            rows,
            cols,
            step_m,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`, comparable with `Mesh::shape`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.values[row * self.cols + col])
    }
}

impl ScalarField2D for ProbabilityField {
    fn width(&self) -> usize {
        self.cols
    }

    fn height(&self) -> usize {
        self.rows
    }

    fn cell_size(&self) -> f64 {
        self.step_m
    }

    fn value_at(&self, x_idx: usize, y_idx: usize) -> Option<f64> {
        self.get(y_idx, x_idx)
    }
}

// src/math/geometry/mesh/cell.rs

use crate::math::{geometry::projection::ProjectionContext, types::*};

/// One square mesh cell, expressed in longitude/latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    /// Inverse-projected midpoint of the projected square
    pub center: LonLat,
    /// South-west, south-east, north-east, north-west (projected orientation)
    pub corners: [LonLat; 4],
}

impl GridCell {
    /// Closed polygon ring (first corner repeated at the end).
    pub fn polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.corners.to_vec()), vec![])
    }
}

/// Ordered set of cells covering a bounding box at one resolution.
///
/// Cells are stored row-major: row 0 first, columns ascending inside a row.
/// A cell is addressed by `(row, col)`; its index is `row * cols + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(super) cells: Vec<GridCell>,
    pub(super) rows: usize,
    pub(super) cols: usize,
    pub(super) step_m: f64,
    pub(super) origin: Point2D,
    pub(super) bounds: GeoBounds,
    pub(super) context: ProjectionContext,
}

impl Mesh {
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridCell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A mesh always has at least one cell; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell edge length in meters (after clamping)
    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    /// Projected south-west anchor of cell (0, 0)
    pub fn origin(&self) -> Point2D {
        self.origin
    }

    /// The geographic box the mesh was built for
    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn context(&self) -> &ProjectionContext {
        &self.context
    }

    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.index_of(row, col).map(|index| &self.cells[index])
    }

    /// Projected square of one cell
    pub fn projected_cell(&self, row: usize, col: usize) -> Option<Bounds2D> {
        self.index_of(row, col)?;
        let min = Coord {
            x: self.origin.x + col as f64 * self.step_m,
            y: self.origin.y + row as f64 * self.step_m,
        };
        let max = Coord {
            x: min.x + self.step_m,
            y: min.y + self.step_m,
        };
        Some(Bounds2D { min, max })
    }

    /// Projected rectangle covered by all cells together
    pub fn projected_extent(&self) -> Bounds2D {
        Bounds2D {
            min: self.origin,
            max: Coord {
                x: self.origin.x + self.cols as f64 * self.step_m,
                y: self.origin.y + self.rows as f64 * self.step_m,
            },
        }
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a GridCell;
    type IntoIter = std::slice::Iter<'a, GridCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// src/math/geometry/mesh/builder.rs

use super::{
    cell::{GridCell, Mesh},
    config::MeshConfig,
};
use crate::math::{
    error::*,
    geometry::projection::ProjectionContext,
    types::*,
    utils::*,
};
use tracing::{debug, info};

/// Interior samples per bbox edge when searching the projected extent.
const EDGE_SUBDIVISIONS: usize = 8;

/// Builds a mesh for `bounds` with cells of `km_step` kilometers.
///
/// `km_step` below 0.1 is raised to 0.1.
pub fn build_mesh(bounds: &GeoBounds, km_step: f64) -> MathResult<Mesh> {
    MeshBuilder::new(MeshConfig::new().with_km_step(km_step)).build(bounds)
}

/// Tiles a projected bounding box into uniform square cells.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    config: MeshConfig,
}

impl MeshBuilder {
    pub fn new(config: MeshConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Validates raw box edges before building. Inverted or empty boxes are a
    /// configuration error.
    pub fn build_from_extent(
        &self,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> MathResult<Mesh> {
        let bounds = GeoBounds::new(min_lon, min_lat, max_lon, max_lat)?;
        self.build(&bounds)
    }

    pub fn build(&self, bounds: &GeoBounds) -> MathResult<Mesh> {
        let context = ProjectionContext::choose(bounds);
        self.build_with_context(bounds, context)
    }

    /// Builds the mesh in an explicitly chosen coordinate system.
    pub fn build_with_context(
        &self,
        bounds: &GeoBounds,
        context: ProjectionContext,
    ) -> MathResult<Mesh> {
        self.config.validate()?;
        let step_m = self.config.step_m();

        let extent = projected_extent(bounds, &context)?.padded(self.config.padding_m());
        let cols = cell_count(extent.width(), step_m);
        let rows = cell_count(extent.height(), step_m);
        debug!(%extent, rows, cols, step_m, "Tiling projected extent");

        let origin = extent.min;
        let unprojector = Unprojector {
            context: &context,
            reference_lon: bounds.center().x,
        };
        let lattice = VertexLattice::build(&unprojector, origin, step_m, rows, cols)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let center = unprojector.inverse(
                    origin.x + (col as f64 + 0.5) * step_m,
                    origin.y + (row as f64 + 0.5) * step_m,
                )?;
                cells.push(GridCell {
                    row,
                    col,
                    center,
                    corners: [
                        lattice.vertex(row, col),
                        lattice.vertex(row, col + 1),
                        lattice.vertex(row + 1, col + 1),
                        lattice.vertex(row + 1, col),
                    ],
                });
            }
        }

        info!(
            rows,
            cols,
            cells = cells.len(),
            step_m,
            projection = %context,
            "Built mesh"
        );

        Ok(Mesh {
            cells,
            rows,
            cols,
            step_m,
            origin,
            bounds: *bounds,
            context,
        })
    }
}

/// Number of cells along one axis; at least one so degenerate extents still
/// get a cell.
fn cell_count(length_m: f64, step_m: f64) -> usize {
    ((length_m / step_m).ceil() as usize).max(1)
}

/// Projected rectangle enclosing the whole geographic box.
///
/// The corners alone are not enough: parallels bulge towards the equator at
/// the central meridian and meridians spread out at the equator, so those
/// crossings and a few evenly spaced edge points are projected as well.
fn projected_extent(bounds: &GeoBounds, context: &ProjectionContext) -> MathResult<Bounds2D> {
    let lon_samples = edge_samples(
        bounds.min_lon(),
        bounds.max_lon(),
        central_meridian_near(bounds, context),
    );
    let lat_samples = edge_samples(bounds.min_lat(), bounds.max_lat(), 0.0);

    let mut projected = Vec::with_capacity(2 * (lon_samples.len() + lat_samples.len()));
    for &lon in &lon_samples {
        projected.push(context.forward(lon, bounds.min_lat())?);
        projected.push(context.forward(lon, bounds.max_lat())?);
    }
    for &lat in &lat_samples {
        projected.push(context.forward(bounds.min_lon(), lat)?);
        projected.push(context.forward(bounds.max_lon(), lat)?);
    }

    Bounds2D::from_points_iter(projected).ok_or_else(|| {
        MathError::invalid_configuration(format!("No projected samples for {bounds}"))
    })
}

/// Both ends, evenly spaced interior points, and `critical` if it lies
/// strictly inside the interval.
fn edge_samples(min: f64, max: f64, critical: f64) -> Vec<f64> {
    let mut samples: Vec<f64> = (0..=EDGE_SUBDIVISIONS)
        .map(|i| comparison::lerp(min, max, i as f64 / EDGE_SUBDIVISIONS as f64))
        .collect();
    if critical > min && critical < max {
        samples.push(critical);
    }
    samples
}

/// Central meridian expressed on the same side of the antimeridian as the box.
fn central_meridian_near(bounds: &GeoBounds, context: &ProjectionContext) -> f64 {
    let center_lon = bounds.center().x;
    center_lon + angles::longitude_offset(context.central_meridian(), center_lon)
}

/// Inverse projection that keeps longitudes continuous around the box, so a
/// box crossing the antimeridian gets e.g. 180.5 instead of -179.5.
struct Unprojector<'a> {
    context: &'a ProjectionContext,
    reference_lon: f64,
}

impl Unprojector<'_> {
    fn inverse(&self, x: f64, y: f64) -> MathResult<LonLat> {
        let p = self.context.inverse(x, y)?;
        Ok(Coord {
            x: self.reference_lon + angles::longitude_offset(p.x, self.reference_lon),
            y: p.y,
        })
    }
}

/// Inverse-projected cell corners, shared between neighboring cells so that
/// adjacent polygons have identical edges.
struct VertexLattice {
    vertices: Vec<LonLat>,
    cols: usize,
}

impl VertexLattice {
    fn build(
        unprojector: &Unprojector<'_>,
        origin: Point2D,
        step_m: f64,
        rows: usize,
        cols: usize,
    ) -> MathResult<Self> {
        let vertex_cols = cols + 1;
        let mut vertices = Vec::with_capacity((rows + 1) * vertex_cols);
        for row in 0..=rows {
            for col in 0..=cols {
                vertices.push(unprojector.inverse(
                    origin.x + col as f64 * step_m,
                    origin.y + row as f64 * step_m,
                )?);
            }
        }
        Ok(Self {
            vertices,
            cols: vertex_cols,
        })
    }

    fn vertex(&self, row: usize, col: usize) -> LonLat {
        self.vertices[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn bounds(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> GeoBounds {
        GeoBounds::new(min_lon, min_lat, max_lon, max_lat).unwrap()
    }

    /// Points along the bbox outline
    fn outline_samples(bounds: &GeoBounds, per_edge: usize) -> Vec<LonLat> {
        let mut points = Vec::new();
        for i in 0..=per_edge {
            let t = i as f64 / per_edge as f64;
            let lon = comparison::lerp(bounds.min_lon(), bounds.max_lon(), t);
            let lat = comparison::lerp(bounds.min_lat(), bounds.max_lat(), t);
            points.push(Coord { x: lon, y: bounds.min_lat() });
            points.push(Coord { x: lon, y: bounds.max_lat() });
            points.push(Coord { x: bounds.min_lon(), y: lat });
            points.push(Coord { x: bounds.max_lon(), y: lat });
        }
        points
    }

    fn assert_covers(mesh: &Mesh) {
        let extent = mesh.projected_extent();
        for point in outline_samples(mesh.bounds(), 200) {
            let p = mesh.context().forward_coord(point).unwrap();
            assert!(
                extent.contains_point(p),
                "({}, {}) projects to ({}, {}) outside {}",
                point.x,
                point.y,
                p.x,
                p.y,
                extent
            );
        }
    }

    #[test]
    fn test_tokyo_scenario_grid() {
        let mesh = build_mesh(&bounds(139.0, 35.0, 140.0, 36.0), 1.0).unwrap();
        assert_eq!(mesh.cols(), 93);
        assert_eq!(mesh.rows(), 113);
        assert_eq!(mesh.len(), 93 * 113);
        assert_eq!(mesh.step_m(), 1000.0);
        assert_eq!(mesh.context().zone(), 54);

        // The south edge reaches furthest south at 140°E, nearest the
        // central meridian, so the first row starts below 35°N at 139°E.
        let first = mesh.cell(0, 0).unwrap();
        assert_abs_diff_eq!(first.center.x, 139.0057, epsilon = 0.002);
        assert_abs_diff_eq!(first.center.y, 34.9922, epsilon = 0.002);
    }

    #[test]
    fn test_row_major_order() {
        let mesh = build_mesh(&bounds(139.70, 35.60, 139.75, 35.64), 1.0).unwrap();
        for (index, cell) in mesh.iter().enumerate() {
            assert_eq!(index, cell.row * mesh.cols() + cell.col);
            assert_eq!(mesh.index_of(cell.row, cell.col), Some(index));
        }
        assert!(mesh.cell(mesh.rows(), 0).is_none());
        // Row 0 is the southern-most row
        let south = mesh.cell(0, 0).unwrap();
        let north = mesh.cell(mesh.rows() - 1, 0).unwrap();
        assert!(south.center.y < north.center.y);
    }

    #[test]
    fn test_km_step_floor() {
        let bbox = bounds(139.70, 35.68, 139.72, 35.70);
        let tiny = build_mesh(&bbox, 0.01).unwrap();
        let floor = build_mesh(&bbox, 0.1).unwrap();
        assert_eq!(tiny, floor);
        assert_eq!(tiny.step_m(), 100.0);
        assert_eq!(build_mesh(&bbox, 0.0).unwrap(), floor);
        assert_eq!(build_mesh(&bbox, -3.0).unwrap(), floor);
    }

    #[test]
    fn test_coverage_of_scenario_box() {
        assert_covers(&build_mesh(&bounds(139.0, 35.0, 140.0, 36.0), 1.0).unwrap());
    }

    #[test]
    fn test_coverage_when_straddling_central_meridian() {
        // Zone 54 has its central meridian at 141°E
        let mesh = build_mesh(&bounds(140.4, 42.0, 141.6, 43.2), 2.0).unwrap();
        assert_eq!(mesh.context().central_meridian(), 141.0);
        assert_covers(&mesh);
    }

    #[test]
    fn test_coverage_across_equator() {
        let mesh = build_mesh(&bounds(100.0, -0.6, 101.5, 0.6), 1.5).unwrap();
        assert_covers(&mesh);
    }

    #[test]
    fn test_shared_corners_between_neighbors() {
        let mesh = build_mesh(&bounds(139.70, 35.60, 139.75, 35.64), 1.0).unwrap();
        let left = mesh.cell(1, 1).unwrap();
        let right = mesh.cell(1, 2).unwrap();
        let above = mesh.cell(2, 1).unwrap();
        assert_eq!(left.corners[1], right.corners[0]);
        assert_eq!(left.corners[2], right.corners[3]);
        assert_eq!(left.corners[3], above.corners[0]);
    }

    #[test]
    fn test_cell_polygon_is_closed_square() {
        let mesh = build_mesh(&bounds(139.70, 35.60, 139.75, 35.64), 1.0).unwrap();
        let polygon = mesh.cell(0, 0).unwrap().polygon();
        let ring: Vec<_> = polygon.exterior().coords().copied().collect();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());

        let square = mesh.projected_cell(0, 0).unwrap();
        assert_abs_diff_eq!(square.width(), 1000.0, epsilon = 1e-9);
        let sw = mesh.context().forward_coord(ring[0]).unwrap();
        assert_abs_diff_eq!(sw.x, square.min.x, epsilon = 1e-3);
        assert_abs_diff_eq!(sw.y, square.min.y, epsilon = 1e-3);
    }

    #[test]
    fn test_padding_grows_grid() {
        let bbox = bounds(139.70, 35.60, 139.75, 35.64);
        let plain = build_mesh(&bbox, 1.0).unwrap();
        let padded = MeshBuilder::new(MeshConfig::new().with_padding_km(2.0))
            .build(&bbox)
            .unwrap();
        assert!((plain.cols() + 3..=plain.cols() + 5).contains(&padded.cols()));
        assert!((plain.rows() + 3..=plain.rows() + 5).contains(&padded.rows()));
        assert_abs_diff_eq!(padded.origin().x, plain.origin().x - 2000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_antimeridian_box_keeps_continuous_longitudes() {
        let mesh = build_mesh(&bounds(179.5, -17.0, 180.5, -16.5), 5.0).unwrap();
        for cell in &mesh {
            for corner in &cell.corners {
                assert!(corner.x > 179.0 && corner.x < 181.0, "corner at {}", corner.x);
            }
        }
    }

    #[test]
    fn test_degenerate_box_yields_single_cell() {
        let bbox = bounds(139.7, 35.7, 139.7 + 1e-12, 35.7 + 1e-12);
        let mesh = build_mesh(&bbox, 1.0).unwrap();
        assert_eq!(mesh.shape(), (1, 1));
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_inverted_box_is_configuration_error() {
        let err = MeshBuilder::default()
            .build_from_extent(140.0, 35.0, 139.0, 36.0)
            .unwrap_err();
        assert!(matches!(err, MathError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_half_globe_box_is_projection_error_at_its_edge() {
        // Center 90°E picks zone 46 (central meridian 93°E); 0°E is 93° away
        let err = build_mesh(&bounds(0.0, -5.0, 180.0, 5.0), 1.0).unwrap_err();
        match err {
            MathError::ProjectionError { x, y, .. } => {
                assert_eq!(x, 0.0);
                assert_eq!(y, -5.0);
            }
            other => panic!("expected projection error, got {other:?}"),
        }
    }

    #[test]
    fn test_pole_touching_box_is_projection_error() {
        let err = build_mesh(&bounds(10.0, 89.0, 11.0, 90.0), 1.0).unwrap_err();
        assert!(err.is_projection_error());
    }
}

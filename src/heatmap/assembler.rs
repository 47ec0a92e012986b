// src/heatmap/assembler.rs

use super::color_scale::{ColorScale, Rgb};
use crate::math::{
    error::{MathError, MathResult},
    geometry::mesh::Mesh,
    probability::ProbabilityField,
    types::Polygon,
};

/// One renderable cell: geometry, value and display attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCell {
    pub row: usize,
    pub col: usize,
    pub polygon: Polygon<f64>,
    pub probability: f64,
    /// `probability >= min_probability`
    pub included: bool,
    pub color: Rgb,
    /// Opacity for included cells, 0 otherwise
    pub alpha: f64,
}

impl RenderCell {
    /// Stable textual id, `"<row>-<col>"`
    pub fn id(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }
}

/// Merges mesh geometry and field values with the default blue → purple scale.
///
/// Every cell of the mesh is returned in mesh order; cells below the
/// threshold are marked as not included but keep their geometry and value.
pub fn assemble(
    field: &ProbabilityField,
    mesh: &Mesh,
    min_probability: f64,
    opacity: f64,
) -> MathResult<Vec<RenderCell>> {
    assemble_with_scale(field, mesh, min_probability, opacity, &ColorScale::blue_purple())
}

pub fn assemble_with_scale(
    field: &ProbabilityField,
    mesh: &Mesh,
    min_probability: f64,
    opacity: f64,
    scale: &ColorScale,
) -> MathResult<Vec<RenderCell>> {
    if field.shape() != mesh.shape() {
        return Err(MathError::invalid_configuration(format!(
            "Probability field shape {:?} does not match mesh shape {:?}",
            field.shape(),
            mesh.shape()
        )));
    }

    Ok(mesh
        .iter()
        .zip(field.values())
        .map(|(cell, &probability)| {
            let included = probability >= min_probability;
            RenderCell {
                row: cell.row,
                col: cell.col,
                polygon: cell.polygon(),
                probability,
                included,
                color: scale.sample(probability),
                alpha: if included { opacity } else { 0.0 },
            }
        })
        .collect())
}

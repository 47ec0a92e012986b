// src/heatmap/geojson.rs

use super::assembler::RenderCell;
use serde_json::{Value, json};

/// GeoJSON FeatureCollection of all render cells, one Polygon feature each.
pub fn to_feature_collection(cells: &[RenderCell]) -> Value {
    let features: Vec<Value> = cells.iter().map(to_feature).collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

pub fn to_feature(cell: &RenderCell) -> Value {
    let ring: Vec<[f64; 2]> = cell
        .polygon
        .exterior()
        .coords()
        .map(|c| [c.x, c.y])
        .collect();
    let id = cell.id();
    json!({
        "type": "Feature",
        "id": id,
        "properties": {
            "id": id,
            "row": cell.row,
            "col": cell.col,
            "probability": cell.probability,
            "included": cell.included,
            "fill": cell.color.to_hex(),
            "fill_opacity": cell.alpha,
        },
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::assembler::assemble;
    use crate::math::{geometry::mesh::build_mesh, probability::synthesize, types::GeoBounds};

    #[test]
    fn test_feature_collection() {
        let mesh = build_mesh(&GeoBounds::new(139.6, 35.6, 139.7, 35.7).unwrap(), 2.0).unwrap();
        let field = synthesize(&mesh, "東京都", "鹿", "2025-09-09", "午後");
        let cells = assemble(&field, &mesh, 0.3, 0.6).unwrap();
        let collection = to_feature_collection(&cells);

        assert_eq!(collection["type"], "FeatureCollection");
        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), mesh.len());

        let first = &features[0];
        assert_eq!(first["id"], "0-0");
        assert_eq!(first["properties"]["row"], 0);
        let ring = first["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
    }
}

// src/debug/visualization/svg.rs
use crate::{
    heatmap::RenderCell,
    math::types::{Bounds2D, GeoBounds, Point2D},
};
use std::path::Path;
use svg::{
    Document, Node,
    node::element::{Polygon, Rectangle, Style},
};
use tracing::info;

// ===================================================================================
// Helper struct for building the document
// ===================================================================================
/// Collects elements in lon/lat space. SVG y grows downwards, so latitudes
/// are negated.
struct SvgBuilder {
    document: Document,
}

impl SvgBuilder {
    fn new(display_bounds: &Bounds2D, svg_pixel_width: f64, outline_width: f64) -> Self {
        let width = display_bounds.width();
        let height = display_bounds.height();
        let pixel_height = if width > 0.0 {
            svg_pixel_width * height / width
        } else {
            svg_pixel_width
        };
        // Outline widths are given in screen pixels
        let units_per_pixel = if svg_pixel_width > 0.0 { width / svg_pixel_width } else { 0.0 };
        let stroke_w_thin = outline_width * units_per_pixel;
        let stroke_w_normal = 2.0 * units_per_pixel;

        let style = Style::new(format!(
            ".background {{ fill: #f0f0f0; }}\n\
             .cell {{ stroke: #555555; stroke-width: {stroke_w_thin}; stroke-opacity: 0.4; }}\n\
             .region-bounds {{ fill: none; stroke: #cc0000; stroke-width: {stroke_w_normal}; stroke-dasharray: {d},{d}; }}",
            d = 4.0 * units_per_pixel
        ));
        let background = Rectangle::new()
            .set("x", display_bounds.min.x)
            .set("y", -display_bounds.max.y)
            .set("width", width)
            .set("height", height)
            .set("class", "background");

        let document = Document::new()
            .set("width", svg_pixel_width)
            .set("height", pixel_height)
            .set(
                "viewBox",
                (display_bounds.min.x, -display_bounds.max.y, width, height),
            )
            .add(style)
            .add(background);

        Self { document }
    }

    /// Draws one filled polygon.
    fn draw_polygon<'a>(&mut self, vertices: impl IntoIterator<Item = &'a Point2D>, fill: &str, alpha: f64) {
        let points = vertices
            .into_iter()
            .map(|p| format!("{:.6},{:.6}", p.x, -p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let polygon = Polygon::new()
            .set("points", points)
            .set("class", "cell")
            .set("fill", fill)
            .set("fill-opacity", alpha);
        self.document.append(polygon);
    }

    /// Draws an axis-aligned rectangle.
    fn draw_rect(&mut self, bounds: &Bounds2D, class: &str) {
        let rect = Rectangle::new()
            .set("x", bounds.min.x)
            .set("y", -bounds.max.y)
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("class", class);
        self.document.append(rect);
    }

    fn finish(self) -> Document {
        self.document
    }
}

/// Debug dump of an assembled heatmap as SVG, equirectangular in lon/lat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgDump {
    pub pixel_width: f64,
    /// Cell outline width in pixels
    pub grid_outline_width: f64,
    /// Draw cells below the threshold as well (transparent)
    pub draw_excluded: bool,
}

impl Default for SvgDump {
    fn default() -> Self {
        Self {
            pixel_width: 1024.0,
            grid_outline_width: 0.10,
            draw_excluded: false,
        }
    }
}

impl SvgDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid_outline_width(mut self, width: f64) -> Self {
        self.grid_outline_width = width;
        self
    }

    pub fn with_draw_excluded(mut self, draw_excluded: bool) -> Self {
        self.draw_excluded = draw_excluded;
        self
    }

    pub fn with_pixel_width(mut self, pixel_width: f64) -> Self {
        self.pixel_width = pixel_width;
        self
    }

    pub fn render(&self, cells: &[RenderCell], region: &GeoBounds) -> Document {
        let region_rect = Bounds2D {
            min: Point2D {
                x: region.min_lon(),
                y: region.min_lat(),
            },
            max: Point2D {
                x: region.max_lon(),
                y: region.max_lat(),
            },
        };
        let cell_extent = Bounds2D::from_points_iter(
            cells
                .iter()
                .flat_map(|cell| cell.polygon.exterior().coords().copied()),
        );
        let display_bounds = cell_extent
            .map(|extent| {
                Bounds2D::from_points_iter([extent.min, extent.max, region_rect.min, region_rect.max])
                    .unwrap_or(region_rect)
            })
            .unwrap_or(region_rect);
        let margin = 0.02 * display_bounds.width().max(display_bounds.height());
        let display_bounds = display_bounds.padded(margin);

        let mut svg = SvgBuilder::new(&display_bounds, self.pixel_width, self.grid_outline_width);
        for cell in cells.iter().filter(|c| c.included || self.draw_excluded) {
            svg.draw_polygon(cell.polygon.exterior().coords(), &cell.color.to_hex(), cell.alpha);
        }
        svg.draw_rect(&region_rect, "region-bounds");
        svg.finish()
    }

    /// Renders and writes the SVG file.
    pub fn save(&self, path: impl AsRef<Path>, cells: &[RenderCell], region: &GeoBounds) -> std::io::Result<()> {
        let path = path.as_ref();
        svg::save(path, &self.render(cells, region))?;
        info!("Debug SVG '{}' written ({} cells)", path.display(), cells.len());
        Ok(())
    }
}

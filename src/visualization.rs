//! Visualization utilities for planned routes.
//!
//! Generates SVG renderings of a sensor field and a closed collection tour.

use crate::error::PlannerError;
use crate::field::SensorField;
use crate::route::Route;
use std::fs;
use std::path::Path;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// Sensor marker radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            node_radius: 6.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_bounds(&self, field: &SensorField) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for c in &field.coordinates {
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_y = min_y.min(c.y);
            max_y = max_y.max(c.y);
        }

        (min_x, max_x, min_y, max_y)
    }

    /// Generate an SVG rendering of a route over its field.
    ///
    /// The closing edge back to the start site is drawn dashed to make the
    /// wrap-around visible. An empty field has no bounding box to scale
    /// into and is rejected.
    pub fn generate_svg(&self, field: &SensorField, route: &Route) -> Result<String, PlannerError> {
        if field.is_empty() {
            return Err(PlannerError::DegenerateGeometry(
                "cannot render a field with no sites".to_string(),
            ));
        }

        let mut svg = String::new();

        let (min_x, max_x, min_y, max_y) = self.get_bounds(field);

        let scale_x = (self.width - 2.0 * self.margin) / (max_x - min_x).max(1.0);
        let scale_y = (self.height - 2.0 * self.margin) / (max_y - min_y).max(1.0);
        let scale = scale_x.min(scale_y);

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .sensor {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 2; }}
    .start {{ fill: #2ecc71; stroke: #27ae60; stroke-width: 2; }}
    .edge {{ stroke: #34495e; stroke-width: 2; fill: none; }}
    .closing {{ stroke: #34495e; stroke-width: 2; stroke-dasharray: 6,4; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ecf0f1"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r##"<text x="{}" y="25" class="title">{} | {} | Length: {:.2}</text>
"##,
            self.margin, field.name, route.algorithm, route.length
        ));

        let transform = |x: f64, y: f64| -> (f64, f64) {
            let tx = self.margin + (x - min_x) * scale;
            let ty = self.height - self.margin - (y - min_y) * scale;
            (tx, ty)
        };

        if route.tour.len() > 1 {
            for i in 0..route.tour.len() {
                let from = route.tour[i];
                let to = route.tour[(i + 1) % route.tour.len()];

                let (x1, y1) = transform(field.coordinates[from].x, field.coordinates[from].y);
                let (x2, y2) = transform(field.coordinates[to].x, field.coordinates[to].y);

                let class = if i == route.tour.len() - 1 {
                    "closing"
                } else {
                    "edge"
                };

                svg.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="{}"/>
"#,
                    x1, y1, x2, y2, class
                ));
            }
        }

        let start_site = route.tour.first().copied();

        for (id, c) in field.coordinates.iter().enumerate() {
            let (x, y) = transform(c.x, c.y);

            let class = if Some(id) == start_site {
                "start"
            } else {
                "sensor"
            };

            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"##,
                x, y, self.node_radius, class
            ));

            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"##,
                x,
                y - self.node_radius - 3.0,
                id
            ));
        }

        svg.push_str("</svg>");

        Ok(svg)
    }

    /// Save an SVG document to a file.
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        fs::write(path, svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_contains_route_elements() {
        let field = SensorField::generate("viz", 8, 1);
        let route = Route::random(&field, 1);

        let svg = Visualizer::new().generate_svg(&field, &route).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 8);
        // One edge per tour position, the last one dashed.
        assert_eq!(svg.matches("<line").count(), 8);
        assert_eq!(svg.matches(r#"class="closing""#).count(), 1);
    }

    #[test]
    fn test_svg_single_site() {
        let field = SensorField::generate("viz", 1, 1);
        let route = Route::random(&field, 1);

        let svg = Visualizer::new().generate_svg(&field, &route).unwrap();
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches("<line").count(), 0);
    }

    #[test]
    fn test_empty_field_rejected() {
        let field = SensorField::new("empty", Vec::new()).unwrap();
        let route = Route::from_tour(&field, Vec::new(), "t");

        let result = Visualizer::new().generate_svg(&field, &route);
        assert!(matches!(result, Err(PlannerError::DegenerateGeometry(_))));
    }
}

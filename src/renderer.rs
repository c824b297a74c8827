//! Renderers draw a scene and its computed route.
use crate::{error::RenderError, geometry::Rect, layout::Route, scene::Scene};
use std::io::Write;
use svg::node::element;

const BACKGROUND_COLOR: &str = "#1C1C1C";
const SHAPE_COLOR: &str = "#212121";
const BORDER_COLOR: &str = "#494949";
const PATH_COLOR: &str = "#888888";

/// Space around the routing area.
const PADDING: f32 = 20.0;

pub trait Renderer {
    fn render(&self, scene: &Scene, route: &Route, writer: &mut impl Write)
        -> Result<(), RenderError>;
}

/// Draws the layers of a route computation as SVG.
///
/// ```svgbob
///   grid lines   (show_grid_lines)
///   graph        (show_graph)
///   path         (show_path)
/// ```
#[derive(Debug, Clone)]
pub struct SVGRenderer {
    pub show_grid_lines: bool,
    pub show_graph: bool,
    pub show_path: bool,
}

impl SVGRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SVGRenderer {
    fn default() -> Self {
        Self {
            show_grid_lines: false,
            show_graph: false,
            show_path: true,
        }
    }
}

impl Renderer for SVGRenderer {
    fn render(
        &self,
        scene: &Scene,
        route: &Route,
        writer: &mut impl Write,
    ) -> Result<(), RenderError> {
        let circle_radius = 4.0;
        let stroke_width = 1.5;
        let view_box = view_box(scene, route);

        // -- Build a SVG document
        let mut svg_doc = svg::Document::new().set("version", "1.1").set(
            "viewBox",
            (
                view_box.min_x(),
                view_box.min_y(),
                view_box.width(),
                view_box.height(),
            ),
        );

        // -- Background
        let background_rect = element::Rectangle::new()
            .set("x", view_box.min_x())
            .set("y", view_box.min_y())
            .set("width", view_box.width())
            .set("height", view_box.height())
            .set("fill", BACKGROUND_COLOR);

        svg_doc = svg_doc.add(background_rect);

        // -- Grid lines span the routing area
        if self.show_grid_lines {
            if let Some(bounds) = route.grid.bounds() {
                for y in route.horizontal_lines() {
                    let line = element::Line::new()
                        .set("x1", bounds.min_x())
                        .set("x2", bounds.max_x())
                        .set("y1", *y)
                        .set("y2", *y)
                        .set("stroke", BORDER_COLOR)
                        .set("stroke-dasharray", "2 2")
                        .set("stroke-width", 1);
                    svg_doc = svg_doc.add(line);
                }
                for x in route.vertical_lines() {
                    let line = element::Line::new()
                        .set("x1", *x)
                        .set("x2", *x)
                        .set("y1", bounds.min_y())
                        .set("y2", bounds.max_y())
                        .set("stroke", BORDER_COLOR)
                        .set("stroke-dasharray", "2 2")
                        .set("stroke-width", 1);
                    svg_doc = svg_doc.add(line);
                }
            }
        }

        // -- Shapes
        for rect in &scene.rects {
            let shape = element::Rectangle::new()
                .set("x", rect.min_x())
                .set("y", rect.min_y())
                .set("width", rect.width())
                .set("height", rect.height())
                .set("fill", SHAPE_COLOR)
                .set("stroke", BORDER_COLOR);
            svg_doc = svg_doc.add(shape);
        }

        // -- Route graph
        if self.show_graph {
            for (a, b, _) in route.graph.edges() {
                let (Some(from_pt), Some(to_pt)) =
                    (route.graph.location(a), route.graph.location(b))
                else {
                    continue;
                };

                let line = element::Line::new()
                    .set("x1", from_pt.x)
                    .set("y1", from_pt.y)
                    .set("x2", to_pt.x)
                    .set("y2", to_pt.y)
                    .set("stroke", "red")
                    .set("stroke-width", 0.5);
                svg_doc = svg_doc.add(line);
            }

            for node in route.graph.nodes() {
                let circle = element::Circle::new()
                    .set("cx", node.location().x)
                    .set("cy", node.location().y)
                    .set("r", 2)
                    .set("stroke", "white")
                    .set("stroke-width", 0.5)
                    .set("fill", "red");
                svg_doc = svg_doc.add(circle);
            }
        }

        // -- Path: connector -> anchors -> connector
        if self.show_path {
            let [start, end] = &scene.connections;

            if route.path.is_empty() {
                let center = view_box.center();
                let label = element::Text::new()
                    .set("x", center.x)
                    .set("y", center.y)
                    .set("dominant-baseline", "middle")
                    .set("text-anchor", "middle")
                    .set("fill", "white")
                    .set("font-family", "Trebuchet MS,sans-serif")
                    .add(svg::node::Text::new("no path"));
                svg_doc = svg_doc.add(label);
            } else {
                let points = std::iter::once(&start.point)
                    .chain(route.path.iter())
                    .chain(std::iter::once(&end.point))
                    .map(|p| format!("{},{}", p.x, p.y))
                    .collect::<Vec<_>>()
                    .join(" ");

                let polyline = element::Polyline::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", PATH_COLOR)
                    .set("stroke-width", stroke_width);
                svg_doc = svg_doc.add(polyline);
            }

            for connection in [start, end] {
                let circle = element::Circle::new()
                    .set("cx", connection.point.x)
                    .set("cy", connection.point.y)
                    .set("r", circle_radius)
                    .set("stroke", PATH_COLOR)
                    .set("stroke-width", stroke_width)
                    .set("fill", BACKGROUND_COLOR);
                svg_doc = svg_doc.add(circle);
            }
        }

        writer.write_all(svg_doc.to_string().as_bytes())?;
        Ok(())
    }
}

/// The routing area (or both shapes, if there is none) plus padding.
fn view_box(scene: &Scene, route: &Route) -> Rect {
    let [rect1, rect2] = &scene.rects;
    let area = route
        .grid
        .bounds()
        .unwrap_or_else(|| rect1.union(rect2));

    area.inflate(PADDING)
}

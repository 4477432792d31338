//! SVG preview backend.
//!
//! Drawing coordinates grow upward while SVG coordinates grow downward, so
//! every point is mirrored about the top of the drawing extents. Each layer
//! becomes one `<g data-layer="...">` group carrying the layer's stroke color
//! and dash pattern.

use log::debug;
use svg::{Document, node::element as svg_element};

use wallsheet_core::{
    draw::{LayerDefinition, Primitive, TextLabel},
    geometry::{Bounds, Point},
};

use super::{BackendError, DrawingBackend, Recording};

/// Blank border around the drawing extents, in drawing units.
const PADDING: f64 = 1.0;
const STROKE_WIDTH: f64 = 0.02;
const FONT_FAMILY: &str = "monospace";

/// Writes a sheet as an SVG document.
#[derive(Debug, Default)]
pub struct SvgBackend {
    recording: Recording,
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Maps drawing coordinates onto the SVG canvas.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    extents: Bounds,
}

impl Canvas {
    fn width(self) -> f64 {
        self.extents.width() + 2.0 * PADDING
    }

    fn height(self) -> f64 {
        self.extents.height() + 2.0 * PADDING
    }

    fn map(self, point: Point) -> Point {
        Point::new(
            point.x() - self.extents.min_x() + PADDING,
            self.extents.max_y() - point.y() + PADDING,
        )
    }
}

impl SvgBackend {
    fn render_layer(&self, canvas: Canvas, layer: &LayerDefinition) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("id", format!("layer-{}", layer.name()))
            .set("data-layer", layer.name())
            .set("stroke", layer.color().to_css().to_string())
            .set("stroke-width", STROKE_WIDTH)
            .set("fill", "none");
        if let Some(dasharray) = layer.line_style().to_svg_value() {
            group = group.set("stroke-dasharray", dasharray);
        }

        self.recording
            .items()
            .filter(|(owner, _)| owner.name() == layer.name())
            .fold(group, |group, (owner, primitive)| match primitive {
                Primitive::Line { start, end } => {
                    let (start, end) = (canvas.map(*start), canvas.map(*end));
                    group.add(
                        svg_element::Line::new()
                            .set("x1", start.x())
                            .set("y1", start.y())
                            .set("x2", end.x())
                            .set("y2", end.y()),
                    )
                }
                Primitive::Circle { center, radius } => {
                    let center = canvas.map(*center);
                    group.add(
                        svg_element::Circle::new()
                            .set("cx", center.x())
                            .set("cy", center.y())
                            .set("r", *radius),
                    )
                }
                Primitive::Text(label) => group.add(self.render_text(canvas, owner, label)),
            })
    }

    fn render_text(
        &self,
        canvas: Canvas,
        layer: &LayerDefinition,
        label: &TextLabel,
    ) -> svg_element::Text {
        let at = canvas.map(label.at());
        let mut text = svg_element::Text::new(label.content())
            .set("x", at.x())
            .set("y", at.y())
            .set("font-family", FONT_FAMILY)
            .set("font-size", label.height())
            .set("fill", layer.color().to_css().to_string())
            .set("stroke", "none");
        if label.rotation() != 0.0 {
            // SVG rotates clockwise
            text = text.set(
                "transform",
                format!("rotate({} {} {})", -label.rotation(), at.x(), at.y()),
            );
        }
        text
    }

    fn render_document(&self) -> Document {
        let extents = self
            .recording
            .items()
            .map(|(_, primitive)| primitive.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();
        let canvas = Canvas { extents };

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set("fill", "white");

        let main_group = self
            .recording
            .layers()
            .iter()
            .fold(svg_element::Group::new(), |group, layer| {
                group.add(self.render_layer(canvas, layer))
            });

        Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", format!("{}mm", canvas.width() * 10.0))
            .set("height", format!("{}mm", canvas.height() * 10.0))
            .add(background)
            .add(main_group)
    }
}

impl DrawingBackend for SvgBackend {
    fn add_layer(&mut self, layer: &LayerDefinition) {
        self.recording.add_layer(layer);
    }

    fn draw_line(&mut self, layer: &str, start: Point, end: Point) -> Result<(), BackendError> {
        self.recording.record(layer, Primitive::line(start, end))
    }

    fn draw_circle(
        &mut self,
        layer: &str,
        center: Point,
        radius: f64,
    ) -> Result<(), BackendError> {
        self.recording.record(layer, Primitive::circle(center, radius))
    }

    fn draw_text(
        &mut self,
        layer: &str,
        at: Point,
        height: f64,
        rotation: f64,
        text: &str,
    ) -> Result<(), BackendError> {
        self.recording.record_text(layer, at, height, rotation, text)
    }

    fn serialize(self) -> Result<Vec<u8>, BackendError> {
        let document = self.render_document();
        let mut buffer = Vec::new();
        svg::write(&mut buffer, &document)?;

        debug!(
            layers = self.recording.layers().len(),
            bytes = buffer.len();
            "SVG document serialized"
        );
        Ok(buffer)
    }
}

//! AutoCAD DXF R12 backend.
//!
//! Recorded layers and primitives are converted into a [`dxf::Drawing`]
//! saved as `AC1009`:
//!
//! - header extents cover every entity
//! - one line type per [`LineStyle`], one layer table entry per layer
//! - `LINE`, `CIRCLE` and `TEXT` entities tagged with their layer

use dxf::{
    Color, Drawing, Point as DxfPoint,
    entities::{Circle, Entity, EntityType, Line, Text},
    enums::AcadVersion,
    tables::{Layer, LineType},
};
use log::debug;

use wallsheet_core::{
    draw::{LayerDefinition, LineStyle, Primitive},
    geometry::{Bounds, Point},
};

use super::{BackendError, DrawingBackend, Recording};

const LINE_STYLES: [LineStyle; 2] = [LineStyle::Continuous, LineStyle::Dashed];

/// Writes a sheet as DXF R12.
#[derive(Debug, Default)]
pub struct DxfBackend {
    recording: Recording,
}

impl DxfBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[inline]
fn dxf_point(point: Point) -> DxfPoint {
    DxfPoint::new(point.x(), point.y(), 0.0)
}

/// R12 text is single-byte; the diameter sign has its own control code.
fn encode_text(text: &str) -> String {
    text.replace('∅', "%%c")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn line_type(style: LineStyle) -> LineType {
    let pattern = style.dxf_pattern();
    let mut line_type = LineType::default();
    line_type.name = style.dxf_linetype().to_string();
    line_type.description = style.dxf_description().to_string();
    line_type.total_pattern_length = pattern.iter().map(|element| element.abs()).sum();
    line_type.dash_dot_space_lengths = pattern.to_vec();
    line_type
}

fn layer(definition: &LayerDefinition) -> Layer {
    let mut layer = Layer::default();
    layer.name = definition.name().to_string();
    layer.color = Color::from_index(definition.color().index());
    layer.line_type_name = definition.line_style().dxf_linetype().to_string();
    layer
}

fn entity(layer: &LayerDefinition, primitive: &Primitive) -> Entity {
    let specific = match primitive {
        Primitive::Line { start, end } => {
            EntityType::Line(Line::new(dxf_point(*start), dxf_point(*end)))
        }
        Primitive::Circle { center, radius } => {
            EntityType::Circle(Circle::new(dxf_point(*center), *radius))
        }
        Primitive::Text(label) => {
            let mut text = Text::default();
            text.location = dxf_point(label.at());
            text.text_height = label.height();
            text.rotation = label.rotation();
            text.value = encode_text(label.content());
            EntityType::Text(text)
        }
    };

    let mut entity = Entity::new(specific);
    entity.common.layer = layer.name().to_string();
    entity
}

impl DxfBackend {
    fn extents(&self) -> Bounds {
        self.recording
            .items()
            .map(|(_, primitive)| primitive.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    fn to_drawing(&self) -> Drawing {
        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R12;

        let extents = self.extents();
        drawing.header.minimum_drawing_extents = dxf_point(extents.min_point());
        drawing.header.maximum_drawing_extents = dxf_point(extents.max_point());

        for style in LINE_STYLES {
            drawing.add_line_type(line_type(style));
        }
        for definition in self.recording.layers() {
            drawing.add_layer(layer(definition));
        }
        for (definition, primitive) in self.recording.items() {
            drawing.add_entity(entity(definition, primitive));
        }

        drawing
    }
}

impl DrawingBackend for DxfBackend {
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
        let drawing = self.to_drawing();
        let mut buffer = Vec::new();
        drawing.save(&mut buffer)?;

        debug!(
            layers = self.recording.layers().len(),
            bytes = buffer.len();
            "DXF document serialized"
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use wallsheet_core::color::AciColor;

    use super::*;

    fn backend_with_layers() -> DxfBackend {
        let mut backend = DxfBackend::new();
        backend.add_layer(&LayerDefinition::new(
            "WALL_OUTLINE",
            AciColor::Blue,
            LineStyle::Continuous,
        ));
        backend.add_layer(&LayerDefinition::new(
            "SOIL",
            AciColor::Green,
            LineStyle::Dashed,
        ));
        backend
    }

    fn reload(backend: DxfBackend) -> Drawing {
        let bytes = backend.serialize().unwrap();
        Drawing::load(&mut bytes.as_slice()).unwrap()
    }

    #[test]
    fn test_document_is_r12() {
        let mut backend = backend_with_layers();
        backend
            .draw_line("WALL_OUTLINE", Point::new(0.0, 0.0), Point::new(2.5, 0.0))
            .unwrap();
        let bytes = backend.serialize().unwrap();
        let document = String::from_utf8(bytes.clone()).unwrap();

        assert!(document.contains("AC1009"));
        assert!(document.trim_end().ends_with("EOF"));

        let drawing = Drawing::load(&mut bytes.as_slice()).unwrap();
        assert_eq!(drawing.header.version, AcadVersion::R12);
        assert_eq!(drawing.header.maximum_drawing_extents.x, 2.5);
    }

    #[test]
    fn test_layer_table_entries() {
        let drawing = reload(backend_with_layers());

        let soil = drawing.layers().find(|layer| layer.name == "SOIL").unwrap();
        assert_eq!(soil.color.index(), Some(AciColor::Green.index()));
        assert_eq!(soil.line_type_name, "DASHED");

        let outline = drawing
            .layers()
            .find(|layer| layer.name == "WALL_OUTLINE")
            .unwrap();
        assert_eq!(outline.line_type_name, "CONTINUOUS");

        let dashed = drawing
            .line_types()
            .find(|line_type| line_type.name == "DASHED")
            .unwrap();
        assert_eq!(dashed.dash_dot_space_lengths, vec![0.2, -0.1]);
    }

    #[test]
    fn test_entities_are_tagged_with_layer() {
        let mut backend = backend_with_layers();
        backend
            .draw_circle("WALL_OUTLINE", Point::new(1.0, 1.0), 0.4)
            .unwrap();
        backend
            .draw_text("SOIL", Point::new(0.5, 0.5), 0.1, 90.0, "2∅1/2\"@20cm")
            .unwrap();
        let drawing = reload(backend);
        let entities: Vec<&Entity> = drawing.entities().collect();
        assert_eq!(entities.len(), 2);

        let EntityType::Circle(circle) = &entities[0].specific else {
            panic!("expected a circle, got {:?}", entities[0].specific);
        };
        assert_eq!(entities[0].common.layer, "WALL_OUTLINE");
        assert_eq!(circle.radius, 0.4);

        let EntityType::Text(text) = &entities[1].specific else {
            panic!("expected text, got {:?}", entities[1].specific);
        };
        assert_eq!(entities[1].common.layer, "SOIL");
        assert_eq!(text.value, "2%%c1/2\"@20cm");
        assert_eq!(text.rotation, 90.0);
    }

    #[test]
    fn test_unknown_layer_rejected() {
        let mut backend = backend_with_layers();
        let err = backend
            .draw_line("DIM", Point::new(0.0, 0.0), Point::new(1.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, BackendError::UnknownLayer { ref layer } if layer == "DIM"));
    }

    #[test]
    fn test_non_finite_radius_rejected() {
        let mut backend = backend_with_layers();
        let err = backend
            .draw_circle("SOIL", Point::new(0.0, 0.0), f64::INFINITY)
            .unwrap_err();
        assert!(matches!(err, BackendError::NonFinite { entity: "CIRCLE", .. }));
    }
}

//! Drawing backends.
//!
//! This is the last stage of sheet generation. A composed [`Sheet`] is
//! streamed into a [`DrawingBackend`], which turns layers and primitives into
//! a file format.
//!
//! # Pipeline Position
//!
//! ```text
//! SheetRequest
//!     ↓ geometry
//! WallProfile, contours, bars
//!     ↓ compose
//! LayeredPrimitives per view
//!     ↓ layout
//! Sheet
//!     ↓ export (this module)
//! Bytes
//! ```
//!
//! # Available Backends
//!
//! - [`DxfBackend`]: AutoCAD DXF R12
//! - [`SvgBackend`]: SVG preview, one `<g>` per layer
//!
//! # Error Handling
//!
//! Backends reject primitives on layers that were never added and
//! coordinates that are not finite. [`BackendError`] converts into
//! [`WallSheetError::Backend`] at the crate boundary.
//!
//! [`Sheet`]: crate::layout::Sheet
//! [`WallSheetError::Backend`]: crate::WallSheetError::Backend

mod dxf;
mod svg;

pub use dxf::DxfBackend;
pub use svg::SvgBackend;

use std::io;

use thiserror::Error;

use wallsheet_core::{
    draw::{LayerDefinition, LayeredPrimitives, Primitive, TextLabel},
    geometry::Point,
};

/// Errors raised by a drawing backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("layer `{layer}` was drawn on before it was added")]
    UnknownLayer { layer: String },

    #[error("non-finite coordinate in {entity} on layer `{layer}`")]
    NonFinite { layer: String, entity: &'static str },

    #[error("failed to serialize drawing: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write DXF document: {0}")]
    Dxf(#[from] ::dxf::DxfError),
}

/// A sink for layers and primitives that produces a drawing file.
///
/// Layers must be added before anything is drawn on them. Adding a layer
/// twice keeps the first definition.
pub trait DrawingBackend {
    /// Registers a layer with its color and line style.
    fn add_layer(&mut self, layer: &LayerDefinition);

    /// Draws a straight segment.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::UnknownLayer`] when `layer` was never added and
    /// [`BackendError::NonFinite`] when an endpoint is not finite.
    fn draw_line(&mut self, layer: &str, start: Point, end: Point) -> Result<(), BackendError>;

    /// Draws a circle.
    ///
    /// # Errors
    ///
    /// See [`DrawingBackend::draw_line`].
    fn draw_circle(&mut self, layer: &str, center: Point, radius: f64)
    -> Result<(), BackendError>;

    /// Draws single-line text anchored at its lower-left corner.
    ///
    /// `rotation` is in degrees, counter-clockwise.
    ///
    /// # Errors
    ///
    /// See [`DrawingBackend::draw_line`].
    fn draw_text(
        &mut self,
        layer: &str,
        at: Point,
        height: f64,
        rotation: f64,
        text: &str,
    ) -> Result<(), BackendError>;

    /// Finishes the drawing and returns the file contents.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Io`] or [`BackendError::Dxf`] if the document
    /// cannot be written.
    fn serialize(self) -> Result<Vec<u8>, BackendError>
    where
        Self: Sized;

    /// Draws any [`Primitive`] through the matching method.
    ///
    /// # Errors
    ///
    /// See [`DrawingBackend::draw_line`].
    fn draw_primitive(&mut self, layer: &str, primitive: &Primitive) -> Result<(), BackendError> {
        match primitive {
            Primitive::Line { start, end } => self.draw_line(layer, *start, *end),
            Primitive::Circle { center, radius } => self.draw_circle(layer, *center, *radius),
            Primitive::Text(label) => self.draw_text(
                layer,
                label.at(),
                label.height(),
                label.rotation(),
                label.content(),
            ),
        }
    }
}

/// Streams a collection into a backend: every layer first, then every
/// primitive in insertion order.
///
/// # Errors
///
/// Propagates the first backend error.
pub fn emit_primitives(
    output: &LayeredPrimitives,
    backend: &mut impl DrawingBackend,
) -> Result<(), BackendError> {
    for layer in output.layers() {
        backend.add_layer(layer);
    }
    for (layer, primitive) in output.items() {
        backend.draw_primitive(layer, primitive)?;
    }
    Ok(())
}

/// Layers and primitives recorded by a backend until it serializes.
#[derive(Debug, Default)]
struct Recording {
    layers: Vec<LayerDefinition>,
    items: Vec<(usize, Primitive)>,
}

impl Recording {
    fn add_layer(&mut self, layer: &LayerDefinition) {
        if self.layers.iter().all(|known| known.name() != layer.name()) {
            self.layers.push(layer.clone());
        }
    }

    fn layer_index(&self, layer: &str) -> Result<usize, BackendError> {
        self.layers
            .iter()
            .position(|known| known.name() == layer)
            .ok_or_else(|| BackendError::UnknownLayer {
                layer: layer.to_string(),
            })
    }

    fn record(&mut self, layer: &str, primitive: Primitive) -> Result<(), BackendError> {
        let index = self.layer_index(layer)?;
        if !primitive.is_finite() {
            let entity = match primitive {
                Primitive::Line { .. } => "LINE",
                Primitive::Circle { .. } => "CIRCLE",
                Primitive::Text(_) => "TEXT",
            };
            return Err(BackendError::NonFinite {
                layer: layer.to_string(),
                entity,
            });
        }
        self.items.push((index, primitive));
        Ok(())
    }

    fn record_text(
        &mut self,
        layer: &str,
        at: Point,
        height: f64,
        rotation: f64,
        text: &str,
    ) -> Result<(), BackendError> {
        let label = TextLabel::new(at, height, text).with_rotation(rotation);
        self.record(layer, Primitive::Text(label))
    }

    fn layers(&self) -> &[LayerDefinition] {
        &self.layers
    }

    fn items(&self) -> impl Iterator<Item = (&LayerDefinition, &Primitive)> {
        self.items
            .iter()
            .map(|(index, primitive)| (&self.layers[*index], primitive))
    }
}

#[cfg(test)]
mod tests {
    use wallsheet_core::{color::AciColor, draw::LineStyle};

    use super::*;

    #[test]
    fn test_emit_declares_layers_before_drawing() {
        let mut output = LayeredPrimitives::new();
        output.declare(LayerDefinition::new(
            "WALL",
            AciColor::Blue,
            LineStyle::Continuous,
        ));
        output.add(
            "WALL",
            Primitive::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
        );

        let mut backend = DxfBackend::new();
        emit_primitives(&output, &mut backend).unwrap();
        let text = String::from_utf8(backend.serialize().unwrap()).unwrap();
        assert!(text.contains("WALL"));
        assert!(text.contains("LINE"));
    }

    #[test]
    fn test_emit_stops_on_undeclared_layer() {
        let mut output = LayeredPrimitives::new();
        output.add("GHOST", Primitive::circle(Point::new(0.0, 0.0), 1.0));

        let mut backend = SvgBackend::new();
        let err = emit_primitives(&output, &mut backend).unwrap_err();
        assert!(matches!(err, BackendError::UnknownLayer { ref layer } if layer == "GHOST"));
    }

    #[test]
    fn test_recording_keeps_first_definition() {
        let mut recording = Recording::default();
        recording.add_layer(&LayerDefinition::new(
            "SOIL",
            AciColor::Green,
            LineStyle::Dashed,
        ));
        recording.add_layer(&LayerDefinition::new(
            "SOIL",
            AciColor::Red,
            LineStyle::Continuous,
        ));
        assert_eq!(recording.layers().len(), 1);
        assert_eq!(recording.layers()[0].color(), AciColor::Green);
    }

    #[test]
    fn test_recording_rejects_non_finite() {
        let mut recording = Recording::default();
        recording.add_layer(&LayerDefinition::new(
            "DIM",
            AciColor::Yellow,
            LineStyle::Continuous,
        ));
        let err = recording
            .record(
                "DIM",
                Primitive::line(Point::new(f64::NAN, 0.0), Point::new(1.0, 0.0)),
            )
            .unwrap_err();
        assert!(matches!(err, BackendError::NonFinite { entity: "LINE", .. }));
        assert_eq!(recording.items().count(), 0);
    }
}

//! Layer-based primitive collection.
//!
//! Views never switch an "active layer". Each primitive is recorded together
//! with the name of the layer it belongs to, and the layers themselves are
//! declared up front with their color and line style.
//!
//! # Overview
//!
//! - [`LayerDefinition`]: A named layer with an ACI color and a line style
//! - [`LayeredPrimitives`]: An ordered collection of `(layer, primitive)` pairs
//!
//! # Example
//!
//! ```
//! # use wallsheet_core::color::AciColor;
//! # use wallsheet_core::draw::{LayerDefinition, LayeredPrimitives, LineStyle, Primitive};
//! # use wallsheet_core::geometry::Point;
//! let mut output = LayeredPrimitives::new();
//! output.declare(LayerDefinition::new("WALL", AciColor::White, LineStyle::Continuous));
//! output.add("WALL", Primitive::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0)));
//!
//! assert_eq!(output.layers().count(), 1);
//! assert_eq!(output.len(), 1);
//! ```

use indexmap::IndexMap;

use crate::{
    color::AciColor,
    draw::{LineStyle, Primitive},
    geometry::{Bounds, Point},
};

/// A named drawing layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerDefinition {
    name: String,
    color: AciColor,
    line_style: LineStyle,
}

impl LayerDefinition {
    pub fn new(name: impl Into<String>, color: AciColor, line_style: LineStyle) -> Self {
        Self {
            name: name.into(),
            color,
            line_style,
        }
    }

    /// Returns the layer name as written to the output.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> AciColor {
        self.color
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }
}

/// Primitives grouped by drawing layer.
///
/// Layer declarations keep their first-declaration order, and primitives keep
/// insertion order. Backends receive both in that order.
#[derive(Debug, Clone, Default)]
pub struct LayeredPrimitives {
    layers: IndexMap<String, LayerDefinition>,
    items: Vec<(String, Primitive)>,
}

impl LayeredPrimitives {
    /// Creates a new empty `LayeredPrimitives`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a layer.
    ///
    /// Declaring a layer that already exists keeps the first definition.
    pub fn declare(&mut self, layer: LayerDefinition) {
        self.layers.entry(layer.name.clone()).or_insert(layer);
    }

    /// Adds a single primitive to the named layer.
    ///
    /// The layer is not required to be declared here; backends reject
    /// primitives on layers they were never told about.
    pub fn add(&mut self, layer: &str, primitive: Primitive) {
        self.items.push((layer.to_string(), primitive));
    }

    /// Adds every primitive yielded by `primitives` to the named layer.
    pub fn extend(&mut self, layer: &str, primitives: impl IntoIterator<Item = Primitive>) {
        self.items
            .extend(primitives.into_iter().map(|p| (layer.to_string(), p)));
    }

    /// Appends the layers and primitives of another collection.
    pub fn merge(&mut self, other: LayeredPrimitives) {
        for (_, layer) in other.layers {
            self.declare(layer);
        }
        self.items.extend(other.items);
    }

    /// Returns a copy of this collection with every primitive moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            layers: self.layers.clone(),
            items: self
                .items
                .iter()
                .map(|(layer, p)| (layer.clone(), p.translate(offset)))
                .collect(),
        }
    }

    /// Declared layers in declaration order.
    pub fn layers(&self) -> impl Iterator<Item = &LayerDefinition> {
        self.layers.values()
    }

    /// Looks up a declared layer by name.
    pub fn layer(&self, name: &str) -> Option<&LayerDefinition> {
        self.layers.get(name)
    }

    /// All `(layer, primitive)` pairs in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.items.iter().map(|(layer, p)| (layer.as_str(), p))
    }

    /// Primitives recorded on the named layer.
    pub fn on_layer<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Primitive> + 'a {
        self.items
            .iter()
            .filter(move |(layer, _)| layer == name)
            .map(|(_, p)| p)
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no primitive was added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds of every primitive, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.items
            .iter()
            .map(|(_, p)| p.bounds())
            .reduce(|acc, b| acc.merge(&b))
    }

    /// Consumes the collection, returning declarations and pairs.
    pub fn into_parts(self) -> (Vec<LayerDefinition>, Vec<(String, Primitive)>) {
        (self.layers.into_values().collect(), self.items)
    }
}

//! Linear dimensions.
//!
//! ```text
//!        ├──────── 0.74m ────────┤      <- dimension line at baseline + offset
//!        │                       │      <- extension lines
//!   ─────┴───────────────────────┴────  <- baseline (measured feature)
//! ```

use crate::{
    draw::{LayeredPrimitives, Primitive, TextLabel},
    geometry::Point,
};

/// Extra length past the dimension line for extension lines.
const EXTENSION_OVERSHOOT: f64 = 0.1;
/// Length of the tick strokes at both ends.
const TICK_SIZE: f64 = 0.05;
const TEXT_HEIGHT: f64 = 0.1;
/// Text gap past the line when the dimension sits above/right of its feature.
const TEXT_GAP_POSITIVE: f64 = 0.2;
/// Text gap before the line when the dimension sits below/left of its feature.
const TEXT_GAP_NEGATIVE: f64 = 0.4;
/// Shift of the text start from the span midpoint.
const TEXT_CENTERING: f64 = 0.1;

/// Direction a dimension measures along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A linear dimension between two coordinates on one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    axis: Axis,
    start: f64,
    end: f64,
    baseline: f64,
    offset: f64,
    label: String,
}

/// Builds a dimension spanning `p1..p2` along `axis`.
///
/// `baseline` is the cross-axis coordinate of the measured feature (a `y`
/// for horizontal dimensions, an `x` for vertical ones) and `offset` moves
/// the dimension line away from it. The span is normalized so that
/// `start <= end`.
///
/// # Examples
///
/// ```
/// # use wallsheet_core::annotation::{Axis, draw_dimension};
/// let dim = draw_dimension(Axis::Horizontal, 3.0, 1.0, 0.0, -0.3, "2.00m");
/// assert_eq!(dim.start(), 1.0);
/// assert_eq!(dim.end(), 3.0);
/// ```
pub fn draw_dimension(
    axis: Axis,
    p1: f64,
    p2: f64,
    baseline: f64,
    offset: f64,
    text: impl Into<String>,
) -> Dimension {
    Dimension {
        axis,
        start: p1.min(p2),
        end: p1.max(p2),
        baseline,
        offset,
        label: text.into(),
    }
}

impl Dimension {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Measured length.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Cross-axis coordinate of the dimension line.
    pub fn line_position(&self) -> f64 {
        self.baseline + self.offset
    }

    /// Maps `(along, across)` into drawing coordinates.
    fn at(&self, along: f64, across: f64) -> Point {
        match self.axis {
            Axis::Horizontal => Point::new(along, across),
            Axis::Vertical => Point::new(across, along),
        }
    }

    /// Returns the primitives making up this dimension.
    pub fn primitives(&self) -> Vec<Primitive> {
        let line = self.line_position();
        let direction = if self.offset > 0.0 { 1.0 } else { -1.0 };
        let extension = self.offset.abs() + EXTENSION_OVERSHOOT;

        let mut primitives = Vec::with_capacity(9);

        for along in [self.start, self.end] {
            primitives.push(Primitive::line(
                self.at(along, self.baseline),
                self.at(along, self.baseline + direction * extension),
            ));
        }

        primitives.push(Primitive::line(
            self.at(self.start, line),
            self.at(self.end, line),
        ));

        for (along, inward) in [(self.start, TICK_SIZE), (self.end, -TICK_SIZE)] {
            for side in [TICK_SIZE, -TICK_SIZE] {
                primitives.push(Primitive::line(
                    self.at(along, line),
                    self.at(along + inward, line + side),
                ));
            }
        }

        let text_across = if self.offset > 0.0 {
            line + TEXT_GAP_POSITIVE
        } else {
            line - TEXT_GAP_NEGATIVE
        };
        let text_along = (self.start + self.end) / 2.0 - TEXT_CENTERING;
        let rotation = match self.axis {
            Axis::Horizontal => 0.0,
            Axis::Vertical => 90.0,
        };
        primitives.push(Primitive::Text(
            TextLabel::new(self.at(text_along, text_across), TEXT_HEIGHT, self.label.clone())
                .with_rotation(rotation),
        ));

        primitives
    }

    /// Adds this dimension's primitives to `layer`.
    pub fn render(&self, layer: &str, out: &mut LayeredPrimitives) {
        out.extend(layer, self.primitives());
    }
}

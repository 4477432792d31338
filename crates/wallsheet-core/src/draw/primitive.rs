//! Drawing primitives.
//!
//! Every view is reduced to three primitive kinds before it reaches a
//! backend: straight lines, circles and single-line text.

use crate::geometry::{Bounds, Point};

/// Width of one glyph relative to the text height.
///
/// Backends use their own fonts; this factor only feeds bounding-box
/// estimates for layout checks.
pub const GLYPH_WIDTH_FACTOR: f64 = 0.7;

/// A single line of text anchored at its lower-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    at: Point,
    height: f64,
    rotation: f64,
    content: String,
}

impl TextLabel {
    /// Creates horizontal text.
    pub fn new(at: Point, height: f64, content: impl Into<String>) -> Self {
        Self {
            at,
            height,
            rotation: 0.0,
            content: content.into(),
        }
    }

    /// Sets the rotation in degrees, counter-clockwise.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn at(&self) -> Point {
        self.at
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Estimated advance width of the text.
    pub fn estimated_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.height * GLYPH_WIDTH_FACTOR
    }
}

/// A primitive drawing element.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
    Text(TextLabel),
}

impl Primitive {
    /// Convenience constructor for [`Primitive::Line`].
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line { start, end }
    }

    /// Convenience constructor for [`Primitive::Circle`].
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    /// Convenience constructor for horizontal [`Primitive::Text`].
    pub fn text(at: Point, height: f64, content: impl Into<String>) -> Self {
        Self::Text(TextLabel::new(at, height, content))
    }

    /// Returns a copy moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        match self {
            Self::Line { start, end } => Self::Line {
                start: start.add_point(offset),
                end: end.add_point(offset),
            },
            Self::Circle { center, radius } => Self::Circle {
                center: center.add_point(offset),
                radius: *radius,
            },
            Self::Text(label) => Self::Text(TextLabel {
                at: label.at.add_point(offset),
                ..label.clone()
            }),
        }
    }

    /// Returns `true` when every coordinate and size is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Line { start, end } => start.is_finite() && end.is_finite(),
            Self::Circle { center, radius } => center.is_finite() && radius.is_finite(),
            Self::Text(label) => {
                label.at.is_finite() && label.height.is_finite() && label.rotation.is_finite()
            }
        }
    }

    /// Axis-aligned bounds of the primitive.
    ///
    /// Text bounds are estimated from [`GLYPH_WIDTH_FACTOR`] and take the
    /// rotation into account.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Line { start, end } => Bounds::from_corners(*start, *end),
            Self::Circle { center, radius } => Bounds::from_corners(
                center.sub_point(Point::new(*radius, *radius)),
                center.add_point(Point::new(*radius, *radius)),
            ),
            Self::Text(label) => {
                let angle = label.rotation.to_radians();
                let along = Point::new(angle.cos(), angle.sin());
                let up = Point::new(-angle.sin(), angle.cos());
                let width = label.estimated_width();
                let corners = [
                    label.at,
                    label.at.add_point(along.scale(width)),
                    label.at.add_point(up.scale(label.height)),
                    label
                        .at
                        .add_point(along.scale(width))
                        .add_point(up.scale(label.height)),
                ];
                // `corners` is never empty
                Bounds::from_points(corners).unwrap_or_else(|| Bounds::from_corners(label.at, label.at))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_translate_line() {
        let line = Primitive::line(Point::new(0.0, 0.0), Point::new(1.0, 2.0));
        let Primitive::Line { start, end } = line.translate(Point::new(10.0, 5.0)) else {
            panic!("expected a line");
        };
        assert_approx_eq!(f64, start.x(), 10.0);
        assert_approx_eq!(f64, end.y(), 7.0);
    }

    #[test]
    fn test_translate_keeps_text_attributes() {
        let text = Primitive::Text(
            TextLabel::new(Point::new(1.0, 1.0), 0.1, "1.20m").with_rotation(90.0),
        );
        let Primitive::Text(label) = text.translate(Point::new(1.0, 0.0)) else {
            panic!("expected text");
        };
        assert_approx_eq!(f64, label.at().x(), 2.0);
        assert_approx_eq!(f64, label.rotation(), 90.0);
        assert_eq!(label.content(), "1.20m");
    }

    #[test]
    fn test_circle_bounds() {
        let bounds = Primitive::circle(Point::new(1.0, 1.0), 0.5).bounds();
        assert_approx_eq!(f64, bounds.min_x(), 0.5);
        assert_approx_eq!(f64, bounds.max_y(), 1.5);
    }

    #[test]
    fn test_rotated_text_bounds_extend_upwards() {
        let label = TextLabel::new(Point::new(0.0, 0.0), 0.1, "abcd").with_rotation(90.0);
        let bounds = Primitive::Text(label.clone()).bounds();

        assert_approx_eq!(f64, bounds.height(), label.estimated_width(), epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.min_x(), -0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_is_finite() {
        assert!(Primitive::circle(Point::new(0.0, 0.0), 1.0).is_finite());
        assert!(!Primitive::line(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0)).is_finite());
    }
}

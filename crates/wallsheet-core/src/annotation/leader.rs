//! Leaders and related callout symbols.

use std::f64::consts::FRAC_PI_6;

use crate::{
    draw::{LayeredPrimitives, Primitive},
    geometry::Point,
};

const ARROW_SIZE: f64 = 0.05;
const TAIL_LENGTH: f64 = 0.3;
const LEADER_TEXT_HEIGHT: f64 = 0.08;
const LEADER_TEXT_GAP: Point = Point::new(0.05, 0.02);

const MULTI_EXTENSION: f64 = 0.1;
const MULTI_TEXT_HEIGHT: f64 = 0.12;

/// Two arrow strokes at `tip`, opening back towards `from`.
fn arrow_head(tip: Point, from: Point) -> [Primitive; 2] {
    let direction = tip.sub_point(from);
    let angle = direction.y().atan2(direction.x());
    [-FRAC_PI_6, FRAC_PI_6].map(|spread| {
        let back = Point::new(
            tip.x() - ARROW_SIZE * (angle + spread).cos(),
            tip.y() - ARROW_SIZE * (angle + spread).sin(),
        );
        Primitive::line(tip, back)
    })
}

/// A leader from a point of interest to a text callout.
///
/// ```text
///                    ┌ text
///           target ●───── (tail)
///                 /
///                /
///    anchor ◄───
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    anchor: Point,
    target: Point,
    text: String,
}

/// Builds a leader pointing at `anchor` with its text near `target`.
pub fn draw_leader(anchor: Point, target: Point, text: impl Into<String>) -> Leader {
    Leader {
        anchor,
        target,
        text: text.into(),
    }
}

impl Leader {
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// End of the horizontal tail the text sits on.
    pub fn tail_end(&self) -> Point {
        self.target.add_point(Point::new(TAIL_LENGTH, 0.0))
    }

    pub fn primitives(&self) -> Vec<Primitive> {
        let mut primitives = vec![Primitive::line(self.anchor, self.target)];
        primitives.extend(arrow_head(self.anchor, self.target));
        primitives.push(Primitive::line(self.target, self.tail_end()));
        primitives.push(Primitive::text(
            self.tail_end().add_point(LEADER_TEXT_GAP),
            LEADER_TEXT_HEIGHT,
            self.text.clone(),
        ));
        primitives
    }

    pub fn render(&self, layer: &str, out: &mut LayeredPrimitives) {
        out.extend(layer, self.primitives());
    }
}

/// Side of the structure a multi-leader leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderDirection {
    Top,
    Bottom,
    Left,
    Right,
}

impl LeaderDirection {
    fn unit(self) -> Point {
        match self {
            Self::Top => Point::new(0.0, 1.0),
            Self::Bottom => Point::new(0.0, -1.0),
            Self::Left => Point::new(-1.0, 0.0),
            Self::Right => Point::new(1.0, 0.0),
        }
    }

    /// Horizontal shift of the text from the leader end.
    fn text_shift(self) -> f64 {
        match self {
            Self::Right => 0.1,
            Self::Left => -0.5,
            Self::Top | Self::Bottom => 0.0,
        }
    }
}

/// A leader with a short straight extension off the structure.
///
/// The extension leaves `anchor` in `direction`; the main line runs from
/// there to just short of `target`, where the arrow sits.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLeader {
    anchor: Point,
    target: Point,
    direction: LeaderDirection,
    text: String,
}

impl MultiLeader {
    pub fn new(
        anchor: Point,
        target: Point,
        direction: LeaderDirection,
        text: impl Into<String>,
    ) -> Self {
        Self {
            anchor,
            target,
            direction,
            text: text.into(),
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn direction(&self) -> LeaderDirection {
        self.direction
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn primitives(&self) -> Vec<Primitive> {
        let step = self.direction.unit().scale(MULTI_EXTENSION);
        let extension_start = self.anchor.add_point(step);
        let extension_end = self.target.sub_point(step);

        let mut primitives = vec![
            Primitive::line(self.anchor, extension_start),
            Primitive::line(extension_start, extension_end),
        ];
        primitives.extend(arrow_head(extension_end, extension_start));
        primitives.push(Primitive::text(
            self.target
                .add_point(Point::new(self.direction.text_shift(), 0.05)),
            MULTI_TEXT_HEIGHT,
            self.text.clone(),
        ));
        primitives
    }

    pub fn render(&self, layer: &str, out: &mut LayeredPrimitives) {
        out.extend(layer, self.primitives());
    }
}

/// Zigzag weld mark with its note.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldSymbol {
    origin: Point,
    note: String,
}

impl WeldSymbol {
    const SIZE: f64 = 0.1;
    const POINTS: usize = 5;

    pub fn new(origin: Point, note: impl Into<String>) -> Self {
        Self {
            origin,
            note: note.into(),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// The zigzag vertices, alternating between the base line and half the symbol size.
    pub fn zigzag(&self) -> Vec<Point> {
        (0..Self::POINTS)
            .map(|i| {
                let rise = if i % 2 == 0 { 0.0 } else { Self::SIZE / 2.0 };
                self.origin
                    .add_point(Point::new(i as f64 * Self::SIZE / 2.0, rise))
            })
            .collect()
    }

    pub fn primitives(&self) -> Vec<Primitive> {
        let mut primitives: Vec<Primitive> = self
            .zigzag()
            .windows(2)
            .map(|w| Primitive::line(w[0], w[1]))
            .collect();
        primitives.push(Primitive::text(
            self.origin.add_point(Point::new(0.3, 0.0)),
            0.15,
            self.note.clone(),
        ));
        primitives
    }

    pub fn render(&self, layer: &str, out: &mut LayeredPrimitives) {
        out.extend(layer, self.primitives());
    }
}

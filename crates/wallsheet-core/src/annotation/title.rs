use crate::{
    draw::{LayeredPrimitives, Primitive},
    geometry::Point,
};

/// Drawing scale printed under every view title.
pub const SCALE_LABEL: &str = "SCALE 1:50";

/// Offset of the title block from the wall's base-left corner.
const TITLE_OFFSET: Point = Point::new(-1.0, -2.5);
const TITLE_CIRCLE_RADIUS: f64 = 0.4;

/// Reference circle, view number, title and scale under a wall view.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    number: u32,
    title: String,
    anchor: Point,
}

/// Places a title block for a view whose wall base-left corner is `base_point`.
pub fn title_block(number: u32, title: impl Into<String>, base_point: Point) -> TitleBlock {
    TitleBlock {
        number,
        title: title.into(),
        anchor: base_point.add_point(TITLE_OFFSET),
    }
}

impl TitleBlock {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Center of the reference circle.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn primitives(&self) -> Vec<Primitive> {
        vec![
            Primitive::circle(self.anchor, TITLE_CIRCLE_RADIUS),
            Primitive::text(
                self.anchor.add_point(Point::new(-0.05, -0.07)),
                0.15,
                self.number.to_string(),
            ),
            Primitive::text(
                self.anchor.add_point(Point::new(0.6, 0.0)),
                0.12,
                self.title.clone(),
            ),
            Primitive::text(
                self.anchor.add_point(Point::new(0.6, -0.2)),
                0.1,
                SCALE_LABEL,
            ),
        ]
    }

    pub fn render(&self, layer: &str, out: &mut LayeredPrimitives) {
        out.extend(layer, self.primitives());
    }
}

/// Title, scale and numbered circle of a mesh face, relative to the view origin.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBlock {
    number: u32,
    title: String,
    origin: Point,
}

impl InfoBlock {
    const TITLE_RISE: f64 = 1.0;
    const CIRCLE_RADIUS: f64 = 0.3;

    pub fn new(number: u32, title: impl Into<String>, origin: Point) -> Self {
        Self {
            number,
            title: title.into(),
            origin,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn primitives(&self) -> Vec<Primitive> {
        let title_at = self.origin.add_point(Point::new(0.0, Self::TITLE_RISE));
        let circle_at = title_at.add_point(Point::new(-0.5, 0.0));
        vec![
            Primitive::text(title_at, 0.15, self.title.clone()),
            Primitive::text(title_at.add_point(Point::new(0.0, -0.3)), 0.10, SCALE_LABEL),
            Primitive::circle(circle_at, Self::CIRCLE_RADIUS),
            Primitive::text(circle_at, 0.12, self.number.to_string()),
        ]
    }

    pub fn render(&self, layer: &str, out: &mut LayeredPrimitives) {
        out.extend(layer, self.primitives());
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_title_block_sits_below_base() {
        let block = title_block(1, "SECTION", Point::new(0.0, 0.0));
        assert_approx_eq!(f64, block.anchor().x(), -1.0);
        assert_approx_eq!(f64, block.anchor().y(), -2.5);

        let primitives = block.primitives();
        assert!(matches!(primitives[0], Primitive::Circle { radius, .. } if radius == 0.4));
        let texts: Vec<_> = primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(label) => Some(label.content().to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["1", "SECTION", SCALE_LABEL]);
    }

    #[test]
    fn test_info_block_layout() {
        let info = InfoBlock::new(6, "FOOTING BOTTOM REINFORCEMENT", Point::new(0.0, 0.0));
        let primitives = info.primitives();
        assert_eq!(primitives.len(), 4);

        let Primitive::Circle { center, radius } = primitives[2] else {
            panic!("expected reference circle");
        };
        assert_approx_eq!(f64, center.x(), -0.5);
        assert_approx_eq!(f64, center.y(), 1.0);
        assert_approx_eq!(f64, radius, 0.3);

        let Primitive::Text(scale) = &primitives[1] else {
            panic!("expected scale text");
        };
        assert_approx_eq!(f64, scale.at().y(), 0.7, epsilon = 1e-12);
    }
}

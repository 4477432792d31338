use wallsheet_core::{
    color::AciColor,
    draw::{LayerDefinition, LayeredPrimitives, LineStyle},
    geometry::Point,
};

use super::polyline;

const FRAME: &str = "FRAME";

fn rectangle(min: Point, max: Point) -> [Point; 5] {
    [
        min,
        Point::new(max.x(), min.y()),
        max,
        Point::new(min.x(), max.y()),
        min,
    ]
}

/// Outer sheet border plus an inner border inset by `margin`.
///
/// Unlike the views, the frame is built directly in sheet coordinates.
pub fn sheet_frame(origin: Point, width: f64, height: f64, margin: f64) -> LayeredPrimitives {
    let mut output = LayeredPrimitives::new();
    output.declare(LayerDefinition::new(
        FRAME,
        AciColor::White,
        LineStyle::Continuous,
    ));

    let far = origin.add_point(Point::new(width, height));
    let inset = Point::new(margin, margin);
    output.extend(FRAME, polyline(&rectangle(origin, far)));
    output.extend(
        FRAME,
        polyline(&rectangle(origin.add_point(inset), far.sub_point(inset))),
    );
    output
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_frame_borders() {
        let frame = sheet_frame(Point::new(10.0, 5.0), 51.4, 36.4, 0.6);
        assert_eq!(frame.on_layer(FRAME).count(), 8);

        let bounds = frame.bounds().unwrap();
        assert_approx_eq!(f64, bounds.min_x(), 10.0);
        assert_approx_eq!(f64, bounds.max_x(), 61.4);
        assert_approx_eq!(f64, bounds.max_y(), 41.4);
    }
}

//! Drainage section: outline, front soil line and PB drainage pipes.

use log::{debug, trace};

use wallsheet_core::{
    annotation::{WallViewKind, place_wall_dimensions},
    color::AciColor,
    draw::{LayerDefinition, LayeredPrimitives, LineStyle, Primitive},
    geometry::{EPSILON, Point},
    wall::{VertexRole, WallProfile},
};

use super::{declare_wall_annotation_layers, draw_outline, draw_title, layers};

const OUTLINE: &str = "WALL_DRAINAGE";
const SOIL: &str = "SOIL";
const PIPES: &str = "PB_PIPES";

/// Vertical distance between pipes, starting above the soil line.
const PIPE_PITCH: f64 = 1.0;
/// Gap between the two lines drawn for one pipe.
const PIPE_GAP: f64 = 0.05;
const PIPE_SLOPE_DEGREES: f64 = 20.0;
/// Longest pipe drawn when it does not reach the back face.
const PIPE_MAX_STUB: f64 = 0.5;

fn declare_layers(output: &mut LayeredPrimitives) {
    output.declare(LayerDefinition::new(
        OUTLINE,
        AciColor::Blue,
        LineStyle::Continuous,
    ));
    output.declare(LayerDefinition::new(SOIL, AciColor::Green, LineStyle::Dashed));
    output.declare(LayerDefinition::new(
        PIPES,
        AciColor::Red,
        LineStyle::Continuous,
    ));
    declare_wall_annotation_layers(output);
}

fn cross(a: Point, b: Point) -> f64 {
    a.x() * b.y() - a.y() * b.x()
}

/// Axis of one pipe, from the front face of the stem up toward its back face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainagePipe {
    pub start: Point,
    pub end: Point,
}

impl DrainagePipe {
    /// The two parallel lines that draw the pipe.
    pub fn primitives(&self) -> [Primitive; 2] {
        let half_gap = Point::new(0.0, PIPE_GAP / 2.0);
        [
            Primitive::line(self.start.add_point(half_gap), self.end.add_point(half_gap)),
            Primitive::line(self.start.sub_point(half_gap), self.end.sub_point(half_gap)),
        ]
    }
}

/// Where the pipe from `start` along `direction` leaves the stem.
///
/// The pipe ends on the back face `StemBaseRight → CrownRight` when it hits
/// it. Otherwise it is cut short to 80% of the stem width at that height, at
/// most [`PIPE_MAX_STUB`].
fn pipe_end(profile: &WallProfile, start: Point, direction: Point) -> Option<Point> {
    let face_start = profile.point(VertexRole::StemBaseRight);
    let face = profile.point(VertexRole::CrownRight).sub_point(face_start);

    let denominator = cross(direction, face);
    if denominator.abs() > EPSILON {
        let to_face = face_start.sub_point(start);
        let t = cross(to_face, face) / denominator;
        let s = cross(to_face, direction) / denominator;
        if t > 0.0 && (0.0..=1.0).contains(&s) {
            return Some(start.add_point(direction.scale(t)));
        }
    }

    if face.y().abs() <= EPSILON {
        return None;
    }
    let s = (start.y() - face_start.y()) / face.y();
    if !(0.0..=1.0).contains(&s) {
        return None;
    }
    let available = face_start.x() + s * face.x() - start.x();
    let length = (available * 0.8).min(PIPE_MAX_STUB);
    Some(start.add_point(direction.scale(length)))
}

/// Pipes at every [`PIPE_PITCH`] above `soil`, up to the crown.
///
/// Each pipe starts on the front face `CrownLeft → StemBaseLeft` and rises at
/// 20°. Heights where the front face does not exist get no pipe.
pub fn drainage_pipes(profile: &WallProfile, soil: f64) -> Vec<DrainagePipe> {
    let top = profile.point(VertexRole::CrownRight).y();
    if top <= soil + PIPE_PITCH {
        return Vec::new();
    }

    let front_start = profile.point(VertexRole::CrownLeft);
    let front = profile.point(VertexRole::StemBaseLeft).sub_point(front_start);
    let slope = PIPE_SLOPE_DEGREES.to_radians();
    let direction = Point::new(slope.cos(), slope.sin());

    let mut pipes = Vec::new();
    let mut i = 1;
    loop {
        let y = soil + PIPE_PITCH * i as f64;
        if y > top {
            break;
        }
        i += 1;

        if front.y().abs() <= EPSILON {
            continue;
        }
        let t = (y - front_start.y()) / front.y();
        if !(0.0..=1.0).contains(&t) {
            trace!(y; "Pipe height outside the front face, skipping");
            continue;
        }
        let start = Point::new(front_start.x() + t * front.x(), y);
        if let Some(end) = pipe_end(profile, start, direction) {
            pipes.push(DrainagePipe { start, end });
        }
    }
    pipes
}

/// Builds the drainage view of section 1-1.
///
/// The soil line runs from the toe end of the footing back to the front of
/// the wall at the embedment height `B`.
pub fn drainage_view(profile: &WallProfile) -> LayeredPrimitives {
    let mut output = LayeredPrimitives::new();
    declare_layers(&mut output);

    draw_outline(profile, OUTLINE, &mut output);

    let soil = profile.min_y() + profile.parameters().b;
    output.add(
        SOIL,
        Primitive::line(
            Point::new(profile.base_total() / 3.0, soil),
            Point::new(profile.min_x(), soil),
        ),
    );

    let pipes = drainage_pipes(profile, soil);
    for pipe in &pipes {
        output.extend(PIPES, pipe.primitives());
    }

    for dimension in place_wall_dimensions(profile, None, WallViewKind::Drainage) {
        dimension.render(layers::DIMENSIONS, &mut output);
    }

    draw_title(WallViewKind::Drainage, &mut output);

    debug!(primitives = output.len(), pipes = pipes.len(); "Composed drainage view");
    output
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use wallsheet_core::wall::{WallParameters, compute_wall_profile};

    use super::*;

    fn default_profile() -> WallProfile {
        compute_wall_profile(&WallParameters::default()).unwrap()
    }

    #[test]
    fn test_pipes_every_meter_above_soil() {
        let profile = default_profile();
        let pipes = drainage_pipes(&profile, 1.0);

        // Soil at 1.0, crown at 7.4: pipes at 2.0 ..= 7.0
        assert_eq!(pipes.len(), 6);
        for (i, pipe) in pipes.iter().enumerate() {
            assert_approx_eq!(f64, pipe.start.y(), 2.0 + i as f64, epsilon = 1e-9);
            assert!(pipe.end.x() > pipe.start.x());
            assert!(pipe.end.y() > pipe.start.y());
        }
    }

    #[test]
    fn test_pipe_slope_is_twenty_degrees() {
        let profile = default_profile();
        for pipe in drainage_pipes(&profile, 1.0) {
            let rise = pipe.end.sub_point(pipe.start);
            assert_approx_eq!(
                f64,
                rise.y().atan2(rise.x()).to_degrees(),
                20.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_pipe_reaching_back_face_ends_on_it() {
        let profile = default_profile();
        let back_x = profile.point(VertexRole::CrownRight).x();
        let pipes = drainage_pipes(&profile, 1.0);

        let first = pipes[0];
        assert_approx_eq!(f64, first.end.x(), back_x, epsilon = 1e-9);
    }

    #[test]
    fn test_no_pipes_on_short_walls() {
        let profile = compute_wall_profile(&WallParameters {
            a: 0.5,
            ..WallParameters::default()
        })
        .unwrap();
        assert!(drainage_pipes(&profile, 1.0).is_empty());
    }

    #[test]
    fn test_view_layers() {
        let profile = default_profile();
        let output = drainage_view(&profile);

        assert_eq!(output.on_layer(SOIL).count(), 1);
        assert_eq!(output.layer(SOIL).unwrap().line_style(), LineStyle::Dashed);
        assert_eq!(output.on_layer(PIPES).count(), 12);
        for (layer, _) in output.items() {
            assert!(output.layer(layer).is_some());
        }
    }
}

//! View composition.
//!
//! Each function here builds one view of the sheet in local coordinates:
//! wall views put the base-left corner of the wall at the origin, and mesh
//! views put their info block there. Nothing in this module knows where a
//! view ends up on the sheet; [`crate::layout`] translates the result once.
//!
//! Views declare every layer they draw on, so a view can be emitted on its
//! own as well as part of a sheet.

mod drainage;
mod frame;
mod mesh;
mod projection;
mod reinforcement;

pub use drainage::{DrainagePipe, drainage_pipes, drainage_view};
pub use frame::sheet_frame;
pub use mesh::mesh_view;
pub use projection::projection_view;
pub use reinforcement::reinforcement_view;

use wallsheet_core::{
    annotation::{WallViewKind, title_block},
    color::AciColor,
    draw::{LayerDefinition, LayeredPrimitives, LineStyle, Primitive},
    geometry::Point,
    wall::WallProfile,
};

/// Layer names shared by several views.
pub mod layers {
    pub const DIMENSIONS: &str = "DIMENSIONS";
    pub const TITLES: &str = "TITLES";
}

/// Segments joining consecutive points.
pub(crate) fn polyline(points: &[Point]) -> impl Iterator<Item = Primitive> + '_ {
    points
        .windows(2)
        .map(|pair| Primitive::line(pair[0], pair[1]))
}

/// Declares the layers every wall view shares.
pub(crate) fn declare_wall_annotation_layers(output: &mut LayeredPrimitives) {
    output.declare(LayerDefinition::new(
        layers::DIMENSIONS,
        AciColor::Yellow,
        LineStyle::Continuous,
    ));
    output.declare(LayerDefinition::new(
        layers::TITLES,
        AciColor::Yellow,
        LineStyle::Continuous,
    ));
}

/// Draws the wall outline on `layer`.
pub(crate) fn draw_outline(profile: &WallProfile, layer: &str, output: &mut LayeredPrimitives) {
    output.extend(layer, polyline(&profile.points()));
}

/// Draws the title block of a wall view under the wall.
pub(crate) fn draw_title(kind: WallViewKind, output: &mut LayeredPrimitives) {
    title_block(kind.number(), kind.title(), Point::default()).render(layers::TITLES, output);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_segments() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let segments: Vec<_> = polyline(&points).collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[1],
            Primitive::line(Point::new(1.0, 0.0), Point::new(1.0, 1.0))
        );
        assert_eq!(polyline(&points[..1]).count(), 0);
    }
}
